// ABOUTME: Template catalog module for named, deduplicated compound templates
// ABOUTME: Loads template definitions from YAML and renders them by name

pub mod error;
pub mod registry;

pub use error::{CatalogError, Result};
pub use registry::TemplateCatalog;
