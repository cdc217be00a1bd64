// ABOUTME: Main library module for the cyclestr time-template crate
// ABOUTME: Exports compound templates, cycle strings, and the template catalog

pub mod catalog;
pub mod template;

// Re-export commonly used types
pub use catalog::{CatalogError, TemplateCatalog};
pub use template::{CompoundTemplate, CycleString, CycleTimeExpression, Segment, TemplateError};

// Error handling
pub type Result<T> = anyhow::Result<T>;
