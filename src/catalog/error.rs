// ABOUTME: Error types for template catalog loading and lookup
// ABOUTME: Defines failures raised while reading, parsing, or rendering catalog entries

use thiserror::Error;

use crate::template::TemplateError;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid template name: '{name}'")]
    InvalidName { name: String },

    #[error("Unknown template: {name}")]
    UnknownTemplate { name: String },

    #[error("Template error: {0}")]
    TemplateError(#[from] TemplateError),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
