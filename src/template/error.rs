// ABOUTME: Error types for time-template construction and rendering
// ABOUTME: Defines failures raised by cycle strings when built or rendered

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Unsupported cycle directive '{directive}' in format '{format}'")]
    UnsupportedDirective { directive: String, format: String },

    #[error("Invalid cycle offset '{0}'. Expected [-][[[dd:]hh:]mm:]ss")]
    InvalidOffset(String),

    #[error("Cycle time out of range: {instant} shifted by {offset}")]
    TimeOutOfRange { instant: String, offset: String },
}

pub type Result<T> = std::result::Result<T, TemplateError>;
