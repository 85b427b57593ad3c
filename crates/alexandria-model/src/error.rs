//! Error types for the document model crate.

use thiserror::Error;

/// Errors that can occur while parsing or rendering documents.
#[derive(Debug, Error)]
pub enum ModelError {
    /// YAML syntax or structure error.
    #[error("YAML document error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON syntax or structure error.
    #[error("JSON document error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for document model operations.
pub type ModelResult<T> = Result<T, ModelError>;
