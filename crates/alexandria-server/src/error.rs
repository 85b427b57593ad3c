//! Server error types.

use http::StatusCode;
use thiserror::Error;

/// Errors that can occur while running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the configured address.
    #[error("bind error: {0}")]
    Bind(String),

    /// I/O error during server operation.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced to HTTP callers of the document endpoint.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ServeError {
    /// No document has ever been successfully built.
    #[error("no document has been published")]
    NoDocument,

    /// Document serving is disabled by configuration.
    #[error("document serving is disabled")]
    Disabled,
}

impl ServeError {
    /// HTTP status this error maps to.
    #[must_use]
    pub fn status_code(self) -> StatusCode {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
