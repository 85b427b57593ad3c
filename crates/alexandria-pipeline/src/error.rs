//! Error types for the document assembly pipeline.
//!
//! Build-fatal errors ([`LoadError`], [`MergeError`], [`HookError`]) abort
//! the current build and leave the previously published document in
//! place. [`ScanError`] is recovered per endpoint: the offending endpoint
//! is skipped with a warning and the scan continues.

use std::path::PathBuf;

use thiserror::Error;

use alexandria_model::{Method, ModelError};

/// Boxed error returned by hook implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors reading or parsing the static baseline document. Fatal to the
/// build in which they occur.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A required static source is missing. Absence of an *optional*
    /// source is not an error; the loader reports it as "no document".
    #[error("static document not found: {path}")]
    Missing {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The static source exists but cannot be read.
    #[error("failed to read static document: {path}")]
    Read {
        /// Path to the file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The static source has an extension that maps to no known format.
    #[error("static document has an unsupported format: {path}")]
    UnsupportedFormat {
        /// Path to the file.
        path: PathBuf,
    },

    /// The static source is present but malformed.
    #[error("failed to parse static document {path}: {source}")]
    Parse {
        /// Path to the file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: ModelError,
    },
}

/// Per-endpoint scan failures. Recovered locally: the endpoint is skipped
/// with a warning and the scan continues.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The endpoint's path template has unbalanced braces.
    #[error("endpoint '{operation_id}' has a malformed path template: {path}")]
    InvalidTemplate {
        /// The offending operation.
        operation_id: String,
        /// The malformed template.
        path: String,
    },

    /// Two endpoints claim the same path and method.
    #[error("endpoint '{operation_id}' collides with an already scanned {method} {path}")]
    DuplicateSlot {
        /// The offending operation.
        operation_id: String,
        /// The contested method.
        method: Method,
        /// The contested path.
        path: String,
    },
}

/// Merge conflicts between the static document and the scanned fragment.
/// Fatal to the build.
#[derive(Debug, Error)]
pub enum MergeError {
    /// The static document declares the path as a reference, which cannot
    /// hold inline scanned operations.
    #[error("path {path} is a $ref in the static document and cannot absorb scanned operations")]
    ReferenceConflict {
        /// The contested path.
        path: String,
    },
}

/// Which hook failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    /// The post-merge model reader.
    ModelReader,
    /// The final filter.
    Filter,
}

impl std::fmt::Display for HookKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HookKind::ModelReader => f.write_str("model reader"),
            HookKind::Filter => f.write_str("filter"),
        }
    }
}

/// Hook resolution or execution failures. Fatal to the build.
#[derive(Debug, Error)]
pub enum HookError {
    /// A hook was configured by name but is not registered. This is a
    /// configuration error, not a silent no-op.
    #[error("{kind} hook '{name}' is not registered")]
    Unresolved {
        /// Which hook.
        kind: HookKind,
        /// The configured name.
        name: String,
    },

    /// The hook ran and returned an error.
    #[error("{kind} hook '{name}' failed: {source}")]
    Failed {
        /// Which hook.
        kind: HookKind,
        /// The configured name.
        name: String,
        /// The error the hook returned.
        #[source]
        source: BoxError,
    },
}

/// A build-fatal pipeline error.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Static source failure.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Merge conflict.
    #[error(transparent)]
    Merge(#[from] MergeError),

    /// Hook resolution or execution failure.
    #[error(transparent)]
    Hook(#[from] HookError),

    /// The assembled document could not be rendered for publication.
    #[error("failed to render assembled document: {0}")]
    Render(#[from] ModelError),
}
