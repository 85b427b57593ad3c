//! # Alexandria
//!
//! **API document assembly and serving.**
//!
//! Alexandria combines a pre-authored static description document,
//! annotation-derived endpoint metadata, a programmatic model-editing
//! hook and a final filter hook into one published API description,
//! served over HTTP in YAML or JSON.
//!
//! ## Assembly pipeline
//!
//! ```text
//! Static Loader → Annotation Scanner → Merge Engine → Model Reader → Filter → Published
//! ```
//!
//! - The static document's `info` block is authoritative; scanned
//!   operations win structurally.
//! - Endpoints under excluded module prefixes are never scanned, but are
//!   still served: document authorship and request serving are
//!   independent.
//! - Hooks are resolved by configured name from an explicit registry at
//!   each build; an unresolvable name fails the build.
//! - Builds run on configuration activation and change events, one at a
//!   time; readers of the published document never block on a build.
//!
//! ## Quick Start
//!
//! ```rust
//! use alexandria::prelude::*;
//! use std::sync::Arc;
//!
//! let config = AlexandriaConfig::default();
//! let endpoints = vec![
//!     EndpointMeta::new("getFqdn", "router::rest", "/info/fqdn").method(Method::Get),
//! ];
//!
//! let publisher = Arc::new(DocumentPublisher::new());
//! let builder = DocumentBuilder::new(config).endpoints(endpoints);
//! publisher.rebuild(&builder).unwrap();
//!
//! let yaml = publisher.current().unwrap().body(DocumentFormat::Yaml).to_string();
//! assert!(yaml.contains("/info/fqdn"));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod logging;

// Re-export the component crates under stable names.
pub use alexandria_config as config;
pub use alexandria_model as model;
pub use alexandria_pipeline as pipeline;
pub use alexandria_server as server;

pub use logging::{init_logging, LogConfig, LoggingError};

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use alexandria_config::{
        AlexandriaConfig, ChangeWatcher, ConfigLoader, DocumentConfig, HookConfig, ScanConfig,
    };
    pub use alexandria_model::{
        Document, DocumentFormat, EndpointMeta, Info, Method, Operation, PathItem,
    };
    pub use alexandria_pipeline::{
        BuildPhase, DocumentBuilder, DocumentHook, DocumentPublisher, HookRegistry, MergePolicy,
        RebuildOutcome,
    };
    pub use alexandria_server::{
        DocumentService, EndpointResponse, HandlerRegistry, Server, ShutdownSignal,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use std::sync::Arc;

    #[test]
    fn test_prelude_pipeline_round_trip() {
        let publisher = Arc::new(DocumentPublisher::new());
        let builder = DocumentBuilder::new(AlexandriaConfig::default()).endpoint(
            EndpointMeta::new("getFqdn", "router::rest", "/info/fqdn").method(Method::Get),
        );

        publisher.rebuild(&builder).unwrap();
        assert!(publisher.has_published());
        assert_eq!(publisher.phase(), BuildPhase::Published);
    }
}
