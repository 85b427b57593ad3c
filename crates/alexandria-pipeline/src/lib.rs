//! # Alexandria Pipeline
//!
//! The document assembly core: combines a static baseline document,
//! annotation-derived endpoint fragments, a model reader hook and a
//! filter hook into one published API description.
//!
//! ## Assembly order
//!
//! ```text
//! Static Loader → Annotation Scanner → Merge Engine → Model Reader → Filter → Published
//! ```
//!
//! Precedence is asymmetric: the static document's `info` block is
//! authoritative, scanned operations win structurally. The model reader
//! may rewrite anything, including `info`; the filter runs last and
//! commonly rewrites operation-level vendor extensions.
//!
//! ## Quick Start
//!
//! ```
//! use alexandria_config::AlexandriaConfig;
//! use alexandria_model::{EndpointMeta, Method};
//! use alexandria_pipeline::{DocumentBuilder, DocumentPublisher};
//!
//! let builder = DocumentBuilder::new(AlexandriaConfig::default()).endpoint(
//!     EndpointMeta::new("getFqdn", "router::rest", "/info/fqdn").method(Method::Get),
//! );
//!
//! let publisher = DocumentPublisher::new();
//! publisher.rebuild(&builder).unwrap();
//! assert!(publisher.current().unwrap().document().paths.contains_key("/info/fqdn"));
//! ```
//!
//! Builds are triggered by configuration activation and change events,
//! never by individual HTTP requests. At most one build runs at a time;
//! readers of the published document never block on a build in progress.

mod build;
mod error;
mod hooks;
mod merge;
mod publish;
mod scan;
mod static_spec;

pub use build::{BuildPhase, DocumentBuilder};
pub use error::{BoxError, BuildError, HookError, HookKind, LoadError, MergeError, ScanError};
pub use hooks::{DocumentHook, HookRegistry};
pub use merge::{merge_documents, MergePolicy};
pub use publish::{DocumentPublisher, PublishedDocument, RebuildOutcome};
pub use scan::{scan_endpoints, ScanScope};
pub use static_spec::StaticSpec;
