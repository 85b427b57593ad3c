//! # Alexandria Model
//!
//! Data model for the Alexandria document assembly pipeline.
//!
//! This crate provides:
//! - **Document tree** types representing an API description (info block,
//!   paths, operations, vendor extensions)
//! - **Endpoint metadata** describing registered endpoints the way their
//!   declaration sites document them
//! - **Serialization** to and from YAML and JSON with format negotiation
//!
//! ## Quick Start
//!
//! ```rust
//! use alexandria_model::{Document, DocumentFormat};
//!
//! let yaml = r"
//! openapi: 3.0.3
//! info:
//!   title: Districts API
//!   version: 1.0.0
//! paths:
//!   /districts/all:
//!     get:
//!       responses:
//!         '200':
//!           description: All districts
//! ";
//!
//! let doc = Document::parse(DocumentFormat::Yaml, yaml).unwrap();
//! assert_eq!(doc.info.title, "Districts API");
//! assert!(doc.paths.contains_key("/districts/all"));
//! ```

mod document;
mod endpoint;
mod error;
mod format;

pub use document::{
    Components, Contact, Document, Info, License, MediaType, Method, Operation, Parameter,
    ParameterIn, PathItem, RequestBody, ResponseObject, ServerEntry, Tag, DEFAULT_SPEC_VERSION,
};
pub use endpoint::{EndpointMeta, ResponseMeta};
pub use error::{ModelError, ModelResult};
pub use format::DocumentFormat;
