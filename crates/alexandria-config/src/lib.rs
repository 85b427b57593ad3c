//! Typed configuration system for the Alexandria document pipeline.
//!
//! This crate provides the configuration surface that drives document
//! assembly, with support for:
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//! - Coalesced change notifications that drive rebuilds
//!
//! # Overview
//!
//! Configuration is built around the [`AlexandriaConfig`] struct:
//!
//! - [`DocumentConfig`] - document enablement, serve path, static source
//! - [`ScanConfig`] - annotation-scan enablement and module exclusions
//! - [`HookConfig`] - model reader and filter hook identifiers
//!
//! # Example
//!
//! ```no_run
//! use alexandria_config::{AlexandriaConfig, ConfigLoader};
//!
//! # fn main() -> Result<(), alexandria_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_file("alexandria.toml")?
//!     .with_env_prefix("ALEXANDRIA")
//!     .load()?;
//!
//! println!("document served at: {}", config.document.serve_path);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [document]
//! enabled = true
//! serve_path = "/openapi"
//! static_path = "resources/openapi.yaml"
//!
//! [scan]
//! enabled = true
//! exclude = ["router::rest::routed"]
//!
//! [hooks]
//! model_reader = "router-model-reader"
//! filter = "router-filter"
//! ```
//!
//! # Environment Variable Overrides
//!
//! All values can be overridden via `PREFIX__SECTION__KEY` variables:
//!
//! - `ALEXANDRIA__SCAN__ENABLED=false`
//! - `ALEXANDRIA__SCAN__EXCLUDE=router::rest::routed,router::internal`
//! - `ALEXANDRIA__HOOKS__FILTER=router-filter`

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod watcher;

pub use config::{
    AlexandriaConfig, AlexandriaConfigBuilder, DocumentConfig, HookConfig, ScanConfig,
    DEFAULT_SERVE_PATH, DEFAULT_STATIC_PATH,
};
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use watcher::{ChangeEvent, ChangeWatcher, ChangeWatcherBuilder};
