//! Main configuration types.
//!
//! This module provides the top-level [`AlexandriaConfig`] struct and its
//! builder. The sections mirror the configuration surface of the document
//! pipeline: the document itself (enablement, serve path, static source),
//! the annotation scan (enablement, exclusions) and the two hook
//! identifiers.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Conventional location of the static baseline document, used when no
/// explicit path is configured. Absence at this location is tolerated.
pub const DEFAULT_STATIC_PATH: &str = "openapi.yaml";

/// Default HTTP path the assembled document is served from.
pub const DEFAULT_SERVE_PATH: &str = "/openapi";

/// Complete configuration for the Alexandria document pipeline.
///
/// # Example
///
/// ```
/// use alexandria_config::AlexandriaConfig;
///
/// let config = AlexandriaConfig::default();
/// assert!(config.document.enabled);
/// assert_eq!(config.document.serve_path, "/openapi");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct AlexandriaConfig {
    /// Document configuration.
    #[serde(default)]
    pub document: DocumentConfig,

    /// Annotation scan configuration.
    #[serde(default)]
    pub scan: ScanConfig,

    /// Hook identifiers.
    #[serde(default)]
    pub hooks: HookConfig,
}

/// Configuration of the assembled document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DocumentConfig {
    /// Whether document assembly and serving are enabled at all. When
    /// disabled, no document is built and the serve path answers 503.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// HTTP path the document is served from.
    #[serde(default = "default_serve_path")]
    pub serve_path: String,

    /// Explicit path to the static baseline document. When set, the file
    /// must exist; when unset, the conventional location
    /// [`DEFAULT_STATIC_PATH`] is consulted and its absence is tolerated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_path: Option<PathBuf>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            serve_path: DEFAULT_SERVE_PATH.to_string(),
            static_path: None,
        }
    }
}

/// Configuration of the annotation scan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// Whether annotation scanning is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Module-path prefixes excluded from scanning. An excluded prefix
    /// also excludes all of its submodules.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            exclude: Vec::new(),
        }
    }
}

/// Hook identifiers, resolved against the hook registry at each build.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct HookConfig {
    /// Name of the model reader hook, if configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_reader: Option<String>,

    /// Name of the filter hook, if configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_serve_path() -> String {
    DEFAULT_SERVE_PATH.to_string()
}

impl AlexandriaConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> AlexandriaConfigBuilder {
        AlexandriaConfigBuilder::new()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - The serve path does not start with `/`
    /// - A scan exclusion entry is empty or has dangling `::` separators
    /// - A hook identifier is an empty string
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.document.serve_path.starts_with('/') {
            return Err(ConfigError::invalid_value(
                "document.serve_path",
                format!("must start with '/': {}", self.document.serve_path),
            ));
        }

        for prefix in &self.scan.exclude {
            if prefix.is_empty()
                || prefix.starts_with("::")
                || prefix.ends_with("::")
                || prefix.contains(":::")
            {
                return Err(ConfigError::invalid_value(
                    "scan.exclude",
                    format!("malformed module-path prefix: {prefix:?}"),
                ));
            }
        }

        for (field, name) in [
            ("hooks.model_reader", &self.hooks.model_reader),
            ("hooks.filter", &self.hooks.filter),
        ] {
            if let Some(name) = name {
                if name.is_empty() {
                    return Err(ConfigError::invalid_value(field, "hook name is empty"));
                }
            }
        }

        Ok(())
    }
}

/// Builder for [`AlexandriaConfig`].
#[derive(Debug, Default)]
pub struct AlexandriaConfigBuilder {
    document: Option<DocumentConfig>,
    scan: Option<ScanConfig>,
    hooks: Option<HookConfig>,
}

impl AlexandriaConfigBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document configuration.
    #[must_use]
    pub fn document(mut self, document: DocumentConfig) -> Self {
        self.document = Some(document);
        self
    }

    /// Set the scan configuration.
    #[must_use]
    pub fn scan(mut self, scan: ScanConfig) -> Self {
        self.scan = Some(scan);
        self
    }

    /// Set the hook identifiers.
    #[must_use]
    pub fn hooks(mut self, hooks: HookConfig) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Build the configuration. Unset sections use their defaults.
    #[must_use]
    pub fn build(self) -> AlexandriaConfig {
        AlexandriaConfig {
            document: self.document.unwrap_or_default(),
            scan: self.scan.unwrap_or_default(),
            hooks: self.hooks.unwrap_or_default(),
        }
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if validation fails.
    pub fn build_validated(self) -> Result<AlexandriaConfig, ConfigError> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}
