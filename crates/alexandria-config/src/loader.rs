//! Configuration loader with layered approach.
//!
//! The loader applies configuration in layers, with later layers
//! overriding earlier ones:
//! 1. Default values (built into the code)
//! 2. Configuration file (TOML or JSON)
//! 3. Environment variables
//!
//! # Example
//!
//! ```no_run
//! use alexandria_config::ConfigLoader;
//!
//! # fn main() -> Result<(), alexandria_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_file("alexandria.toml")?
//!     .with_env_prefix("ALEXANDRIA")
//!     .load()?;
//! # Ok(())
//! # }
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{AlexandriaConfig, ConfigError};

/// Configuration loader with a layered approach.
///
/// Environment overrides use the form `PREFIX__SECTION__KEY`, e.g.
/// `ALEXANDRIA__SCAN__ENABLED=false` or
/// `ALEXANDRIA__SCAN__EXCLUDE=router::rest::routed,router::internal`
/// (comma-separated list).
#[derive(Debug)]
pub struct ConfigLoader {
    config: AlexandriaConfig,
    env_prefix: Option<String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new loader starting from default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: AlexandriaConfig::default(),
            env_prefix: None,
        }
    }

    /// Load configuration from a file.
    ///
    /// Supports TOML (`.toml`) and JSON (`.json`), chosen by extension.
    /// Unknown fields are rejected.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file does not exist, cannot be read,
    /// has an unsupported extension, or contains invalid or unknown
    /// fields.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;

        self.config = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        Ok(self)
    }

    /// Enable environment variable overrides with the given prefix.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Finish loading: apply environment overrides, validate, and return
    /// the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an environment override cannot be parsed
    /// or validation fails.
    pub fn load(mut self) -> Result<AlexandriaConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            apply_env_overrides(&mut self.config, &prefix)?;
        }
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Apply `PREFIX__SECTION__KEY` environment overrides to the config.
fn apply_env_overrides(
    config: &mut AlexandriaConfig,
    prefix: &str,
) -> Result<(), ConfigError> {
    let marker = format!("{prefix}__");

    for (var, value) in env::vars() {
        let Some(rest) = var.strip_prefix(&marker) else {
            continue;
        };
        let Some((section, key)) = rest.split_once("__") else {
            continue;
        };

        match (section, key) {
            ("DOCUMENT", "ENABLED") => {
                config.document.enabled = parse_bool(&var, &value)?;
            }
            ("DOCUMENT", "SERVE_PATH") => {
                config.document.serve_path = value;
            }
            ("DOCUMENT", "STATIC_PATH") => {
                config.document.static_path = Some(PathBuf::from(value));
            }
            ("SCAN", "ENABLED") => {
                config.scan.enabled = parse_bool(&var, &value)?;
            }
            ("SCAN", "EXCLUDE") => {
                config.scan.exclude = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            ("HOOKS", "MODEL_READER") => {
                config.hooks.model_reader = Some(value);
            }
            ("HOOKS", "FILTER") => {
                config.hooks.filter = Some(value);
            }
            _ => {
                tracing::debug!(var = %var, "ignoring unrecognized configuration override");
            }
        }
    }

    Ok(())
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::env_parse_error(
            var,
            format!("expected a boolean, got {value:?}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config, AlexandriaConfig::default());
    }

    #[test]
    fn test_with_file_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
            [document]
            serve_path = "/api-docs"

            [scan]
            exclude = ["router::rest::routed"]

            [hooks]
            model_reader = "router-model-reader"
            "#
        )
        .unwrap();

        let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();
        assert_eq!(config.document.serve_path, "/api-docs");
        assert_eq!(config.scan.exclude, vec!["router::rest::routed"]);
        assert_eq!(config.hooks.model_reader.as_deref(), Some("router-model-reader"));
    }

    #[test]
    fn test_with_file_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{ "scan": {{ "enabled": false }} }}"#).unwrap();

        let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();
        assert!(!config.scan.enabled);
    }

    #[test]
    fn test_with_file_missing() {
        let result = ConfigLoader::new().with_file("/nonexistent/alexandria.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn test_with_file_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        let result = ConfigLoader::new().with_file(file.path());
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_env_override_bool_and_list() {
        env::set_var("ALX_T1__SCAN__ENABLED", "false");
        env::set_var("ALX_T1__SCAN__EXCLUDE", "router::rest::routed, router::internal");

        let config = ConfigLoader::new().with_env_prefix("ALX_T1").load().unwrap();
        assert!(!config.scan.enabled);
        assert_eq!(
            config.scan.exclude,
            vec!["router::rest::routed", "router::internal"]
        );

        env::remove_var("ALX_T1__SCAN__ENABLED");
        env::remove_var("ALX_T1__SCAN__EXCLUDE");
    }

    #[test]
    fn test_env_override_hooks() {
        env::set_var("ALX_T2__HOOKS__FILTER", "router-filter");

        let config = ConfigLoader::new().with_env_prefix("ALX_T2").load().unwrap();
        assert_eq!(config.hooks.filter.as_deref(), Some("router-filter"));

        env::remove_var("ALX_T2__HOOKS__FILTER");
    }

    #[test]
    fn test_env_override_invalid_bool() {
        env::set_var("ALX_T3__DOCUMENT__ENABLED", "maybe");

        let result = ConfigLoader::new().with_env_prefix("ALX_T3").load();
        assert!(matches!(result, Err(ConfigError::EnvParseError { .. })));

        env::remove_var("ALX_T3__DOCUMENT__ENABLED");
    }
}
