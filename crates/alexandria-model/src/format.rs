//! Document serialization formats and content negotiation.
//!
//! The published document is always available in a YAML and a JSON
//! rendering. YAML is the default; JSON is selected by `Accept` header or
//! by a `format` query parameter.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ModelResult;

/// Serialization format of a rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    /// YAML rendering, served as `application/yaml`. The default.
    #[default]
    Yaml,
    /// JSON rendering, served as `application/json`.
    Json,
}

impl DocumentFormat {
    /// Media type used when serving this format.
    #[must_use]
    pub const fn media_type(self) -> &'static str {
        match self {
            DocumentFormat::Yaml => "application/yaml",
            DocumentFormat::Json => "application/json",
        }
    }

    /// Resolve a format from a media type, e.g. an `Accept` header entry.
    ///
    /// Recognizes `application/yaml`, `text/yaml` and `application/json`
    /// (ignoring any parameters). Returns `None` for anything else,
    /// including wildcards, so callers can fall back to the default.
    #[must_use]
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let essence = media_type.split(';').next().unwrap_or("").trim();
        match essence.to_ascii_lowercase().as_str() {
            "application/yaml" | "text/yaml" | "application/x-yaml" => Some(DocumentFormat::Yaml),
            "application/json" => Some(DocumentFormat::Json),
            _ => None,
        }
    }

    /// Resolve a format from a `format` query parameter value,
    /// case-insensitively (`YAML` or `JSON`).
    #[must_use]
    pub fn from_query_value(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "YAML" => Some(DocumentFormat::Yaml),
            "JSON" => Some(DocumentFormat::Json),
            _ => None,
        }
    }

    /// Resolve a format from a file extension (`.yaml`, `.yml`, `.json`).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Some(DocumentFormat::Yaml)
            }
            Some(ext) if ext.eq_ignore_ascii_case("json") => Some(DocumentFormat::Json),
            _ => None,
        }
    }

    /// Parse a value from a string in this format.
    pub fn parse<T: DeserializeOwned>(self, input: &str) -> ModelResult<T> {
        match self {
            DocumentFormat::Yaml => Ok(serde_yaml::from_str(input)?),
            DocumentFormat::Json => Ok(serde_json::from_str(input)?),
        }
    }

    /// Render a value as a string in this format.
    pub fn render<T: Serialize>(self, value: &T) -> ModelResult<String> {
        match self {
            DocumentFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            DocumentFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentFormat::Yaml => f.write_str("YAML"),
            DocumentFormat::Json => f.write_str("JSON"),
        }
    }
}
