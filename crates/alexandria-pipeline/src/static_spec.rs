//! Static baseline document loading.
//!
//! The static spec is a pre-authored YAML or JSON document supplied as a
//! resource file. An explicitly configured path is required to exist; the
//! conventional fallback location is optional. Callers can distinguish an
//! absent optional source (`Ok(None)`) from a malformed one
//! (`Err(LoadError::Parse)`).

use std::fs;
use std::path::{Path, PathBuf};

use alexandria_config::{DocumentConfig, DEFAULT_STATIC_PATH};
use alexandria_model::{Document, DocumentFormat};

use crate::error::LoadError;

/// The location and requiredness of the static baseline document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSpec {
    path: PathBuf,
    required: bool,
}

impl StaticSpec {
    /// A static source that must exist.
    #[must_use]
    pub fn required(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: true,
        }
    }

    /// A static source whose absence is tolerated.
    #[must_use]
    pub fn optional(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: false,
        }
    }

    /// Derive the static source from document configuration: an explicit
    /// path is required, the conventional default location is optional.
    #[must_use]
    pub fn from_config(config: &DocumentConfig) -> Self {
        match &config.static_path {
            Some(path) => Self::required(path.clone()),
            None => Self::optional(DEFAULT_STATIC_PATH),
        }
    }

    /// Path this source reads from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and parse the static document.
    ///
    /// Returns `Ok(None)` when an optional source is absent. No side
    /// effects.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if a required source is missing, the file
    /// cannot be read, the extension maps to no known format, or the
    /// content is malformed.
    pub fn load(&self) -> Result<Option<Document>, LoadError> {
        if !self.path.exists() {
            if self.required {
                return Err(LoadError::Missing {
                    path: self.path.clone(),
                });
            }
            tracing::debug!(path = %self.path.display(), "no static document present");
            return Ok(None);
        }

        let format = DocumentFormat::from_path(&self.path).ok_or_else(|| {
            LoadError::UnsupportedFormat {
                path: self.path.clone(),
            }
        })?;

        let content = fs::read_to_string(&self.path).map_err(|e| LoadError::Read {
            path: self.path.clone(),
            source: e,
        })?;

        let document = Document::parse(format, &content).map_err(|e| LoadError::Parse {
            path: self.path.clone(),
            source: e,
        })?;

        tracing::debug!(
            path = %self.path.display(),
            paths = document.paths.len(),
            "loaded static document"
        );
        Ok(Some(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DISTRICTS_YAML: &str = r"
openapi: 3.0.3
info:
  title: Districts API
  version: 1.0.0
paths:
  /districts/all:
    get:
      operationId: getAllDistricts
      responses:
        '200':
          description: All districts
";

    fn write_spec(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn test_load_yaml() {
        let file = write_spec(".yaml", DISTRICTS_YAML);
        let doc = StaticSpec::required(file.path()).load().unwrap().unwrap();
        assert_eq!(doc.info.title, "Districts API");
        assert!(doc.paths.contains_key("/districts/all"));
    }

    #[test]
    fn test_load_json() {
        let file = write_spec(
            ".json",
            r#"{ "openapi": "3.0.3", "info": { "title": "Districts API", "version": "1.0.0" } }"#,
        );
        let doc = StaticSpec::required(file.path()).load().unwrap().unwrap();
        assert_eq!(doc.info.title, "Districts API");
    }

    #[test]
    fn test_optional_absent_is_none() {
        let result = StaticSpec::optional("/nonexistent/openapi.yaml").load();
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn test_required_absent_is_error() {
        let result = StaticSpec::required("/nonexistent/openapi.yaml").load();
        assert!(matches!(result, Err(LoadError::Missing { .. })));
    }

    #[test]
    fn test_malformed_is_parse_error_not_absence() {
        let file = write_spec(".yaml", "openapi: [unclosed");
        let result = StaticSpec::optional(file.path()).load();
        assert!(matches!(result, Err(LoadError::Parse { .. })));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_spec(".txt", DISTRICTS_YAML);
        let result = StaticSpec::required(file.path()).load();
        assert!(matches!(result, Err(LoadError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_from_config() {
        let explicit = DocumentConfig {
            static_path: Some(PathBuf::from("resources/openapi.yaml")),
            ..Default::default()
        };
        assert_eq!(
            StaticSpec::from_config(&explicit),
            StaticSpec::required("resources/openapi.yaml")
        );

        let conventional = DocumentConfig::default();
        assert_eq!(
            StaticSpec::from_config(&conventional),
            StaticSpec::optional(DEFAULT_STATIC_PATH)
        );
    }
}
