//! Serving the published document.
//!
//! The document service answers `GET <serve_path>` with the most recently
//! published document. Serving never rebuilds: it reads whatever the
//! publisher currently holds and only fails when nothing has ever been
//! published (or the feature is disabled), mapping to a 503.
//!
//! Format selection: the `format` query parameter wins, then the first
//! recognized media type in the `Accept` header, then the YAML default.

use std::sync::Arc;

use alexandria_config::DocumentConfig;
use alexandria_model::DocumentFormat;
use alexandria_pipeline::{DocumentPublisher, PublishedDocument};

use crate::error::ServeError;

/// Serves the currently published document over HTTP.
#[derive(Debug, Clone)]
pub struct DocumentService {
    publisher: Arc<DocumentPublisher>,
    serve_path: String,
    enabled: bool,
}

impl DocumentService {
    /// Creates a service reading from the given publisher.
    #[must_use]
    pub fn new(publisher: Arc<DocumentPublisher>, config: &DocumentConfig) -> Self {
        Self {
            publisher,
            serve_path: config.serve_path.clone(),
            enabled: config.enabled,
        }
    }

    /// The path this service answers on.
    #[must_use]
    pub fn serve_path(&self) -> &str {
        &self.serve_path
    }

    /// Whether the given request path targets this service.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        path == self.serve_path
    }

    /// Resolve the document and format for a request.
    ///
    /// # Errors
    ///
    /// Returns `ServeError::Disabled` when serving is configured off and
    /// `ServeError::NoDocument` when no build has ever published.
    pub fn resolve(
        &self,
        accept: Option<&str>,
        query: Option<&str>,
    ) -> Result<(DocumentFormat, Arc<PublishedDocument>), ServeError> {
        if !self.enabled {
            return Err(ServeError::Disabled);
        }

        let published = self.publisher.current().ok_or(ServeError::NoDocument)?;
        Ok((negotiate_format(accept, query), published))
    }
}

/// Pick the response format from the request.
fn negotiate_format(accept: Option<&str>, query: Option<&str>) -> DocumentFormat {
    if let Some(format) = query.and_then(format_query_param) {
        return format;
    }

    if let Some(accept) = accept {
        for entry in accept.split(',') {
            if let Some(format) = DocumentFormat::from_media_type(entry) {
                return format;
            }
        }
    }

    DocumentFormat::default()
}

/// Extract the `format` parameter from a raw query string.
fn format_query_param(query: &str) -> Option<DocumentFormat> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "format")
        .and_then(|(_, value)| DocumentFormat::from_query_value(value))
}
