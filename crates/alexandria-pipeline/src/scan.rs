//! Annotation scanning.
//!
//! The scanner turns registered endpoint metadata into a document
//! fragment: one path-item entry per surviving endpoint. Endpoints whose
//! declaring module path matches an excluded prefix are dropped, as are
//! endpoints with no discoverable HTTP method mapping. Per-endpoint
//! conversion failures are recovered locally: the endpoint is skipped
//! with a warning and the scan continues.
//!
//! The fragment deliberately carries no `info` block; the merge engine
//! treats the static document as authoritative for metadata.

use indexmap::IndexMap;

use alexandria_config::ScanConfig;
use alexandria_model::{EndpointMeta, MediaType, Operation, Parameter, PathItem, ResponseObject};

use crate::error::ScanError;

/// The set of module-path prefixes excluded from annotation scanning.
///
/// Matching is prefix-based on fully-qualified module paths: an excluded
/// prefix also excludes all of its submodules. Immutable for the life of
/// a pipeline instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanScope {
    prefixes: Vec<String>,
}

impl ScanScope {
    /// Create a scope from exclusion prefixes.
    #[must_use]
    pub fn new(prefixes: impl IntoIterator<Item = String>) -> Self {
        Self {
            prefixes: prefixes.into_iter().collect(),
        }
    }

    /// Derive the scope from scan configuration.
    #[must_use]
    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.exclude.iter().cloned())
    }

    /// Whether the given declaring module path is excluded.
    ///
    /// `router::rest::routed` excludes exactly that module and any
    /// submodule such as `router::rest::routed::districts`, but not the
    /// sibling `router::rest::routes`.
    #[must_use]
    pub fn excludes(&self, module_path: &str) -> bool {
        self.prefixes.iter().any(|prefix| {
            module_path == prefix
                || module_path
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with("::"))
        })
    }
}

/// Scan registered endpoints into a document fragment.
///
/// Output ordering is not significant; the merge is keyed, not ordered.
/// This function never fails the build: every per-endpoint problem is
/// logged and skipped.
#[must_use]
pub fn scan_endpoints(
    endpoints: &[EndpointMeta],
    scope: &ScanScope,
) -> IndexMap<String, PathItem> {
    let mut paths: IndexMap<String, PathItem> = IndexMap::new();

    for endpoint in endpoints {
        if scope.excludes(&endpoint.module_path) {
            tracing::debug!(
                operation = %endpoint.operation_id,
                module = %endpoint.module_path,
                "endpoint excluded from scan"
            );
            continue;
        }

        let Some(method) = endpoint.method else {
            tracing::warn!(
                operation = %endpoint.operation_id,
                "endpoint has no HTTP method mapping, skipping"
            );
            continue;
        };

        let operation = match convert_endpoint(endpoint) {
            Ok(operation) => operation,
            Err(e) => {
                tracing::warn!(error = %e, "skipping endpoint");
                continue;
            }
        };

        let item = paths.entry(endpoint.path.clone()).or_default();
        if item.operation(method).is_some() {
            let e = ScanError::DuplicateSlot {
                operation_id: endpoint.operation_id.clone(),
                method,
                path: endpoint.path.clone(),
            };
            tracing::warn!(error = %e, "skipping endpoint");
            continue;
        }
        item.set_operation(method, operation);
    }

    // Entries left empty by skipped endpoints would serialize as stubs.
    paths.retain(|_, item| !item.is_empty());
    paths
}

/// Convert one endpoint's metadata into an operation.
fn convert_endpoint(endpoint: &EndpointMeta) -> Result<Operation, ScanError> {
    let mut parameters = template_parameters(&endpoint.path).ok_or_else(|| {
        ScanError::InvalidTemplate {
            operation_id: endpoint.operation_id.clone(),
            path: endpoint.path.clone(),
        }
    })?;

    for declared in &endpoint.parameters {
        let occupied = parameters
            .iter()
            .any(|p| p.name == declared.name && p.location == declared.location);
        if !occupied {
            parameters.push(declared.clone());
        }
    }

    let mut responses: IndexMap<String, ResponseObject> = IndexMap::new();
    for meta in &endpoint.responses {
        let mut response = ResponseObject::new(meta.description.clone());
        if let Some(media_type) = &meta.media_type {
            response.content.insert(
                media_type.clone(),
                MediaType {
                    schema: meta.schema.clone(),
                    example: None,
                },
            );
        }
        responses.insert(meta.status.clone(), response);
    }
    if responses.is_empty() {
        responses.insert("200".to_string(), ResponseObject::new("Successful response"));
    }

    Ok(Operation {
        operation_id: Some(endpoint.operation_id.clone()),
        summary: endpoint.summary.clone(),
        description: endpoint.description.clone(),
        tags: endpoint.tags.clone(),
        deprecated: endpoint.deprecated,
        parameters,
        request_body: endpoint.request_body.clone(),
        responses,
        extensions: endpoint.extensions.clone(),
    })
}

/// Extract path parameters from a template like `/districts/{code}`.
///
/// Returns `None` when the template's braces are unbalanced.
fn template_parameters(path: &str) -> Option<Vec<Parameter>> {
    let param_regex = regex::Regex::new(r"\{([^{}]+)\}").expect("valid regex");

    let captured: Vec<Parameter> = param_regex
        .captures_iter(path)
        .filter_map(|cap| cap.get(1))
        .map(|name| Parameter::path(name.as_str()))
        .collect();

    let open = path.matches('{').count();
    let close = path.matches('}').count();
    if open != close || open != captured.len() {
        return None;
    }

    Some(captured)
}
