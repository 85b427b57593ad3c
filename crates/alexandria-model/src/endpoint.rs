//! Declarative endpoint metadata.
//!
//! An [`EndpointMeta`] describes one deployed endpoint the way its
//! declaration site documents it: operation id, declaring module path,
//! HTTP method and path template, produced media types, responses and
//! vendor extensions. The annotation scanner turns a set of these into a
//! document fragment; the declaring module path is what scan exclusions
//! match against.

use indexmap::IndexMap;
use serde_json::Value;

use crate::document::{Method, Parameter, RequestBody};

/// Metadata describing a single registered endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointMeta {
    /// Operation identifier, unique across the deployment.
    pub operation_id: String,
    /// Fully-qualified module path of the declaring handler,
    /// e.g. `router::rest::routed`.
    pub module_path: String,
    /// HTTP method. `None` when the declaration carries no discoverable
    /// method mapping; such endpoints are skipped by the scanner.
    pub method: Option<Method>,
    /// Path template, e.g. `/districts/{code}`.
    pub path: String,
    /// Short summary.
    pub summary: Option<String>,
    /// Full description.
    pub description: Option<String>,
    /// Tags for grouping.
    pub tags: Vec<String>,
    /// Whether the endpoint is deprecated.
    pub deprecated: bool,
    /// Declared parameters beyond those implied by the path template.
    pub parameters: Vec<Parameter>,
    /// Declared request body.
    pub request_body: Option<RequestBody>,
    /// Declared responses.
    pub responses: Vec<ResponseMeta>,
    /// Vendor extensions declared on the endpoint (`x-*` keys).
    pub extensions: IndexMap<String, Value>,
}

/// A declared response on an endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseMeta {
    /// Status code key, e.g. `"200"`.
    pub status: String,
    /// Response description.
    pub description: String,
    /// Produced media type, if declared.
    pub media_type: Option<String>,
    /// Response body schema, if declared.
    pub schema: Option<Value>,
}

impl EndpointMeta {
    /// Create endpoint metadata for the given operation.
    ///
    /// # Example
    ///
    /// ```
    /// use alexandria_model::{EndpointMeta, Method};
    ///
    /// let meta = EndpointMeta::new("getFqdn", "router::rest", "/info/fqdn")
    ///     .method(Method::Get)
    ///     .summary("Local router host name")
    ///     .response("200", "FQDN of the local router", Some("text/plain"));
    ///
    /// assert_eq!(meta.operation_id, "getFqdn");
    /// assert_eq!(meta.method, Some(Method::Get));
    /// ```
    #[must_use]
    pub fn new(
        operation_id: impl Into<String>,
        module_path: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            operation_id: operation_id.into(),
            module_path: module_path.into(),
            method: None,
            path: path.into(),
            summary: None,
            description: None,
            tags: Vec::new(),
            deprecated: false,
            parameters: Vec::new(),
            request_body: None,
            responses: Vec::new(),
            extensions: IndexMap::new(),
        }
    }

    /// Set the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Set the summary.
    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a tag.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Mark the endpoint deprecated.
    #[must_use]
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Add a declared parameter.
    #[must_use]
    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Set the declared request body.
    #[must_use]
    pub fn request_body(mut self, body: RequestBody) -> Self {
        self.request_body = Some(body);
        self
    }

    /// Add a declared response.
    #[must_use]
    pub fn response(
        mut self,
        status: impl Into<String>,
        description: impl Into<String>,
        media_type: Option<&str>,
    ) -> Self {
        self.responses.push(ResponseMeta {
            status: status.into(),
            description: description.into(),
            media_type: media_type.map(str::to_string),
            schema: None,
        });
        self
    }

    /// Add a declared response carrying a body schema.
    #[must_use]
    pub fn response_with_schema(
        mut self,
        status: impl Into<String>,
        description: impl Into<String>,
        media_type: impl Into<String>,
        schema: Value,
    ) -> Self {
        self.responses.push(ResponseMeta {
            status: status.into(),
            description: description.into(),
            media_type: Some(media_type.into()),
            schema: Some(schema),
        });
        self
    }

    /// Add a vendor extension.
    #[must_use]
    pub fn extension(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extensions.insert(key.into(), value);
        self
    }
}
