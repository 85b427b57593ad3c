//! API description document tree.
//!
//! This module provides the in-memory representation of an assembled API
//! description document: an info block, a keyed map of path templates to
//! path items, per-method operations and their vendor-extension maps.
//!
//! Path keys are unique per document and method keys are unique per path
//! item by construction (both are keyed maps / typed slots). Insertion
//! order is preserved so serialized output is stable across rebuilds.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ModelResult;
use crate::format::DocumentFormat;

/// Description-format version written into freshly created documents.
pub const DEFAULT_SPEC_VERSION: &str = "3.0.3";

/// Root of an API description document.
///
/// Produced either by parsing a static source, by scanning registered
/// endpoints, or synthesized by a hook. Once published it is treated as
/// immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Description-format version (e.g. "3.0.3").
    pub openapi: String,
    /// API metadata.
    pub info: Info,
    /// Available servers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<ServerEntry>,
    /// Path template to path-item mapping. Keys are unique.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub paths: IndexMap<String, PathItem>,
    /// Reusable components (schemas, responses, parameters).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
    /// Tags for grouping operations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    /// Root-level vendor extensions and any other open-ended keys.
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Info::default())
    }
}

impl Document {
    /// Create an empty document with the given info block.
    #[must_use]
    pub fn new(info: Info) -> Self {
        Self {
            openapi: DEFAULT_SPEC_VERSION.to_string(),
            info,
            servers: Vec::new(),
            paths: IndexMap::new(),
            components: None,
            tags: Vec::new(),
            extensions: IndexMap::new(),
        }
    }

    /// Parse a document from a string in the given format.
    pub fn parse(format: DocumentFormat, input: &str) -> ModelResult<Self> {
        format.parse(input)
    }

    /// Render the document as a string in the given format.
    pub fn render(&self, format: DocumentFormat) -> ModelResult<String> {
        format.render(self)
    }

    /// Look up a path item by its template key.
    #[must_use]
    pub fn path_item(&self, path: &str) -> Option<&PathItem> {
        self.paths.get(path)
    }

    /// Look up an operation by path template and method.
    #[must_use]
    pub fn operation(&self, path: &str, method: Method) -> Option<&Operation> {
        self.paths.get(path).and_then(|item| item.operation(method))
    }
}

/// API metadata block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// API title.
    pub title: String,
    /// API version.
    pub version: String,
    /// API description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Terms of service URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "termsOfService")]
    pub terms_of_service: Option<String>,
    /// Contact information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    /// License information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            title: "Generated API".to_string(),
            version: "1.0".to_string(),
            description: None,
            terms_of_service: None,
            contact: None,
            license: None,
        }
    }
}

/// Contact information.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Contact {
    /// Contact name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// License information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    /// License name.
    pub name: String,
    /// License URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Server entry in the document's server list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerEntry {
    /// Server URL.
    pub url: String,
    /// Server description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// HTTP method slot within a path item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// GET
    Get,
    /// PUT
    Put,
    /// POST
    Post,
    /// DELETE
    Delete,
    /// OPTIONS
    Options,
    /// HEAD
    Head,
    /// PATCH
    Patch,
    /// TRACE
    Trace,
}

impl Method {
    /// All method slots, in the order they serialize within a path item.
    pub const ALL: [Method; 8] = [
        Method::Get,
        Method::Put,
        Method::Post,
        Method::Delete,
        Method::Options,
        Method::Head,
        Method::Patch,
        Method::Trace,
    ];

    /// Lower-case wire name of the method key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Put => "put",
            Method::Post => "post",
            Method::Delete => "delete",
            Method::Options => "options",
            Method::Head => "head",
            Method::Patch => "patch",
            Method::Trace => "trace",
        }
    }

    /// Parse a method name, case-insensitively.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "GET" => Some(Method::Get),
            "PUT" => Some(Method::Put),
            "POST" => Some(Method::Post),
            "DELETE" => Some(Method::Delete),
            "OPTIONS" => Some(Method::Options),
            "HEAD" => Some(Method::Head),
            "PATCH" => Some(Method::Patch),
            "TRACE" => Some(Method::Trace),
            _ => None,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A path item holding the operations documented for a single path template.
///
/// Method keys are unique per path item: each method has exactly one typed
/// slot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathItem {
    /// Reference to a path item defined elsewhere. A referenced path item
    /// carries no inline operations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    /// Summary for all operations on this path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Description for all operations on this path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// GET operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// PUT operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    /// POST operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    /// DELETE operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    /// OPTIONS operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    /// HEAD operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    /// PATCH operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    /// TRACE operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation>,
    /// Parameters common to all operations on this path.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
}

impl PathItem {
    /// Return the operation in the given method slot, if any.
    #[must_use]
    pub fn operation(&self, method: Method) -> Option<&Operation> {
        match method {
            Method::Get => self.get.as_ref(),
            Method::Put => self.put.as_ref(),
            Method::Post => self.post.as_ref(),
            Method::Delete => self.delete.as_ref(),
            Method::Options => self.options.as_ref(),
            Method::Head => self.head.as_ref(),
            Method::Patch => self.patch.as_ref(),
            Method::Trace => self.trace.as_ref(),
        }
    }

    /// Return a mutable reference to the operation in the given slot.
    pub fn operation_mut(&mut self, method: Method) -> Option<&mut Operation> {
        match method {
            Method::Get => self.get.as_mut(),
            Method::Put => self.put.as_mut(),
            Method::Post => self.post.as_mut(),
            Method::Delete => self.delete.as_mut(),
            Method::Options => self.options.as_mut(),
            Method::Head => self.head.as_mut(),
            Method::Patch => self.patch.as_mut(),
            Method::Trace => self.trace.as_mut(),
        }
    }

    /// Place an operation into the given method slot, replacing any
    /// previous occupant.
    pub fn set_operation(&mut self, method: Method, operation: Operation) {
        let slot = match method {
            Method::Get => &mut self.get,
            Method::Put => &mut self.put,
            Method::Post => &mut self.post,
            Method::Delete => &mut self.delete,
            Method::Options => &mut self.options,
            Method::Head => &mut self.head,
            Method::Patch => &mut self.patch,
            Method::Trace => &mut self.trace,
        };
        *slot = Some(operation);
    }

    /// Iterate over the occupied method slots.
    pub fn operations(&self) -> impl Iterator<Item = (Method, &Operation)> {
        Method::ALL
            .into_iter()
            .filter_map(|m| self.operation(m).map(|op| (m, op)))
    }

    /// Whether this path item documents no operations and carries no
    /// reference.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reference.is_none() && self.operations().next().is_none()
    }
}

/// A documented endpoint operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Operation {
    /// Unique operation identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,
    /// Short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Full description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tags for grouping.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Whether deprecated.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    /// Parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    /// Request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "requestBody")]
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, ResponseObject>,
    /// Operation-level vendor extensions (`x-*` keys).
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

impl Operation {
    /// Look up a vendor-extension value by key.
    #[must_use]
    pub fn extension(&self, key: &str) -> Option<&Value> {
        self.extensions.get(key)
    }

    /// Set a vendor-extension value, replacing any previous one.
    pub fn set_extension(&mut self, key: impl Into<String>, value: Value) {
        self.extensions.insert(key.into(), value);
    }
}

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterIn {
    /// Query string parameter.
    Query,
    /// URL path parameter.
    Path,
    /// HTTP header.
    Header,
    /// Cookie.
    Cookie,
}

/// An operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: ParameterIn,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether required.
    #[serde(default)]
    pub required: bool,
    /// Parameter schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

impl Parameter {
    /// Create a required path parameter with a string schema.
    #[must_use]
    pub fn path(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: ParameterIn::Path,
            description: None,
            required: true,
            schema: Some(serde_json::json!({ "type": "string" })),
        }
    }

    /// Create an optional query parameter.
    #[must_use]
    pub fn query(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: ParameterIn::Query,
            description: None,
            required: false,
            schema: None,
        }
    }
}

/// Request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether required.
    #[serde(default)]
    pub required: bool,
    /// Content keyed by media type.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
}

/// Media type content.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaType {
    /// Schema for this media type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    /// Example value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

/// Response definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseObject {
    /// Description (required by the description format).
    pub description: String,
    /// Response content keyed by media type.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
}

impl ResponseObject {
    /// Create a response with a description and no content.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            content: IndexMap::new(),
        }
    }

    /// Attach an empty media-type entry for the given content type.
    #[must_use]
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.content.insert(media_type.into(), MediaType::default());
        self
    }
}

/// Reusable components.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Components {
    /// Reusable schemas.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, Value>,
    /// Reusable responses.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, ResponseObject>,
    /// Reusable parameters.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, Parameter>,
    /// Other component kinds (security schemes, headers) kept verbatim.
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

/// API tag for grouping operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name.
    pub name: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
