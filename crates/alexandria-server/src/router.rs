//! Request routing for registered endpoints.
//!
//! Maps an incoming method and path to the operation id of a registered
//! endpoint, extracting path parameters from templates like
//! `/districts/{code}`. Routes are registered from the same endpoint
//! metadata the annotation scanner consumes, so serving an endpoint is
//! independent of whether the published document mentions it.
//!
//! # Example
//!
//! ```rust
//! use alexandria_server::Router;
//! use http::Method;
//!
//! let mut router = Router::new();
//! router.add_route(Method::GET, "/districts/{code}", "getDistrict");
//!
//! let matched = router.match_route(&Method::GET, "/districts/north").unwrap();
//! assert_eq!(matched.operation_id(), "getDistrict");
//! assert_eq!(matched.param("code"), Some("north"));
//! ```

use std::collections::HashMap;

use http::Method;

use alexandria_model::EndpointMeta;

/// A matched route with extracted path parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    operation_id: String,
    params: HashMap<String, String>,
}

impl RouteMatch {
    /// The operation id of the matched endpoint.
    #[must_use]
    pub fn operation_id(&self) -> &str {
        &self.operation_id
    }

    /// An extracted path parameter by name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// All extracted path parameters.
    #[must_use]
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

#[derive(Debug)]
struct Route {
    method: Method,
    segments: Vec<Segment>,
    operation_id: String,
}

/// Routes incoming requests to registered operation ids.
#[derive(Debug, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Creates an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a route for the given method and path template.
    pub fn add_route(
        &mut self,
        method: Method,
        template: &str,
        operation_id: impl Into<String>,
    ) {
        let segments = template
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.strip_prefix('{')
                    .and_then(|s| s.strip_suffix('}'))
                    .map_or_else(|| Segment::Literal(s.to_string()), |name| {
                        Segment::Param(name.to_string())
                    })
            })
            .collect();

        self.routes.push(Route {
            method,
            segments,
            operation_id: operation_id.into(),
        });
    }

    /// Registers routes for every endpoint that carries a method mapping.
    pub fn register_endpoints(&mut self, endpoints: &[EndpointMeta]) {
        for endpoint in endpoints {
            let Some(method) = endpoint.method else {
                continue;
            };
            let Ok(method) = method.as_str().to_ascii_uppercase().parse::<Method>() else {
                continue;
            };
            self.add_route(method, &endpoint.path, endpoint.operation_id.clone());
        }
    }

    /// Whether any route targets the given operation id.
    #[must_use]
    pub fn has_operation(&self, operation_id: &str) -> bool {
        self.routes.iter().any(|r| r.operation_id == operation_id)
    }

    /// Matches a method and concrete path against registered routes.
    #[must_use]
    pub fn match_route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        let parts: Vec<&str> = path
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        self.routes
            .iter()
            .filter(|route| route.method == *method)
            .find_map(|route| {
                if route.segments.len() != parts.len() {
                    return None;
                }

                let mut params = HashMap::new();
                for (segment, part) in route.segments.iter().zip(&parts) {
                    match segment {
                        Segment::Literal(literal) if literal == part => {}
                        Segment::Param(name) => {
                            params.insert(name.clone(), (*part).to_string());
                        }
                        Segment::Literal(_) => return None,
                    }
                }

                Some(RouteMatch {
                    operation_id: route.operation_id.clone(),
                    params,
                })
            })
    }
}
