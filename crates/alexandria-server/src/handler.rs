//! Endpoint handler registration and invocation.
//!
//! Handlers are async functions keyed by operation id. They receive the
//! matched route (with extracted path parameters) and produce an
//! [`EndpointResponse`] carrying status, content type and body, so an
//! endpoint can answer with whatever media type it declares.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::router::RouteMatch;

/// A handler's response.
#[derive(Debug, Clone)]
pub struct EndpointResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Content type of the body.
    pub content_type: String,
    /// Response body.
    pub body: Bytes,
}

impl EndpointResponse {
    /// A 200 response with a JSON body.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, HandlerError> {
        let body = serde_json::to_vec(value)?;
        Ok(Self {
            status: StatusCode::OK,
            content_type: "application/json".to_string(),
            body: Bytes::from(body),
        })
    }

    /// A 200 response with a plain text body.
    #[must_use]
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: "text/plain;charset=UTF-8".to_string(),
            body: Bytes::from(body.into()),
        }
    }

    /// Override the status code.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

/// Errors a handler can produce.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Failed to serialize the response body.
    #[error("failed to serialize response: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Handler-internal failure.
    #[error("handler failed: {0}")]
    Internal(String),
}

/// Errors during handler invocation.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// No handler registered for the operation.
    #[error("no handler registered for operation: {0}")]
    NotFound(String),

    /// The handler ran and failed.
    #[error(transparent)]
    Handler(#[from] HandlerError),
}

type BoxedHandler = Arc<
    dyn Fn(RouteMatch) -> Pin<Box<dyn Future<Output = Result<EndpointResponse, HandlerError>> + Send>>
        + Send
        + Sync,
>;

/// Registry mapping operation ids to handlers.
///
/// # Example
///
/// ```rust
/// use alexandria_server::{EndpointResponse, HandlerRegistry};
///
/// let mut registry = HandlerRegistry::new();
/// registry.register("getFqdn", |_matched| async move {
///     Ok(EndpointResponse::text("local.router.example"))
/// });
///
/// assert!(registry.contains("getFqdn"));
/// ```
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, BoxedHandler>,
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("operations", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl HandlerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for an operation id.
    pub fn register<F, Fut>(&mut self, operation_id: impl Into<String>, handler: F)
    where
        F: Fn(RouteMatch) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<EndpointResponse, HandlerError>> + Send + 'static,
    {
        self.handlers.insert(
            operation_id.into(),
            Arc::new(move |matched| {
                let fut: Pin<
                    Box<dyn Future<Output = Result<EndpointResponse, HandlerError>> + Send>,
                > = Box::pin(handler(matched));
                fut
            }),
        );
    }

    /// Whether a handler is registered for the operation id.
    #[must_use]
    pub fn contains(&self, operation_id: &str) -> bool {
        self.handlers.contains_key(operation_id)
    }

    /// Invokes the handler for the matched route.
    ///
    /// # Errors
    ///
    /// Returns `InvokeError::NotFound` when no handler is registered and
    /// `InvokeError::Handler` when the handler fails.
    pub async fn invoke(&self, matched: RouteMatch) -> Result<EndpointResponse, InvokeError> {
        let handler = self
            .handlers
            .get(matched.operation_id())
            .ok_or_else(|| InvokeError::NotFound(matched.operation_id().to_string()))?;

        Ok(handler(matched).await?)
    }
}
