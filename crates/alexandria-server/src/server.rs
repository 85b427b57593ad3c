//! HTTP server implementation.
//!
//! Built on Hyper and Tokio. The server answers the document serve path
//! from the [`DocumentService`] and routes every other request to the
//! registered endpoint handlers. Serving the document never triggers a
//! build; it only reads the publisher's current artifact.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http::{Method, Request, Response, StatusCode};
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::document::DocumentService;
use crate::error::ServerError;
use crate::handler::{HandlerRegistry, InvokeError};
use crate::router::Router;
use crate::shutdown::{ConnectionTracker, ShutdownSignal};

/// Type alias for the HTTP response body.
pub type ResponseBody = Full<Bytes>;

/// Type alias for the HTTP response.
pub type HttpResponse = Response<ResponseBody>;

/// The Alexandria HTTP server.
///
/// # Example
///
/// ```rust,no_run
/// use alexandria_server::Server;
///
/// #[tokio::main]
/// async fn main() -> Result<(), alexandria_server::ServerError> {
///     let server = Server::builder()
///         .http_addr("0.0.0.0:8080")
///         .build();
///     server.run().await
/// }
/// ```
pub struct Server {
    config: ServerConfig,
    router: Router,
    handlers: HandlerRegistry,
    document: Option<DocumentService>,
}

impl Server {
    /// Creates a new server builder.
    #[must_use]
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// Returns a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns a mutable reference to the router.
    pub fn router_mut(&mut self) -> &mut Router {
        &mut self.router
    }

    /// Binds the configured address and returns a bound server ready to
    /// serve. Splitting bind from serve lets callers learn the actual
    /// local address when binding port 0.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Bind` if the address is invalid or cannot
    /// be bound.
    pub async fn bind(self) -> Result<BoundServer, ServerError> {
        let addr = self.config.socket_addr().map_err(|e| {
            ServerError::Bind(format!("invalid address '{}': {e}", self.config.http_addr()))
        })?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind(format!("failed to bind to {addr}: {e}")))?;

        let local_addr = listener.local_addr()?;
        tracing::info!(addr = %local_addr, "server listening");

        Ok(BoundServer {
            listener,
            local_addr,
            server: Arc::new(self),
        })
    }

    /// Runs the server until SIGINT or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns `ServerError` if the server cannot bind or an I/O error
    /// occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        let bound = self.bind().await?;
        bound.serve(ShutdownSignal::with_os_signals()).await
    }

    /// Dispatches one request to the document service or a handler.
    async fn dispatch(
        &self,
        method: &Method,
        path: &str,
        query: Option<&str>,
        accept: Option<&str>,
    ) -> HttpResponse {
        if let Some(document) = &self.document {
            if document.matches(path) {
                if method != Method::GET {
                    return error_response(
                        StatusCode::METHOD_NOT_ALLOWED,
                        "METHOD_NOT_ALLOWED",
                        "the document endpoint only answers GET",
                    );
                }
                return match document.resolve(accept, query) {
                    Ok((format, published)) => Response::builder()
                        .status(StatusCode::OK)
                        .header("Content-Type", format.media_type())
                        .body(Full::new(Bytes::from(published.body(format).to_string())))
                        .unwrap_or_else(|_| Response::new(Full::new(Bytes::new()))),
                    Err(e) => {
                        tracing::warn!(error = %e, "document request failed");
                        error_response(e.status_code(), "NO_DOCUMENT", &e.to_string())
                    }
                };
            }
        }

        let Some(matched) = self.router.match_route(method, path) else {
            return error_response(StatusCode::NOT_FOUND, "NOT_FOUND", path);
        };

        let invocation = tokio::time::timeout(
            self.config.request_timeout(),
            self.handlers.invoke(matched),
        )
        .await;

        match invocation {
            Ok(Ok(response)) => Response::builder()
                .status(response.status)
                .header("Content-Type", response.content_type)
                .body(Full::new(response.body))
                .unwrap_or_else(|_| Response::new(Full::new(Bytes::new()))),
            Ok(Err(InvokeError::NotFound(operation_id))) => {
                tracing::warn!(operation = %operation_id, "no handler registered");
                error_response(
                    StatusCode::NOT_IMPLEMENTED,
                    "HANDLER_NOT_IMPLEMENTED",
                    &operation_id,
                )
            }
            Ok(Err(InvokeError::Handler(e))) => {
                tracing::error!(error = %e, "handler failed");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "HANDLER_ERROR", &e.to_string())
            }
            Err(_) => {
                tracing::warn!(path = %path, "handler timed out");
                error_response(
                    StatusCode::GATEWAY_TIMEOUT,
                    "HANDLER_TIMEOUT",
                    "handler execution timed out",
                )
            }
        }
    }

    async fn handle_request(
        self: Arc<Self>,
        req: Request<Incoming>,
    ) -> Result<HttpResponse, Infallible> {
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        let query = req.uri().query().map(str::to_string);
        let accept = req
            .headers()
            .get(http::header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        tracing::debug!(method = %method, path = %path, "request");

        Ok(self
            .dispatch(&method, &path, query.as_deref(), accept.as_deref())
            .await)
    }
}

/// A server bound to its address, ready to serve.
pub struct BoundServer {
    listener: TcpListener,
    local_addr: SocketAddr,
    server: Arc<Server>,
}

impl BoundServer {
    /// The actual bound address.
    #[must_use]
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accepts connections until the shutdown signal fires, then waits
    /// for in-flight connections to drain (bounded by the configured
    /// shutdown timeout).
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Io` on accept failures that indicate the
    /// listener is unusable.
    pub async fn serve(self, shutdown: ShutdownSignal) -> Result<(), ServerError> {
        let tracker = ConnectionTracker::new();

        loop {
            tokio::select! {
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, remote_addr)) => {
                            let server = Arc::clone(&self.server);
                            let token = tracker.acquire();
                            let conn_shutdown = shutdown.clone();

                            tokio::spawn(async move {
                                let io = TokioIo::new(stream);
                                let service = service_fn(move |req| {
                                    Arc::clone(&server).handle_request(req)
                                });
                                let conn = http1::Builder::new().serve_connection(io, service);

                                tokio::select! {
                                    result = conn => {
                                        if let Err(e) = result {
                                            tracing::debug!(remote = %remote_addr, error = %e, "connection error");
                                        }
                                    }
                                    () = conn_shutdown.wait() => {
                                        tracing::debug!(remote = %remote_addr, "connection closed on shutdown");
                                    }
                                }
                                drop(token);
                            });
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "failed to accept connection");
                        }
                    }
                }

                () = shutdown.wait() => {
                    tracing::info!("shutdown signal received, stopping server");
                    break;
                }
            }
        }

        let timeout = self.server.config.shutdown_timeout();
        tracing::info!(
            active = tracker.active(),
            "waiting for in-flight connections to drain"
        );

        tokio::select! {
            () = tracker.drained() => {
                tracing::info!("all connections closed");
            }
            () = tokio::time::sleep(timeout) => {
                tracing::warn!(active = tracker.active(), "shutdown timeout reached");
            }
        }

        Ok(())
    }
}

/// Builder for configuring and creating a [`Server`].
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<ServerConfig>,
    http_addr: Option<String>,
    router: Router,
    handlers: Option<HandlerRegistry>,
    document: Option<DocumentService>,
}

impl ServerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the full server configuration.
    #[must_use]
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the HTTP bind address.
    #[must_use]
    pub fn http_addr(mut self, addr: impl Into<String>) -> Self {
        self.http_addr = Some(addr.into());
        self
    }

    /// Sets the handler registry.
    #[must_use]
    pub fn handlers(mut self, handlers: HandlerRegistry) -> Self {
        self.handlers = Some(handlers);
        self
    }

    /// Registers routes for the given endpoints.
    #[must_use]
    pub fn endpoints(mut self, endpoints: &[alexandria_model::EndpointMeta]) -> Self {
        self.router.register_endpoints(endpoints);
        self
    }

    /// Attaches the document service.
    #[must_use]
    pub fn document_service(mut self, document: DocumentService) -> Self {
        self.document = Some(document);
        self
    }

    /// Builds the server.
    #[must_use]
    pub fn build(self) -> Server {
        let config = match (self.config, self.http_addr) {
            (Some(config), _) => config,
            (None, Some(addr)) => ServerConfig::builder().http_addr(addr).build(),
            (None, None) => ServerConfig::default(),
        };

        Server {
            config,
            router: self.router,
            handlers: self.handlers.unwrap_or_default(),
            document: self.document,
        }
    }
}

/// Creates a standard JSON error response.
fn error_response(status: StatusCode, code: &str, message: &str) -> HttpResponse {
    let body = serde_json::json!({
        "error": {
            "code": code,
            "message": message,
        }
    });

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::new())))
}
