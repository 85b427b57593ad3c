//! # Alexandria Server
//!
//! HTTP server for the Alexandria document pipeline.
//!
//! The server has two jobs, deliberately independent of each other:
//!
//! - **Serve the published document** at the configured path (default
//!   `/openapi`), negotiating YAML and JSON renderings. Requests never
//!   trigger a build; the last successfully published document is
//!   returned until a configuration change publishes a new one.
//! - **Route registered endpoints** to their handlers. An endpoint is
//!   served whether or not the published document mentions it: document
//!   authorship and request serving are separate concerns.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use alexandria_config::AlexandriaConfig;
//! use alexandria_model::{EndpointMeta, Method};
//! use alexandria_pipeline::{DocumentBuilder, DocumentPublisher};
//! use alexandria_server::{DocumentService, EndpointResponse, HandlerRegistry, Server};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), alexandria_server::ServerError> {
//! let config = AlexandriaConfig::default();
//! let endpoints = vec![
//!     EndpointMeta::new("getFqdn", "router::rest", "/info/fqdn").method(Method::Get),
//! ];
//!
//! // Build and publish the document once at activation time.
//! let publisher = Arc::new(DocumentPublisher::new());
//! let builder = DocumentBuilder::new(config.clone()).endpoints(endpoints.clone());
//! publisher.rebuild(&builder).ok();
//!
//! let mut handlers = HandlerRegistry::new();
//! handlers.register("getFqdn", |_m| async move {
//!     Ok(EndpointResponse::text("local.router.example"))
//! });
//!
//! let server = Server::builder()
//!     .http_addr("0.0.0.0:8080")
//!     .endpoints(&endpoints)
//!     .handlers(handlers)
//!     .document_service(DocumentService::new(publisher, &config.document))
//!     .build();
//!
//! server.run().await
//! # }
//! ```

mod config;
mod document;
mod error;
mod handler;
mod router;
mod server;
mod shutdown;

pub use config::{ServerConfig, ServerConfigBuilder, DEFAULT_HTTP_ADDR};
pub use document::DocumentService;
pub use error::{ServeError, ServerError};
pub use handler::{EndpointResponse, HandlerError, HandlerRegistry, InvokeError};
pub use router::{RouteMatch, Router};
pub use server::{BoundServer, HttpResponse, ResponseBody, Server, ServerBuilder};
pub use shutdown::{ConnectionTracker, ConnectionToken, ShutdownSignal};
