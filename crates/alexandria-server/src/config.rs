//! Server configuration types.
//!
//! # Example
//!
//! ```rust
//! use alexandria_server::ServerConfig;
//! use std::time::Duration;
//!
//! let config = ServerConfig::builder()
//!     .http_addr("0.0.0.0:8080")
//!     .shutdown_timeout(Duration::from_secs(30))
//!     .build();
//!
//! assert_eq!(config.http_addr(), "0.0.0.0:8080");
//! ```

use std::net::SocketAddr;
use std::time::Duration;

/// Default HTTP bind address.
pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:8080";

/// Default shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    http_addr: String,
    shutdown_timeout: Duration,
    request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
            shutdown_timeout: Duration::from_secs(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ServerConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// The configured bind address string.
    #[must_use]
    pub fn http_addr(&self) -> &str {
        &self.http_addr
    }

    /// Parses the bind address into a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.http_addr.parse()
    }

    /// How long to wait for in-flight connections on shutdown.
    #[must_use]
    pub fn shutdown_timeout(&self) -> Duration {
        self.shutdown_timeout
    }

    /// Per-request handler timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

/// Builder for [`ServerConfig`].
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    http_addr: Option<String>,
    shutdown_timeout: Option<Duration>,
    request_timeout: Option<Duration>,
}

impl ServerConfigBuilder {
    /// Sets the HTTP bind address.
    #[must_use]
    pub fn http_addr(mut self, addr: impl Into<String>) -> Self {
        self.http_addr = Some(addr.into());
        self
    }

    /// Sets the graceful shutdown timeout.
    #[must_use]
    pub fn shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = Some(timeout);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> ServerConfig {
        let defaults = ServerConfig::default();
        ServerConfig {
            http_addr: self.http_addr.unwrap_or(defaults.http_addr),
            shutdown_timeout: self.shutdown_timeout.unwrap_or(defaults.shutdown_timeout),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
        }
    }
}
