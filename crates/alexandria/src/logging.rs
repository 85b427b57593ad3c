//! Structured logging bootstrap.
//!
//! Thin wiring over the tracing-subscriber ecosystem: JSON output for
//! production, pretty output for development, level override via
//! `RUST_LOG`.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level used when `RUST_LOG` is not set.
    pub level: String,
    /// Whether to emit JSON-formatted records.
    pub json_format: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: true,
        }
    }
}

impl LogConfig {
    /// Human-readable output at debug level.
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            json_format: false,
        }
    }
}

/// Errors initializing the logging subsystem.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// A subscriber was already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Init(String),
}

/// Initializes the global tracing subscriber.
///
/// # Errors
///
/// Returns `LoggingError::Init` if a global subscriber is already set.
pub fn init_logging(config: &LogConfig) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    let result = if config.json_format {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()
    };

    result.map_err(|e| LoggingError::Init(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert!(config.json_format);
    }

    #[test]
    fn test_development_config() {
        let config = LogConfig::development();
        assert_eq!(config.level, "debug");
        assert!(!config.json_format);
    }

    #[test]
    fn test_double_init_errors() {
        // First init may succeed or fail depending on test ordering;
        // the second must fail either way.
        let _ = init_logging(&LogConfig::default());
        let result = init_logging(&LogConfig::default());
        assert!(matches!(result, Err(LoggingError::Init(_))));
    }
}
