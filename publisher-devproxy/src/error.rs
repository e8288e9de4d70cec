//! Error types for the dev server.

use publisher_types::RouteError;
use std::path::PathBuf;

/// Main error type for dev server operations.
#[derive(Debug, thiserror::Error)]
pub enum DevProxyError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Could not bind the listener.
    #[error("failed to bind {address}: {source}")]
    Bind {
        /// Address we tried to bind.
        address: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Upstream HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// I/O error while serving.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: toml::de::Error,
    },
    /// Backend prefixes or origin are invalid.
    #[error("invalid backend routes: {0}")]
    InvalidRoutes(#[source] RouteError),
}

/// Result type alias for dev server operations.
pub type Result<T> = std::result::Result<T, DevProxyError>;
