//! Configuration loading for the dev server.
//!
//! Configuration is loaded from a TOML file (default: `devproxy.toml`). Every
//! section and field is optional.

use crate::error::ConfigError;
use publisher_types::{RouteTable, DEV_BACKEND_ORIGIN, DEV_PREFIXES};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration for the dev server.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Listener and static files.
    #[serde(default)]
    pub server: ServerConfig,
    /// Backend forwarding.
    #[serde(default)]
    pub backend: BackendConfig,
}

/// Whether the routing table is consulted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServeMode {
    /// Forward API prefixes to the backend.
    #[default]
    Development,
    /// Serve everything locally; the backend is assumed same-origin.
    Production,
}

impl std::fmt::Display for ServeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServeMode::Development => f.write_str("development"),
            ServeMode::Production => f.write_str("production"),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (default: 127.0.0.1:5173).
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Frontend build directory (default: frontend/build).
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    /// Serve mode (default: development).
    #[serde(default)]
    pub mode: ServeMode,
}

/// Backend forwarding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Backend origin (default: http://localhost:8000).
    #[serde(default = "default_origin")]
    pub origin: String,
    /// Path prefixes forwarded to the backend.
    #[serde(default = "default_prefixes")]
    pub prefixes: Vec<String>,
    /// Largest request body forwarded, in bytes (default: 16MB).
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

// Default value functions
fn default_bind_address() -> String {
    "127.0.0.1:5173".to_string()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("frontend/build")
}

fn default_origin() -> String {
    DEV_BACKEND_ORIGIN.to_string()
}

fn default_prefixes() -> Vec<String> {
    DEV_PREFIXES.iter().map(|p| p.to_string()).collect()
}

fn default_max_body_bytes() -> usize {
    16 * 1024 * 1024 // 16MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            static_dir: default_static_dir(),
            mode: ServeMode::default(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            prefixes: default_prefixes(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Build the validated routing table from the backend section.
    pub fn route_table(&self) -> Result<RouteTable, ConfigError> {
        RouteTable::single_origin(&self.backend.prefixes, &self.backend.origin)
            .map_err(ConfigError::InvalidRoutes)
    }
}
