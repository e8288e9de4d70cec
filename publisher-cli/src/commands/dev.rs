//! Dev server command.

use anyhow::{Context, Result};
use publisher_devproxy::{Config, DevServer, ServeMode};
use std::path::{Path, PathBuf};

/// Command-line overrides applied on top of the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    /// Config file; `devproxy.toml` is used when present.
    pub config: Option<PathBuf>,
    /// Bind address.
    pub bind: Option<String>,
    /// Frontend build directory.
    pub static_dir: Option<PathBuf>,
    /// Force production mode.
    pub production: bool,
}

const DEFAULT_CONFIG_FILE: &str = "devproxy.toml";

/// Run the dev server until interrupted.
pub async fn run(overrides: Overrides) -> Result<()> {
    let config = load_config(&overrides)?;
    let server = DevServer::new(config).context("Invalid dev server configuration")?;
    server.run().await.context("Dev server failed")
}

/// Load the config file (explicit, else `devproxy.toml` when present, else
/// defaults) and apply the overrides.
pub(crate) fn load_config(overrides: &Overrides) -> Result<Config> {
    let mut config = match &overrides.config {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            Config::from_file(path)?
        }
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            tracing::info!("Loading config from {}", DEFAULT_CONFIG_FILE);
            Config::from_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => {
            tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
            Config::default()
        }
    };

    if let Some(bind) = &overrides.bind {
        config.server.bind_address = bind.clone();
    }
    if let Some(dir) = &overrides.static_dir {
        config.server.static_dir = dir.clone();
    }
    if overrides.production {
        config.server.mode = ServeMode::Production;
    }
    Ok(config)
}
