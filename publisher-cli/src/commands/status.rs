//! Show host status.

use anyhow::{Context, Result};
use publisher_bridge::HostBridge;
use std::path::{Path, PathBuf};

use super::dev::{load_config, Overrides};

/// Run the status command.
///
/// Routes come from the same config `dev` would load.
pub async fn run(data_dir: &Path, config: Option<PathBuf>) -> Result<()> {
    let config = load_config(&Overrides {
        config,
        ..Overrides::default()
    })?;
    let routes = config
        .route_table()
        .context("Invalid dev server configuration")?;

    println!("=== publisher-cli status ===");
    println!();

    let host = HostBridge::open(data_dir).await?;
    println!("Data:");
    println!("  Dir:      {}", data_dir.display());
    println!("  Settings: {}", host.settings_path().await.display());
    println!();

    match host.session_record().await {
        Some(record) => {
            println!("Session:");
            println!("  Host: {}", display_host(&record.host));
        }
        None => {
            println!("Session: NONE");
        }
    }
    println!();

    println!("Dev routes ({}):", config.server.mode);
    for rule in routes.rules() {
        println!("  {:<10} -> {}", rule.prefix(), rule.target());
    }

    Ok(())
}

fn display_host(host: &str) -> &str {
    if host.is_empty() {
        "(unknown)"
    } else {
        host
    }
}
