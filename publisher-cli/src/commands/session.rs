//! Session commands.

use anyhow::{bail, Result};
use std::path::Path;

use super::{open_bridge, parse_value, render};

/// Print the stored tokens, or `null`.
pub async fn show(data_dir: &Path) -> Result<()> {
    let bridge = open_bridge(data_dir).await?;
    let tokens = bridge.get_session().await?.unwrap_or_default();
    println!("{}", render(&tokens));
    Ok(())
}

/// Store `tokens` for `host`, replacing any previous session.
pub async fn save(data_dir: &Path, host: &str, tokens: &str) -> Result<()> {
    let bridge = open_bridge(data_dir).await?;
    if !bridge.save_session(parse_value(tokens), host).await? {
        bail!("Failed to save session");
    }
    println!("Session saved for {host}");
    Ok(())
}

/// Drop the stored session.
pub async fn clear(data_dir: &Path) -> Result<()> {
    let bridge = open_bridge(data_dir).await?;
    if !bridge.clear_session().await? {
        bail!("Failed to clear session");
    }
    println!("Session cleared");
    Ok(())
}
