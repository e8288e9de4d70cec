//! Setting commands.

use anyhow::{bail, Result};
use std::path::Path;

use super::{open_bridge, parse_value, render};

/// Print a setting, or `null` if unknown.
pub async fn get(data_dir: &Path, key: &str) -> Result<()> {
    let bridge = open_bridge(data_dir).await?;
    let value = bridge.get_setting(key).await?.unwrap_or_default();
    println!("{}", render(&value));
    Ok(())
}

/// Store a setting.
pub async fn set(data_dir: &Path, key: &str, raw: &str) -> Result<()> {
    let bridge = open_bridge(data_dir).await?;
    if !bridge.save_setting(key, parse_value(raw)).await? {
        bail!("Failed to save setting {key}");
    }
    Ok(())
}
