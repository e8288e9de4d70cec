//! Interactive folder selection.

use anyhow::{Context, Result};
use publisher_bridge::{BridgeHandle, HostBridge, PromptPicker};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

use super::render;

/// Ask for a folder on stdin and print the absolute path, or `null` on cancel.
pub async fn run(data_dir: &Path) -> Result<()> {
    let host = HostBridge::open(data_dir)
        .await
        .with_context(|| format!("Failed to open settings in {}", data_dir.display()))?
        .with_picker(Arc::new(PromptPicker::stdio()));
    let bridge = BridgeHandle::new(host);

    let picked = bridge.select_folder().await?;
    println!("{}", render(&picked.map_or(Value::Null, Value::from)));
    Ok(())
}
