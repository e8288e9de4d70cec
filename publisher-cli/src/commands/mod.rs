//! CLI command implementations.

pub mod call;
pub mod dev;
pub mod pick_folder;
pub mod session;
pub mod setting;
pub mod status;

use anyhow::{Context, Result};
use publisher_bridge::{BridgeHandle, HostBridge};
use serde_json::Value;
use std::path::Path;

/// Open the host bridge on `data_dir`.
pub async fn open_bridge(data_dir: &Path) -> Result<BridgeHandle> {
    let host = HostBridge::open(data_dir)
        .await
        .with_context(|| format!("Failed to open settings in {}", data_dir.display()))?;
    Ok(BridgeHandle::new(host))
}

/// Parse a command-line value as JSON, falling back to a plain string.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Render a value the way the frontend would receive it.
pub fn render(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_value_accepts_json() {
        assert_eq!(parse_value("42"), json!(42));
        assert_eq!(parse_value(r#"{"a": [1]}"#), json!({"a": [1]}));
        assert_eq!(parse_value(r#""quoted""#), json!("quoted"));
        assert_eq!(parse_value("null"), Value::Null);
    }

    #[test]
    fn parse_value_falls_back_to_string() {
        assert_eq!(parse_value("Lighting"), json!("Lighting"));
        assert_eq!(parse_value("{broken"), json!("{broken"));
    }

    #[test]
    fn render_null() {
        assert_eq!(render(&Value::Null), "null");
    }
}
