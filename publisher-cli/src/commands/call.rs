//! Raw bridge invocation, the way the webview calls into the host.

use anyhow::Result;
use publisher_bridge::invoke;
use serde_json::Value;
use std::path::Path;

use super::{open_bridge, render};

/// Invoke `operation` with each argument parsed as JSON and print the result.
///
/// Arguments must be strict JSON here; strings need quotes.
pub async fn run(data_dir: &Path, operation: &str, args: &[String]) -> Result<()> {
    let args = parse_args(args)?;
    let bridge = open_bridge(data_dir).await?;
    let result = invoke(&*bridge, operation, args).await?;
    println!("{}", render(&result));
    Ok(())
}

fn parse_args(raw: &[String]) -> Result<Vec<Value>> {
    raw.iter()
        .enumerate()
        .map(|(i, arg)| {
            serde_json::from_str(arg)
                .map_err(|e| anyhow::anyhow!("argument {} is not valid JSON: {}", i + 1, e))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn args_are_strict_json() {
        let args = vec![r#""key""#.to_string(), "[1,2]".to_string()];
        assert_eq!(parse_args(&args).unwrap(), vec![json!("key"), json!([1, 2])]);

        let err = parse_args(&["bare".to_string()]).unwrap_err();
        assert!(err.to_string().starts_with("argument 1 is not valid JSON"));
    }

    #[tokio::test]
    async fn unknown_operation_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(dir.path(), "format_disk", &[]).await.unwrap_err();
        assert_eq!(err.to_string(), "unknown bridge operation: format_disk");
    }
}
