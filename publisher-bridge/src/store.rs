//! On-disk settings document.
//!
//! All host persistence (settings and the session) lives in one JSON object at
//! `<data_dir>/config.json`. The file is created with
//! [`default_settings`] on first open; defaults missing from an existing file
//! are filled in memory. Writes replace the whole file through a temp file and
//! rename, and roll the in-memory copy back if the write fails.

use crate::error::StoreError;
use publisher_types::{default_settings, SettingsDocument};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// File name of the settings document inside the data directory.
pub const SETTINGS_FILE: &str = "config.json";

/// The settings document and where it lives.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    doc: SettingsDocument,
}

impl SettingsStore {
    /// Open (or create) the store in `data_dir`.
    ///
    /// An unreadable or non-object document is logged and replaced by the
    /// defaults in memory; the file itself is only rewritten on the next save.
    pub async fn open(data_dir: &Path) -> Result<Self, StoreError> {
        tokio::fs::create_dir_all(data_dir)
            .await
            .map_err(|e| StoreError::io(data_dir, e))?;

        let path = data_dir.join(SETTINGS_FILE);
        let content = match tokio::fs::read(&path).await {
            Ok(content) => Some(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        let Some(content) = content else {
            let doc = default_settings();
            write_atomic(&path, &doc).await?;
            tracing::info!("Created settings file at {}", path.display());
            return Ok(Self { path, doc });
        };

        let doc = match serde_json::from_slice::<Value>(&content) {
            Ok(Value::Object(mut doc)) => {
                for (key, value) in default_settings() {
                    doc.entry(key).or_insert(value);
                }
                doc
            }
            Ok(_) => {
                tracing::error!(
                    "Failed to load settings from {}: not a JSON object",
                    path.display()
                );
                default_settings()
            }
            Err(e) => {
                tracing::error!("Failed to load settings from {}: {}", path.display(), e);
                default_settings()
            }
        };

        Ok(Self { path, doc })
    }

    /// Path of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current value of `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.doc.get(key)
    }

    /// The whole document.
    pub fn document(&self) -> &SettingsDocument {
        &self.doc
    }

    /// Set `key` and persist the document.
    ///
    /// On failure the in-memory document is left as it was before the call.
    pub async fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        let previous = self.doc.insert(key.to_string(), value);
        if let Err(e) = write_atomic(&self.path, &self.doc).await {
            match previous {
                Some(old) => self.doc.insert(key.to_string(), old),
                None => self.doc.remove(key),
            };
            return Err(e);
        }
        tracing::debug!("Saved setting {}", key);
        Ok(())
    }
}

/// Write the document to a sibling temp file, then rename over `path`.
async fn write_atomic(path: &Path, doc: &SettingsDocument) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec_pretty(doc)?;
    let tmp = path.with_extension("json.tmp");

    if let Err(e) = write_private(&tmp, &bytes).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(StoreError::io(&tmp, e));
    }

    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(StoreError::io(path, e));
    }
    Ok(())
}

/// Session tokens live in this file; it is created readable by the owner only.
async fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    // A leftover temp file keeps its old mode.
    set_file_permissions_0600(&file).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

#[cfg(unix)]
async fn set_file_permissions_0600(file: &tokio::fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(0o600)).await
}

#[cfg(not(unix))]
async fn set_file_permissions_0600(_file: &tokio::fs::File) -> std::io::Result<()> {
    Ok(())
}
