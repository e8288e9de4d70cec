//! HostBridge: the desktop host's implementation of [`NativeBridge`].
//!
//! Persistence goes through one [`SettingsStore`] behind a mutex, so every
//! operation's read-modify-write is atomic with respect to other calls. The
//! folder dialog runs outside that lock.

use crate::api::NativeBridge;
use crate::error::{BridgeError, StoreError};
use crate::picker::FolderPicker;
use crate::store::SettingsStore;
use async_trait::async_trait;
use publisher_types::{is_reserved_key, SessionRecord, LAST_DIRECTORY_KEY, SESSION_KEY};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Desktop host bridge backed by the on-disk settings document.
pub struct HostBridge {
    store: Mutex<SettingsStore>,
    picker: RwLock<Option<Arc<dyn FolderPicker>>>,
}

impl std::fmt::Debug for HostBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostBridge")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl HostBridge {
    /// Create a bridge around an opened store, without a folder picker.
    pub fn new(store: SettingsStore) -> Self {
        Self {
            store: Mutex::new(store),
            picker: RwLock::new(None),
        }
    }

    /// Open the store in `data_dir` and wrap it.
    pub async fn open(data_dir: &Path) -> Result<Self, StoreError> {
        Ok(Self::new(SettingsStore::open(data_dir).await?))
    }

    /// Builder form of [`attach_picker`](Self::attach_picker).
    pub fn with_picker(self, picker: Arc<dyn FolderPicker>) -> Self {
        Self {
            picker: RwLock::new(Some(picker)),
            ..self
        }
    }

    /// Attach the folder dialog once the host window exists.
    ///
    /// Until then `select_folder` reports a cancel.
    pub async fn attach_picker(&self, picker: Arc<dyn FolderPicker>) {
        *self.picker.write().await = Some(picker);
    }

    /// The full stored session, including its host.
    pub async fn session_record(&self) -> Option<SessionRecord> {
        let store = self.store.lock().await;
        stored_session(&store)
    }

    /// Path of the settings file.
    pub async fn settings_path(&self) -> PathBuf {
        self.store.lock().await.path().to_path_buf()
    }

    /// Set `key` and report success as a flag.
    async fn persist(&self, key: &str, value: Value) -> bool {
        let mut store = self.store.lock().await;
        match store.set(key, value).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to persist {}: {}", key, e);
                false
            }
        }
    }
}

#[async_trait]
impl NativeBridge for HostBridge {
    async fn select_folder(&self) -> Result<Option<String>, BridgeError> {
        let Some(picker) = self.picker.read().await.clone() else {
            tracing::debug!("select_folder called before a picker was attached");
            return Ok(None);
        };

        let start_dir = {
            let store = self.store.lock().await;
            store
                .get(LAST_DIRECTORY_KEY)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
        };

        let picked = picker
            .pick_folder(start_dir.as_deref())
            .await
            .map_err(|e| BridgeError::Host(e.to_string()))?;

        let Some(path) = picked.filter(|p| !p.as_os_str().is_empty()) else {
            tracing::debug!("Folder selection canceled");
            return Ok(None);
        };

        let absolute = if path.is_absolute() {
            path
        } else {
            std::env::current_dir()
                .map_err(|e| BridgeError::Host(e.to_string()))?
                .join(path)
        };
        let selected = absolute.to_string_lossy().into_owned();

        // Best-effort: losing the remembered start directory is not a failure.
        self.persist(LAST_DIRECTORY_KEY, Value::from(selected.clone()))
            .await;

        tracing::info!("Folder selected: {}", selected);
        Ok(Some(selected))
    }

    async fn save_session(&self, tokens: Value, host: &str) -> Result<bool, BridgeError> {
        let record = SessionRecord::new(tokens, host);
        let saved = self.persist(SESSION_KEY, record.to_stored()).await;
        if saved {
            tracing::info!("Session saved for {}", host);
        }
        Ok(saved)
    }

    async fn get_session(&self) -> Result<Option<Value>, BridgeError> {
        let store = self.store.lock().await;
        Ok(stored_session(&store).map(|record| record.tokens))
    }

    async fn clear_session(&self) -> Result<bool, BridgeError> {
        let cleared = self.persist(SESSION_KEY, Value::Null).await;
        if cleared {
            tracing::info!("Session cleared");
        }
        Ok(cleared)
    }

    async fn save_setting(&self, key: &str, value: Value) -> Result<bool, BridgeError> {
        if is_reserved_key(key) {
            tracing::warn!("Refusing to write reserved key {} as a setting", key);
            return Ok(false);
        }
        Ok(self.persist(key, value).await)
    }

    async fn get_setting(&self, key: &str) -> Result<Option<Value>, BridgeError> {
        let store = self.store.lock().await;
        Ok(store.get(key).cloned())
    }
}

fn stored_session(store: &SettingsStore) -> Option<SessionRecord> {
    let value = store.get(SESSION_KEY)?;
    if value.is_null() {
        return None;
    }
    let record = SessionRecord::from_stored(value);
    if record.is_none() {
        tracing::warn!("Ignoring malformed stored session");
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::PickerError;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;

    /// Picker returning scripted answers and recording the start directories.
    #[derive(Default)]
    struct ScriptedPicker {
        answers: StdMutex<VecDeque<Result<Option<PathBuf>, PickerError>>>,
        starts: StdMutex<Vec<Option<PathBuf>>>,
    }

    impl ScriptedPicker {
        fn answering(answers: Vec<Result<Option<PathBuf>, PickerError>>) -> Arc<Self> {
            Arc::new(Self {
                answers: StdMutex::new(answers.into()),
                starts: StdMutex::default(),
            })
        }
    }

    #[async_trait]
    impl FolderPicker for ScriptedPicker {
        async fn pick_folder(
            &self,
            start_dir: Option<&Path>,
        ) -> Result<Option<PathBuf>, PickerError> {
            self.starts
                .lock()
                .unwrap()
                .push(start_dir.map(Path::to_path_buf));
            self.answers.lock().unwrap().pop_front().unwrap_or(Ok(None))
        }
    }

    async fn open_bridge() -> (tempfile::TempDir, HostBridge) {
        let dir = tempfile::tempdir().unwrap();
        let bridge = HostBridge::open(dir.path()).await.unwrap();
        (dir, bridge)
    }

    #[tokio::test]
    async fn setting_roundtrip() {
        let (_dir, bridge) = open_bridge().await;
        let value = json!({"columns": ["shot", "task"], "width": 320});

        assert!(bridge.save_setting("table_layout", value.clone()).await.unwrap());
        assert_eq!(bridge.get_setting("table_layout").await.unwrap(), Some(value));
    }

    #[tokio::test]
    async fn setting_overwrite_keeps_latest() {
        let (_dir, bridge) = open_bridge().await;
        bridge.save_setting("k", json!(1)).await.unwrap();
        bridge.save_setting("k", json!("two")).await.unwrap();
        assert_eq!(bridge.get_setting("k").await.unwrap(), Some(json!("two")));
    }

    #[tokio::test]
    async fn unknown_setting_is_absent() {
        let (_dir, bridge) = open_bridge().await;
        assert_eq!(bridge.get_setting("never_written").await.unwrap(), None);
    }

    #[tokio::test]
    async fn default_settings_are_readable() {
        let (_dir, bridge) = open_bridge().await;
        assert_eq!(
            bridge.get_setting("default_task_name").await.unwrap(),
            Some(json!("Compositing"))
        );
    }

    #[tokio::test]
    async fn session_roundtrip_and_replace() {
        let (_dir, bridge) = open_bridge().await;
        let first = json!({"access_token": "a1", "refresh_token": "r1"});
        let second = json!({"access_token": "a2"});

        assert!(bridge.save_session(first.clone(), "http://kitsu-a/api").await.unwrap());
        assert_eq!(bridge.get_session().await.unwrap(), Some(first));

        assert!(bridge.save_session(second.clone(), "http://kitsu-b/api").await.unwrap());
        assert_eq!(bridge.get_session().await.unwrap(), Some(second.clone()));
        assert_eq!(
            bridge.session_record().await,
            Some(SessionRecord::new(second, "http://kitsu-b/api"))
        );
    }

    #[tokio::test]
    async fn clear_session_then_absent() {
        let (_dir, bridge) = open_bridge().await;
        assert_eq!(bridge.get_session().await.unwrap(), None);

        bridge.save_session(json!("tok"), "h").await.unwrap();
        assert!(bridge.clear_session().await.unwrap());
        assert_eq!(bridge.get_session().await.unwrap(), None);
        assert_eq!(bridge.session_record().await, None);

        // Clearing twice is still a success.
        assert!(bridge.clear_session().await.unwrap());
    }

    #[tokio::test]
    async fn session_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        {
            let bridge = HostBridge::open(dir.path()).await.unwrap();
            bridge.save_session(json!({"t": 1}), "h").await.unwrap();
        }
        let bridge = HostBridge::open(dir.path()).await.unwrap();
        assert_eq!(bridge.get_session().await.unwrap(), Some(json!({"t": 1})));
    }

    #[tokio::test]
    async fn session_key_not_writable_as_setting() {
        let (_dir, bridge) = open_bridge().await;
        bridge.save_session(json!("tok"), "h").await.unwrap();

        assert!(!bridge.save_setting("session", json!("forged")).await.unwrap());
        assert_eq!(bridge.get_session().await.unwrap(), Some(json!("tok")));
    }

    #[tokio::test]
    async fn malformed_stored_session_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(crate::store::SETTINGS_FILE),
            r#"{"session": "not-a-record"}"#,
        )
        .unwrap();
        let bridge = HostBridge::open(dir.path()).await.unwrap();
        assert_eq!(bridge.get_session().await.unwrap(), None);
    }

    #[tokio::test]
    async fn persistence_failure_is_false_not_error() {
        let (dir, bridge) = open_bridge().await;
        bridge.save_setting("k", json!("kept")).await.unwrap();
        std::fs::remove_dir_all(dir.path()).unwrap();

        assert!(!bridge.save_setting("k", json!("lost")).await.unwrap());
        assert!(!bridge.save_session(json!("tok"), "h").await.unwrap());
        assert!(!bridge.clear_session().await.unwrap());
        assert_eq!(bridge.get_setting("k").await.unwrap(), Some(json!("kept")));
        assert_eq!(bridge.get_session().await.unwrap(), None);
    }

    #[tokio::test]
    async fn select_folder_without_picker_is_cancel() {
        let (_dir, bridge) = open_bridge().await;
        assert_eq!(bridge.select_folder().await.unwrap(), None);
    }

    #[tokio::test]
    async fn select_folder_cancel_is_none_not_empty() {
        let (_dir, bridge) = open_bridge().await;
        let picker = ScriptedPicker::answering(vec![Ok(None), Ok(Some(PathBuf::new()))]);
        bridge.attach_picker(picker).await;

        assert_eq!(bridge.select_folder().await.unwrap(), None);
        assert_eq!(bridge.select_folder().await.unwrap(), None);
    }

    #[tokio::test]
    async fn select_folder_remembers_last_directory() {
        let (dir, bridge) = open_bridge().await;
        let shots = dir.path().join("shots");
        let picker = ScriptedPicker::answering(vec![Ok(Some(shots.clone())), Ok(None)]);
        let bridge = bridge.with_picker(picker.clone());

        let picked = bridge.select_folder().await.unwrap();
        assert_eq!(picked.as_deref(), Some(shots.to_str().unwrap()));
        assert_eq!(
            bridge.get_setting(LAST_DIRECTORY_KEY).await.unwrap(),
            Some(json!(shots.to_str().unwrap()))
        );

        bridge.select_folder().await.unwrap();
        let starts = picker.starts.lock().unwrap().clone();
        assert_eq!(starts, vec![None, Some(shots)]);
    }

    #[tokio::test]
    async fn select_folder_makes_relative_paths_absolute() {
        let (_dir, bridge) = open_bridge().await;
        let picker = ScriptedPicker::answering(vec![Ok(Some(PathBuf::from("renders")))]);
        bridge.attach_picker(picker).await;

        let picked = bridge.select_folder().await.unwrap().unwrap();
        assert!(Path::new(&picked).is_absolute());
        assert!(picked.ends_with("renders"));
    }

    #[tokio::test]
    async fn picker_failure_is_host_error() {
        let (_dir, bridge) = open_bridge().await;
        let picker = ScriptedPicker::answering(vec![Err(PickerError::Io(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "dialog crashed",
        )))]);
        bridge.attach_picker(picker).await;

        let err = bridge.select_folder().await.unwrap_err();
        assert!(matches!(err, BridgeError::Host(_)));
    }

    #[tokio::test]
    async fn concurrent_writes_to_distinct_keys_all_land() {
        let (dir, bridge) = open_bridge().await;
        let bridge = Arc::new(bridge);

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let bridge = Arc::clone(&bridge);
                tokio::spawn(async move { bridge.save_setting(&format!("k{i}"), json!(i)).await })
            })
            .collect();
        for task in tasks {
            assert!(task.await.unwrap().unwrap());
        }

        let reopened = SettingsStore::open(dir.path()).await.unwrap();
        for i in 0..16 {
            assert_eq!(reopened.get(&format!("k{i}")), Some(&json!(i)));
        }
    }
}
