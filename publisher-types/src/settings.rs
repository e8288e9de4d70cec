//! The host settings document.
//!
//! Settings are a flat JSON object. The keys below are written on first launch
//! so the frontend always finds a value for them.

use serde_json::{Map, Value};

/// A flat settings document (key → any JSON value).
pub type SettingsDocument = Map<String, Value>;

/// Key holding the persisted [`SessionRecord`](crate::SessionRecord).
pub const SESSION_KEY: &str = "session";

/// Key holding the last folder picked through the host dialog.
pub const LAST_DIRECTORY_KEY: &str = "last_directory";

/// Whether `key` is owned by the host and not writable as a plain setting.
pub fn is_reserved_key(key: &str) -> bool {
    key == SESSION_KEY
}

/// The document written when no settings file exists yet.
pub fn default_settings() -> SettingsDocument {
    let mut doc = Map::new();
    doc.insert("default_task_name".into(), Value::from("Compositing"));
    // e.g. SQ01_SH010_Comp_v001.mov, episode optional
    doc.insert(
        "filename_pattern".into(),
        Value::from("[{episode}_]{sequence}_{shot}_{task}_v{version}*"),
    );
    doc.insert(
        "sequence_name_template".into(),
        Value::from("{episode}_{sequence}"),
    );
    doc.insert(
        "shot_name_template".into(),
        Value::from("{episode}_{sequence}_{shot}"),
    );
    doc.insert(SESSION_KEY.into(), Value::Null);
    doc.insert(LAST_DIRECTORY_KEY.into(), Value::from(""));
    doc
}
