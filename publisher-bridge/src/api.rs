//! The native bridge contract.

use crate::error::BridgeError;
use async_trait::async_trait;
use serde_json::Value;

/// Operations the desktop host exposes to the frontend.
///
/// Every call crosses into host code (dialogs, disk) and may suspend. No
/// ordering holds between calls except what the caller imposes by awaiting.
///
/// Result conventions:
/// - `Ok(None)` is the absence value (canceled dialog, no session, unknown key)
/// - `Ok(false)` is an expected persistence failure
/// - `Err(_)` is an unexpected host failure
#[async_trait]
pub trait NativeBridge: Send + Sync {
    /// Open the host folder dialog.
    ///
    /// Returns the absolute folder path, or `None` if the user canceled.
    /// Never returns an empty string.
    async fn select_folder(&self) -> Result<Option<String>, BridgeError>;

    /// Persist `tokens` for `host`, replacing any previous session.
    async fn save_session(&self, tokens: Value, host: &str) -> Result<bool, BridgeError>;

    /// Tokens from the last [`save_session`](Self::save_session), or `None`.
    async fn get_session(&self) -> Result<Option<Value>, BridgeError>;

    /// Drop the persisted session.
    async fn clear_session(&self) -> Result<bool, BridgeError>;

    /// Persist a setting, overwriting any previous value for `key`.
    async fn save_setting(&self, key: &str, value: Value) -> Result<bool, BridgeError>;

    /// Value last saved for `key`, or `None` if the key is unknown.
    async fn get_setting(&self, key: &str) -> Result<Option<Value>, BridgeError>;
}
