//! Mock bridge for testing code that consumes the bridge.
//!
//! Keeps everything in memory, lets tests script folder dialog answers, and
//! can force the next call into either failure tier.

use crate::api::NativeBridge;
use crate::error::BridgeError;
use async_trait::async_trait;
use publisher_types::{is_reserved_key, SessionRecord};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// In-memory [`NativeBridge`].
///
/// Clones share state, so a test can keep one clone and hand another to the
/// code under test.
#[derive(Debug, Default, Clone)]
pub struct MockBridge {
    inner: Arc<Mutex<MockBridgeInner>>,
}

#[derive(Debug, Default)]
struct MockBridgeInner {
    settings: HashMap<String, Value>,
    session: Option<SessionRecord>,
    folder_answers: VecDeque<Option<String>>,
    calls: Vec<&'static str>,
    fail_next_write: bool,
    fail_next_call: Option<String>,
}

impl MockBridge {
    /// Create an empty mock bridge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the answer for the next `select_folder()`; `None` is a cancel.
    ///
    /// With nothing queued, `select_folder()` cancels.
    pub fn queue_folder(&self, answer: Option<&str>) {
        let mut inner = self.inner.lock().unwrap();
        inner.folder_answers.push_back(answer.map(str::to_string));
    }

    /// Make the next write (`save_*`, `clear_session`) return `false`.
    pub fn fail_next_write(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_write = true;
    }

    /// Make the next call of any kind fail with [`BridgeError::Host`].
    pub fn fail_next_call(&self, error: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_call = Some(error.to_string());
    }

    /// Names of the operations called so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        let inner = self.inner.lock().unwrap();
        inner.calls.clone()
    }

    /// Current value of a setting.
    pub fn setting(&self, key: &str) -> Option<Value> {
        let inner = self.inner.lock().unwrap();
        inner.settings.get(key).cloned()
    }

    /// Current session, including its host.
    pub fn session(&self) -> Option<SessionRecord> {
        let inner = self.inner.lock().unwrap();
        inner.session.clone()
    }

    /// Clear all state.
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        *inner = MockBridgeInner::default();
    }

    /// Record the call and apply a forced host failure, if any.
    fn enter(
        &self,
        op: &'static str,
    ) -> Result<std::sync::MutexGuard<'_, MockBridgeInner>, BridgeError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(op);
        if let Some(error) = inner.fail_next_call.take() {
            return Err(BridgeError::Host(error));
        }
        Ok(inner)
    }
}

impl MockBridgeInner {
    fn write_fails(&mut self) -> bool {
        std::mem::take(&mut self.fail_next_write)
    }
}

#[async_trait]
impl NativeBridge for MockBridge {
    async fn select_folder(&self) -> Result<Option<String>, BridgeError> {
        let mut inner = self.enter("select_folder")?;
        Ok(inner
            .folder_answers
            .pop_front()
            .flatten()
            .filter(|path| !path.is_empty()))
    }

    async fn save_session(&self, tokens: Value, host: &str) -> Result<bool, BridgeError> {
        let mut inner = self.enter("save_session")?;
        if inner.write_fails() {
            return Ok(false);
        }
        inner.session = Some(SessionRecord::new(tokens, host));
        Ok(true)
    }

    async fn get_session(&self) -> Result<Option<Value>, BridgeError> {
        let inner = self.enter("get_session")?;
        Ok(inner.session.as_ref().map(|s| s.tokens.clone()))
    }

    async fn clear_session(&self) -> Result<bool, BridgeError> {
        let mut inner = self.enter("clear_session")?;
        if inner.write_fails() {
            return Ok(false);
        }
        inner.session = None;
        Ok(true)
    }

    async fn save_setting(&self, key: &str, value: Value) -> Result<bool, BridgeError> {
        let mut inner = self.enter("save_setting")?;
        if inner.write_fails() || is_reserved_key(key) {
            return Ok(false);
        }
        inner.settings.insert(key.to_string(), value);
        Ok(true)
    }

    async fn get_setting(&self, key: &str) -> Result<Option<Value>, BridgeError> {
        let inner = self.enter("get_setting")?;
        Ok(inner.settings.get(key).cloned())
    }
}
