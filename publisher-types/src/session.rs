//! Persisted authentication session.

use serde_json::Value;

/// Authentication tokens plus the backend host they were issued by.
///
/// The token payload is opaque: whatever the frontend hands over is stored and
/// returned untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    /// Token payload, any JSON shape.
    pub tokens: Value,
    /// Backend host the tokens belong to.
    pub host: String,
}

impl SessionRecord {
    /// Create a new session record.
    pub fn new(tokens: Value, host: impl Into<String>) -> Self {
        Self {
            tokens,
            host: host.into(),
        }
    }

    /// Read a record back from its stored form.
    ///
    /// Returns `None` for `null` or for anything that is not an object with a
    /// `tokens` field. A missing `host` reads as an empty string.
    pub fn from_stored(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let tokens = obj.get("tokens")?.clone();
        let host = obj
            .get("host")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Some(Self { tokens, host })
    }

    /// Stored form: `{"tokens": ..., "host": "..."}`.
    pub fn to_stored(&self) -> Value {
        serde_json::json!({
            "tokens": self.tokens,
            "host": self.host,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stored_form_roundtrip() {
        let record = SessionRecord::new(
            json!({"access_token": "abc", "refresh_token": "def", "user": {"id": 7}}),
            "https://kitsu.example.com/api",
        );
        let restored = SessionRecord::from_stored(&record.to_stored()).unwrap();
        assert_eq!(restored, record);
    }

    #[test]
    fn null_is_no_session() {
        assert!(SessionRecord::from_stored(&Value::Null).is_none());
    }

    #[test]
    fn malformed_entries_are_no_session() {
        assert!(SessionRecord::from_stored(&json!("token")).is_none());
        assert!(SessionRecord::from_stored(&json!({"host": "h"})).is_none());
    }

    #[test]
    fn scalar_tokens_are_kept() {
        let record = SessionRecord::from_stored(&json!({"tokens": "raw", "host": "h"})).unwrap();
        assert_eq!(record.tokens, json!("raw"));
    }

    #[test]
    fn missing_host_reads_empty() {
        let record = SessionRecord::from_stored(&json!({"tokens": null})).unwrap();
        assert_eq!(record.tokens, Value::Null);
        assert_eq!(record.host, "");
    }
}
