//! JSON dispatch for webview IPC.
//!
//! A webview delivers bridge calls as an operation name plus a JSON argument
//! array. [`invoke`] routes them to a [`NativeBridge`] and encodes the result
//! the way the frontend sees it: a path string or `null`, a boolean, or an
//! opaque value or `null`.

use crate::api::NativeBridge;
use crate::error::BridgeError;
use serde_json::Value;

/// Invoke `operation` with positional JSON `args`.
pub async fn invoke(
    bridge: &dyn NativeBridge,
    operation: &str,
    args: Vec<Value>,
) -> Result<Value, BridgeError> {
    let mut args = Args::new(operation, args);
    let result = match operation {
        "select_folder" => {
            args.finish()?;
            bridge.select_folder().await?.map_or(Value::Null, Value::from)
        }
        "save_session" => {
            let tokens = args.value()?;
            let host = args.string()?;
            args.finish()?;
            Value::Bool(bridge.save_session(tokens, &host).await?)
        }
        "get_session" => {
            args.finish()?;
            bridge.get_session().await?.unwrap_or(Value::Null)
        }
        "clear_session" => {
            args.finish()?;
            Value::Bool(bridge.clear_session().await?)
        }
        "save_setting" => {
            let key = args.string()?;
            let value = args.value()?;
            args.finish()?;
            Value::Bool(bridge.save_setting(&key, value).await?)
        }
        "get_setting" => {
            let key = args.string()?;
            args.finish()?;
            bridge.get_setting(&key).await?.unwrap_or(Value::Null)
        }
        other => return Err(BridgeError::UnknownOperation(other.to_string())),
    };
    Ok(result)
}

/// Positional argument reader with arity checking.
struct Args<'a> {
    operation: &'a str,
    values: std::vec::IntoIter<Value>,
    expected: usize,
    given: usize,
}

impl<'a> Args<'a> {
    fn new(operation: &'a str, values: Vec<Value>) -> Self {
        let given = values.len();
        Self {
            operation,
            values: values.into_iter(),
            expected: 0,
            given,
        }
    }

    fn value(&mut self) -> Result<Value, BridgeError> {
        self.expected += 1;
        match self.values.next() {
            Some(value) => Ok(value),
            None => Err(self.arity_error()),
        }
    }

    fn string(&mut self) -> Result<String, BridgeError> {
        match self.value()? {
            Value::String(s) => Ok(s),
            other => Err(self.invalid(format!(
                "argument {} must be a string, got {}",
                self.expected,
                type_name(&other)
            ))),
        }
    }

    fn finish(self) -> Result<(), BridgeError> {
        if self.given != self.expected {
            return Err(self.arity_error());
        }
        Ok(())
    }

    fn arity_error(&self) -> BridgeError {
        let expected = match self.operation {
            "save_session" | "save_setting" => 2,
            "get_setting" => 1,
            _ => 0,
        };
        self.invalid(format!(
            "expected {} arguments, got {}",
            expected, self.given
        ))
    }

    fn invalid(&self, reason: String) -> BridgeError {
        BridgeError::InvalidArguments {
            operation: self.operation.to_string(),
            reason,
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
