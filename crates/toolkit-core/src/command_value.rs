// Canonical string form of values carried by protocol commands.

use serde_json::Value;

/// A value supplied to a command, before canonicalization.
///
/// The wire protocol only carries strings; `to_command_string` is the total
/// conversion into that form.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandValue {
    /// No value supplied.
    Absent,
    /// A string, transmitted unchanged.
    Text(String),
    /// Any other value, transmitted in its JSON serialization.
    Structured(Value),
}

impl CommandValue {
    /// Canonicalize into the wire string form.
    ///
    /// Absent values become the empty string, text passes through unchanged
    /// (no re-encoding, no trimming), and structured values serialize to
    /// their JSON form (`true`, `5`, `1.01`).
    pub fn to_command_string(&self) -> String {
        match self {
            CommandValue::Absent => String::new(),
            CommandValue::Text(text) => text.clone(),
            CommandValue::Structured(value) => value.to_string(),
        }
    }

    /// Whether canonicalization yields the empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            CommandValue::Absent => true,
            CommandValue::Text(text) => text.is_empty(),
            // Structured values always have a non-empty JSON form.
            CommandValue::Structured(_) => false,
        }
    }
}

impl From<&str> for CommandValue {
    fn from(value: &str) -> Self {
        CommandValue::Text(value.to_string())
    }
}

impl From<String> for CommandValue {
    fn from(value: String) -> Self {
        CommandValue::Text(value)
    }
}

impl From<&String> for CommandValue {
    fn from(value: &String) -> Self {
        CommandValue::Text(value.clone())
    }
}

impl From<bool> for CommandValue {
    fn from(value: bool) -> Self {
        CommandValue::Structured(Value::Bool(value))
    }
}

impl From<i32> for CommandValue {
    fn from(value: i32) -> Self {
        CommandValue::Structured(Value::from(value))
    }
}

impl From<i64> for CommandValue {
    fn from(value: i64) -> Self {
        CommandValue::Structured(Value::from(value))
    }
}

impl From<u32> for CommandValue {
    fn from(value: u32) -> Self {
        CommandValue::Structured(Value::from(value))
    }
}

impl From<u64> for CommandValue {
    fn from(value: u64) -> Self {
        CommandValue::Structured(Value::from(value))
    }
}

impl From<f64> for CommandValue {
    fn from(value: f64) -> Self {
        CommandValue::Structured(Value::from(value))
    }
}

impl From<Value> for CommandValue {
    fn from(value: Value) -> Self {
        CommandValue::Structured(value)
    }
}

impl<T: Into<CommandValue>> From<Option<T>> for CommandValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => CommandValue::Absent,
        }
    }
}
