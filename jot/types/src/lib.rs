//! Shared types for jot: the libSQL `/v2/pipeline` wire shapes and the
//! `Note` record projected out of them.

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// =====================================================
// Domain Types
// =====================================================

/// A single note as stored in the remote `notes` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub body: String,
    /// Store-native timestamp text, e.g. `2026-02-18 14:32:00` (UTC)
    pub created_at: String,
}

// =====================================================
// Typed Values
// =====================================================

/// A `{type, value}` pair, used for statement args and result cells.
///
/// Integers travel as decimal text. Kinds the client never interprets
/// (null, float, blob) are kept as the raw JSON object so they serialize
/// back exactly as they arrived.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(String),
    Other(serde_json::Value),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn integer(n: i64) -> Self {
        Value::Integer(n.to_string())
    }

    /// Cell contents as plain text. Uninterpreted kinds yield their raw
    /// `value` field, or an empty string when there is none (null).
    pub fn to_text(&self) -> String {
        match self {
            Value::Text(s) | Value::Integer(s) => s.clone(),
            Value::Other(raw) => match raw.get("value") {
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(serde_json::Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            },
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Text(s) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "text")?;
                map.serialize_entry("value", s)?;
                map.end()
            }
            Value::Integer(s) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "integer")?;
                map.serialize_entry("value", s)?;
                map.end()
            }
            Value::Other(raw) => raw.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        let kind = raw
            .get("type")
            .and_then(|t| t.as_str())
            .map(str::to_owned)
            .ok_or_else(|| D::Error::custom("typed value must be an object with a string `type`"))?;

        let interpreted = match (kind.as_str(), raw.get("value")) {
            ("text", Some(serde_json::Value::String(s))) => Some(Value::Text(s.clone())),
            ("integer", Some(serde_json::Value::String(s))) => Some(Value::Integer(s.clone())),
            // Some servers send small integers as plain JSON numbers
            ("integer", Some(serde_json::Value::Number(n))) => Some(Value::Integer(n.to_string())),
            // A malformed payload stays opaque; the cell is judged where it is used
            _ => None,
        };

        Ok(interpreted.unwrap_or(Value::Other(raw)))
    }
}

// =====================================================
// Pipeline Request Types
// =====================================================

/// One parameterized SQL statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stmt {
    pub sql: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Value>,
}

impl Stmt {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            args: Vec::new(),
        }
    }

    /// Bind the next positional `?` as text
    pub fn bind_text(mut self, s: impl Into<String>) -> Self {
        self.args.push(Value::text(s));
        self
    }

    /// Bind the next positional `?` as an integer
    pub fn bind_integer(mut self, n: i64) -> Self {
        self.args.push(Value::integer(n));
        self
    }
}

/// A directive within a pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamRequest {
    Execute { stmt: Stmt },
    Close,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineRequest {
    pub requests: Vec<StreamRequest>,
}

// =====================================================
// Pipeline Response Types
// =====================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResponse {
    #[serde(default)]
    pub results: Vec<StreamResult>,
}

/// Outcome of one directive, positionally matching the request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamResult {
    Ok { response: StreamResponse },
    Error { error: StreamError },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamResponse {
    Execute { result: StmtResult },
    Close,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StmtResult {
    #[serde(default)]
    pub cols: Vec<Col>,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
    #[serde(default)]
    pub affected_row_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_insert_rowid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Col {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decltype: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl StreamResult {
    /// The statement result, if this is a successful `execute`
    pub fn execute_result(&self) -> Option<&StmtResult> {
        match self {
            StreamResult::Ok {
                response: StreamResponse::Execute { result },
            } => Some(result),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_value_accepts_string_and_number() {
        let from_str: Value =
            serde_json::from_value(json!({"type": "integer", "value": "42"})).unwrap();
        let from_num: Value =
            serde_json::from_value(json!({"type": "integer", "value": 42})).unwrap();
        assert_eq!(from_str, Value::Integer("42".to_string()));
        assert_eq!(from_num, Value::Integer("42".to_string()));
    }

    #[test]
    fn test_uninterpreted_value_serializes_unchanged() {
        let raw = json!({"type": "float", "value": 1.5});
        let value: Value = serde_json::from_value(raw.clone()).unwrap();
        assert!(matches!(value, Value::Other(_)));
        assert_eq!(value.to_text(), "1.5");
        assert_eq!(serde_json::to_value(&value).unwrap(), raw);

        let null: Value = serde_json::from_value(json!({"type": "null"})).unwrap();
        assert_eq!(null.to_text(), "");
    }

    #[test]
    fn test_value_without_type_is_rejected() {
        assert!(serde_json::from_value::<Value>(json!({"value": "x"})).is_err());
        assert!(serde_json::from_value::<Value>(json!("bare")).is_err());
    }

    #[test]
    fn test_malformed_typed_value_is_kept_opaque() {
        let null_id: Value =
            serde_json::from_value(json!({"type": "integer", "value": null})).unwrap();
        assert_eq!(null_id, Value::Other(json!({"type": "integer", "value": null})));
        assert_eq!(null_id.to_text(), "");

        let numeric_text: Value =
            serde_json::from_value(json!({"type": "text", "value": 3})).unwrap();
        assert!(matches!(numeric_text, Value::Other(_)));
        assert_eq!(numeric_text.to_text(), "3");
    }

    #[test]
    fn test_close_request_shape() {
        let json = serde_json::to_value(StreamRequest::Close).unwrap();
        assert_eq!(json, json!({"type": "close"}));
    }

    #[test]
    fn test_error_result_and_close_ack_decode() {
        let resp: PipelineResponse = serde_json::from_value(json!({
            "baton": null,
            "results": [
                {
                    "type": "error",
                    "error": {"message": "no such table: notes", "code": "SQLITE_ERROR"}
                },
                {"type": "ok", "response": {"type": "close"}}
            ]
        }))
        .unwrap();
        assert!(matches!(
            &resp.results[0],
            StreamResult::Error { error } if error.message == "no such table: notes"
        ));
        assert!(resp.results[1].execute_result().is_none());
    }
}
