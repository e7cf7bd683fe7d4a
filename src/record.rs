//! The open resource record type.
//!
//! PSA resources are schema-less on the wire: every entity is a JSON object
//! with an optional numeric `id` plus arbitrary fields. [`Record`] models
//! exactly that, leaving field-level typing to the caller.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An open key/value resource record with an optional numeric identifier.
///
/// No schema is enforced by the client; the remote API is the source of
/// truth for which fields a given entity accepts.
///
/// # Example
///
/// ```
/// use psaclient::Record;
///
/// let ticket = Record::new()
///     .field("title", "Printer on fire")
///     .field("priority", 1);
///
/// assert_eq!(ticket.get_str("title"), Some("Printer on fire"));
/// assert_eq!(ticket.id, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Numeric identifier assigned by the remote API. `None` for records
    /// that have not been created yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// All remaining fields, untyped.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    /// Create an empty record with no id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty record carrying the given id.
    pub fn with_id(id: i64) -> Self {
        Self {
            id: Some(id),
            fields: Map::new(),
        }
    }

    /// Builder-style field setter.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Set a field in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Get a field as raw JSON.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Remove a field, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    /// Get a field as a string slice.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// Get a field as a signed integer.
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.fields.get(name).and_then(Value::as_i64)
    }

    /// Get a field as a float.
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.fields.get(name).and_then(Value::as_f64)
    }

    /// Get a field as a boolean.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.fields.get(name).and_then(Value::as_bool)
    }

    /// Number of fields, not counting `id`.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if the record has no fields beyond an optional `id`.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(mut fields: Map<String, Value>) -> Self {
        let id = fields.remove("id").and_then(|v| v.as_i64());
        Self { id, fields }
    }
}
