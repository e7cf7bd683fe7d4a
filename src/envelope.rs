//! Response envelope normalization.
//!
//! The remote API is inconsistent about how it wraps results: single records
//! arrive as `{item: {...}}` or bare, collections as `{items: [...]}` or a
//! bare array. [`Envelope`] absorbs all four shapes so entity methods can ask
//! for the one they expect.

use reqwest::Response;
use serde::Deserialize;

use crate::error::{PsaError, Result};
use crate::record::Record;

/// The possible shapes of a response body.
///
/// Variant order matters: `serde(untagged)` tries top to bottom, and a bare
/// [`Record`] would happily swallow `{item: ...}` or `{items: [...]}` into
/// its open field map if it came first.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Envelope {
    /// `{item: record}`
    Item { item: Record },
    /// `{items: [record, ...]}`
    Items { items: Vec<Record> },
    /// A bare array of records.
    Array(Vec<Record>),
    /// A bare record.
    Bare(Record),
}

impl Envelope {
    /// Parse the envelope from an HTTP response body.
    pub async fn from_response(response: Response) -> Result<Self> {
        let body = response.text().await.map_err(PsaError::Http)?;
        let envelope = serde_json::from_str(&body)?;
        Ok(envelope)
    }

    /// Normalize to a single record.
    ///
    /// # Errors
    ///
    /// Returns [`PsaError::MalformedResponse`] when the body carried a
    /// collection instead.
    pub fn into_item(self) -> Result<Record> {
        match self {
            Envelope::Item { item } => Ok(item),
            Envelope::Bare(record) => Ok(record),
            Envelope::Items { .. } | Envelope::Array(_) => {
                Err(PsaError::MalformedResponse { expected: "item" })
            }
        }
    }

    /// Normalize to a list of records.
    ///
    /// # Errors
    ///
    /// Returns [`PsaError::MalformedResponse`] when the body carried a
    /// single record instead.
    pub fn into_items(self) -> Result<Vec<Record>> {
        match self {
            Envelope::Items { items } => Ok(items),
            Envelope::Array(items) => Ok(items),
            Envelope::Item { .. } | Envelope::Bare(_) => {
                Err(PsaError::MalformedResponse { expected: "items" })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Envelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_item_envelope() {
        let envelope = parse(json!({"item": {"id": 1, "name": "X"}}));
        let record = envelope.into_item().unwrap();
        assert_eq!(record.id, Some(1));
        assert_eq!(record.get_str("name"), Some("X"));
    }

    #[test]
    fn test_items_envelope() {
        let envelope = parse(json!({"items": [{"id": 1}, {"id": 2}]}));
        let records = envelope.into_items().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id, Some(2));
    }

    #[test]
    fn test_bare_array() {
        let envelope = parse(json!([{"id": 1}, {"id": 2}, {"id": 3}]));
        assert_eq!(envelope.into_items().unwrap().len(), 3);
    }

    #[test]
    fn test_bare_record() {
        let envelope = parse(json!({"id": 9, "name": "X"}));
        let record = envelope.into_item().unwrap();
        assert_eq!(record.id, Some(9));
    }

    #[test]
    fn test_shape_mismatch_is_malformed() {
        let envelope = parse(json!({"items": []}));
        assert!(matches!(
            envelope.into_item(),
            Err(PsaError::MalformedResponse { expected: "item" })
        ));

        let envelope = parse(json!({"item": {"id": 1}}));
        assert!(matches!(
            envelope.into_items(),
            Err(PsaError::MalformedResponse { expected: "items" })
        ));
    }
}
