//! Mock server state management.
//!
//! Provides the in-memory data store for the mock PSA API server. Because
//! records are opaque, one store serves every entity: a table per endpoint
//! name, keyed by record id.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::query::{FilterOp, Predicate, QueryBody};
use crate::record::Record;

/// Shared state for the mock server.
///
/// Wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Records per entity endpoint (e.g. "Appointments"), keyed by id.
    tables: HashMap<String, BTreeMap<i64, Record>>,
    /// Next id to assign on create.
    next_id: i64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
            next_id: 1,
        }
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a record to an entity table, assigning an id if it has none.
    pub fn with_record(mut self, entity: &str, record: Record) -> Self {
        self.insert(entity, record);
        self
    }

    /// Insert a record, assigning an id if it has none. Returns the stored
    /// record.
    pub fn insert(&mut self, entity: &str, mut record: Record) -> Record {
        let id = match record.id {
            Some(id) => {
                self.next_id = self.next_id.max(id + 1);
                id
            }
            None => {
                let id = self.next_id;
                self.next_id += 1;
                record.id = Some(id);
                id
            }
        };
        self.tables
            .entry(entity.to_string())
            .or_default()
            .insert(id, record.clone());
        record
    }

    /// Get a record by entity and id.
    pub fn get(&self, entity: &str, id: i64) -> Option<&Record> {
        self.tables.get(entity)?.get(&id)
    }

    /// Replace a record wholesale, keeping its id. Returns the stored
    /// record, or `None` if it does not exist.
    pub fn replace(&mut self, entity: &str, id: i64, mut record: Record) -> Option<Record> {
        let table = self.tables.get_mut(entity)?;
        let slot = table.get_mut(&id)?;
        record.id = Some(id);
        *slot = record.clone();
        Some(record)
    }

    /// Merge fields into an existing record. Returns the stored record, or
    /// `None` if it does not exist.
    pub fn merge(&mut self, entity: &str, id: i64, partial: Record) -> Option<Record> {
        let table = self.tables.get_mut(entity)?;
        let slot = table.get_mut(&id)?;
        for (key, value) in partial.fields {
            slot.fields.insert(key, value);
        }
        Some(slot.clone())
    }

    /// Remove a record. Returns true if it existed.
    pub fn remove(&mut self, entity: &str, id: i64) -> bool {
        self.tables
            .get_mut(entity)
            .map(|table| table.remove(&id).is_some())
            .unwrap_or(false)
    }

    /// Evaluate a query against an entity table: filter, sort, paginate.
    pub fn query(&self, entity: &str, body: &QueryBody) -> Vec<Record> {
        let mut matched: Vec<Record> = self
            .tables
            .get(entity)
            .map(|table| {
                table
                    .values()
                    .filter(|record| body.filter.iter().all(|p| matches(record, p)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(sort) = &body.sort {
            matched.sort_by(|a, b| {
                compare(&field_value(a, sort), &field_value(b, sort))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }

        if let Some(page_size) = body.page_size {
            let page = body.page.unwrap_or(1).max(1);
            let start = ((page - 1) * page_size) as usize;
            matched = matched
                .into_iter()
                .skip(start)
                .take(page_size as usize)
                .collect();
        }

        matched
    }
}

/// Evaluate one predicate against a record.
fn matches(record: &Record, predicate: &Predicate) -> bool {
    let value = field_value(record, &predicate.field);

    match predicate.op {
        FilterOp::Eq => compare(&value, &predicate.value) == Some(std::cmp::Ordering::Equal),
        FilterOp::Ne => compare(&value, &predicate.value) != Some(std::cmp::Ordering::Equal),
        FilterOp::Gt => compare(&value, &predicate.value) == Some(std::cmp::Ordering::Greater),
        FilterOp::Gte => matches!(
            compare(&value, &predicate.value),
            Some(std::cmp::Ordering::Greater | std::cmp::Ordering::Equal)
        ),
        FilterOp::Lt => compare(&value, &predicate.value) == Some(std::cmp::Ordering::Less),
        FilterOp::Lte => matches!(
            compare(&value, &predicate.value),
            Some(std::cmp::Ordering::Less | std::cmp::Ordering::Equal)
        ),
        FilterOp::Contains => match (value.as_str(), predicate.value.as_str()) {
            (Some(haystack), Some(needle)) => haystack.contains(needle),
            _ => false,
        },
        FilterOp::BeginsWith => match (value.as_str(), predicate.value.as_str()) {
            (Some(haystack), Some(needle)) => haystack.starts_with(needle),
            _ => false,
        },
    }
}

/// Look up a field on a record, treating `id` as a field.
fn field_value(record: &Record, field: &str) -> Value {
    if field == "id" {
        return record.id.map(Value::from).unwrap_or(Value::Null);
    }
    record.get(field).cloned().unwrap_or(Value::Null)
}

/// Compare two JSON values: numbers numerically, strings lexically,
/// booleans as false < true. Mixed types are incomparable.
fn compare(a: &Value, b: &Value) -> Option<std::cmp::Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Query;

    fn seeded() -> MockState {
        let mut state = MockState::new();
        state.insert("Tickets", Record::new().field("title", "Alpha").field("priority", 1));
        state.insert("Tickets", Record::new().field("title", "Beta").field("priority", 3));
        state.insert("Tickets", Record::new().field("title", "Gamma").field("priority", 2));
        state
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let mut state = MockState::new();
        let first = state.insert("Tickets", Record::new());
        let second = state.insert("Tickets", Record::new());
        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
    }

    #[test]
    fn test_insert_respects_existing_id() {
        let mut state = MockState::new();
        state.insert("Tickets", Record::with_id(10));
        let next = state.insert("Tickets", Record::new());
        assert_eq!(next.id, Some(11));
    }

    #[test]
    fn test_default_filter_matches_everything() {
        let state = seeded();
        let body = Query::new().to_body();
        assert_eq!(state.query("Tickets", &body).len(), 3);
    }

    #[test]
    fn test_query_filters_and_sorts() {
        let state = seeded();
        let body = Query::new()
            .filter(crate::query::Filter::Predicates(vec![Predicate::new(
                FilterOp::Gte,
                "priority",
                2,
            )]))
            .sort("priority")
            .to_body();

        let results = state.query("Tickets", &body);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].get_str("title"), Some("Gamma"));
        assert_eq!(results[1].get_str("title"), Some("Beta"));
    }

    #[test]
    fn test_query_paginates() {
        let state = seeded();
        let body = Query::new().sort("priority").page(2).page_size(2).to_body();
        let results = state.query("Tickets", &body);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].get_str("title"), Some("Beta"));
    }

    #[test]
    fn test_merge_keeps_other_fields() {
        let mut state = seeded();
        let merged = state
            .merge("Tickets", 1, Record::new().field("priority", 5))
            .unwrap();
        assert_eq!(merged.get_str("title"), Some("Alpha"));
        assert_eq!(merged.get_i64("priority"), Some(5));
    }

    #[test]
    fn test_string_operators() {
        let state = seeded();
        let contains = Predicate::new(FilterOp::Contains, "title", "amm");
        let begins = Predicate::new(FilterOp::BeginsWith, "title", "Ga");
        let record = state.get("Tickets", 3).unwrap();
        assert!(matches(record, &contains));
        assert!(matches(record, &begins));
    }
}
