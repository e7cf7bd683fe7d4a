//! Query options and filter normalization for list operations.
//!
//! The remote query endpoint takes a list of `{op, field, value}` predicates
//! and rejects unfiltered queries outright. Callers can supply filters three
//! ways: not at all (a permissive `id >= 0` predicate is substituted), as a
//! flat field/value equality map, or as a pre-built predicate list which is
//! passed through verbatim.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Comparison operators understood by the query endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Contains,
    #[serde(rename = "beginsWith")]
    BeginsWith,
}

impl FilterOp {
    /// Parse an operator from its wire name. Used when expanding nested
    /// `{field: {op: value}}` filter shapes.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "eq" => Some(Self::Eq),
            "ne" => Some(Self::Ne),
            "gt" => Some(Self::Gt),
            "gte" => Some(Self::Gte),
            "lt" => Some(Self::Lt),
            "lte" => Some(Self::Lte),
            "contains" => Some(Self::Contains),
            "beginsWith" => Some(Self::BeginsWith),
            _ => None,
        }
    }
}

/// A single `{op, field, value}` comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    pub op: FilterOp,
    pub field: String,
    pub value: Value,
}

impl Predicate {
    pub fn new(op: FilterOp, field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            op,
            field: field.into(),
            value: value.into(),
        }
    }

    /// The permissive default predicate (`id >= 0`).
    ///
    /// The remote API rejects list queries with an empty filter, so this
    /// stands in whenever the caller supplies none.
    pub fn match_all() -> Self {
        Self::new(FilterOp::Gte, "id", 0)
    }
}

/// Filter input accepted by [`Query`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Filter {
    /// No filter; normalizes to the permissive default predicate.
    #[default]
    None,
    /// Flat field/value pairs, each normalized to an `eq` predicate in
    /// insertion order. A value of the shape `{op: value}` is expanded to
    /// the named comparison instead.
    Fields(Vec<(String, Value)>),
    /// Pre-built predicates, passed through verbatim.
    Predicates(Vec<Predicate>),
}

/// Options for a list operation: filter, sort key, and paging.
///
/// # Example
///
/// ```
/// use psaclient::{FilterOp, Query};
///
/// let query = Query::new()
///     .filter_eq("status", 1)
///     .filter_field("estimatedHours", FilterOp::Gt, 4)
///     .sort("dueDate")
///     .page(2)
///     .page_size(50);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    filter: Filter,
    sort: Option<String>,
    page: Option<u32>,
    page_size: Option<u32>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the filter wholesale.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Add an equality condition on a field.
    ///
    /// Switches the filter to field mode; any previously supplied predicate
    /// list is discarded.
    #[must_use]
    pub fn filter_eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push_field(field.into(), value.into())
    }

    /// Add a condition with an explicit operator on a field.
    #[must_use]
    pub fn filter_field(
        self,
        field: impl Into<String>,
        op: FilterOp,
        value: impl Into<Value>,
    ) -> Self {
        let nested = serde_json::json!({ op_key(op): value.into() });
        self.push_field(field.into(), nested)
    }

    /// Append a pre-built predicate.
    ///
    /// Switches the filter to predicate mode; any previously supplied field
    /// map is converted first so the two styles compose.
    #[must_use]
    pub fn predicate(mut self, predicate: Predicate) -> Self {
        let mut predicates = self.predicates_from_filter();
        predicates.push(predicate);
        self.filter = Filter::Predicates(predicates);
        self
    }

    /// Set the sort key.
    #[must_use]
    pub fn sort(mut self, field: impl Into<String>) -> Self {
        self.sort = Some(field.into());
        self
    }

    /// Set the page number (1-indexed).
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size.
    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Normalize the filter into the predicate list sent on the wire.
    ///
    /// An empty filter yields the single permissive default predicate.
    /// Normalization is idempotent: a predicate list is returned unchanged.
    pub fn predicates(&self) -> Vec<Predicate> {
        match &self.filter {
            Filter::None => vec![Predicate::match_all()],
            Filter::Fields(fields) if fields.is_empty() => vec![Predicate::match_all()],
            Filter::Fields(fields) => fields
                .iter()
                .map(|(field, value)| expand_field(field, value))
                .collect(),
            Filter::Predicates(predicates) if predicates.is_empty() => {
                vec![Predicate::match_all()]
            }
            Filter::Predicates(predicates) => predicates.clone(),
        }
    }

    /// Build the JSON body for the query sub-resource.
    pub fn to_body(&self) -> QueryBody {
        QueryBody {
            filter: self.predicates(),
            sort: self.sort.clone(),
            page: self.page,
            page_size: self.page_size,
        }
    }

    fn push_field(mut self, field: String, value: Value) -> Self {
        match &mut self.filter {
            Filter::Fields(fields) => fields.push((field, value)),
            _ => self.filter = Filter::Fields(vec![(field, value)]),
        }
        self
    }

    fn predicates_from_filter(&self) -> Vec<Predicate> {
        match &self.filter {
            Filter::None => Vec::new(),
            Filter::Fields(fields) => fields
                .iter()
                .map(|(field, value)| expand_field(field, value))
                .collect(),
            Filter::Predicates(predicates) => predicates.clone(),
        }
    }
}

/// Wire body for POST `{endpoint}/query`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryBody {
    pub filter: Vec<Predicate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(rename = "pageSize", skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// Turn one flat-filter entry into a predicate.
///
/// A plain value means equality. An object with a single key naming an
/// operator is the nested `{field: {op: value}}` shape and expands to that
/// comparison.
fn expand_field(field: &str, value: &Value) -> Predicate {
    if let Value::Object(map) = value {
        if map.len() == 1 {
            let (key, inner) = map.iter().next().expect("len checked");
            if let Some(op) = FilterOp::from_key(key) {
                return Predicate::new(op, field, inner.clone());
            }
        }
    }
    Predicate::new(FilterOp::Eq, field, value.clone())
}

fn op_key(op: FilterOp) -> &'static str {
    match op {
        FilterOp::Eq => "eq",
        FilterOp::Ne => "ne",
        FilterOp::Gt => "gt",
        FilterOp::Gte => "gte",
        FilterOp::Lt => "lt",
        FilterOp::Lte => "lte",
        FilterOp::Contains => "contains",
        FilterOp::BeginsWith => "beginsWith",
    }
}
