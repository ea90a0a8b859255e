//! Record and filter property bags.
//!
//! # Responsibility
//! - Represent one fixture record as a JSON field map.
//! - Provide exact-match filtering over record fields.
//!
//! # Invariants
//! - `id` is a strictly positive integer once a record is persisted.
//! - Matching uses `serde_json::Value` equality: an integer never equals a
//!   float, a string never equals a number.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field name carrying the collection-unique identifier.
pub const ID_FIELD: &str = "id";

/// One schemaless fixture record.
///
/// Records are plain JSON objects. The store injects `id` on create and
/// replaces the whole object on update, so there is no partial-merge state to
/// reason about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a record from JSON text. The payload must be a JSON object.
    pub fn from_json(payload: &str) -> serde_json::Result<Self> {
        serde_json::from_str(payload)
    }

    /// Returns the record id when present and a positive integer.
    pub fn id(&self) -> Option<u64> {
        match self.0.get(ID_FIELD).and_then(Value::as_u64) {
            Some(0) => None,
            other => other,
        }
    }

    /// Overwrites the record id.
    pub fn set_id(&mut self, id: u64) {
        self.0.insert(ID_FIELD.to_string(), Value::from(id));
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Inserts or replaces one field.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.0.insert(field.into(), value);
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        record.into_value()
    }
}

/// Exact-match filter over record fields.
///
/// Every filter entry must equal the record's value for that field. The empty
/// filter matches every record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filter(Map<String, Value>);

impl Filter {
    /// Creates the empty filter, which matches every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a filter from JSON text. The payload must be a JSON object.
    pub fn from_json(payload: &str) -> serde_json::Result<Self> {
        serde_json::from_str(payload)
    }

    /// Adds one exact-match term, chainable for fixture setup.
    pub fn with(mut self, field: impl Into<String>, value: Value) -> Self {
        self.insert(field, value);
        self
    }

    /// Inserts or replaces one exact-match term.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.0.insert(field.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns whether every filter term strictly equals the record's value.
    ///
    /// A term whose field is absent from the record never matches, including
    /// a `null` term against a missing field.
    pub fn matches(&self, record: &Record) -> bool {
        self.0
            .iter()
            .all(|(field, expected)| record.get(field) == Some(expected))
    }
}

impl From<Map<String, Value>> for Filter {
    fn from(terms: Map<String, Value>) -> Self {
        Self(terms)
    }
}

#[cfg(test)]
mod tests {
    use super::{Filter, Record};
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        match value {
            serde_json::Value::Object(map) => Record::from(map),
            other => panic!("test fixture must be an object, got {other}"),
        }
    }

    #[test]
    fn empty_filter_matches_any_record() {
        let filter = Filter::new();
        assert!(filter.matches(&record(json!({"id": 1, "name": "First"}))));
        assert!(filter.matches(&Record::new()));
    }

    #[test]
    fn filter_requires_every_term_to_match() {
        let item = record(json!({"id": 2, "group": "A", "name": "Second"}));

        assert!(Filter::new().with("group", json!("A")).matches(&item));
        assert!(Filter::new()
            .with("group", json!("A"))
            .with("id", json!(2))
            .matches(&item));
        assert!(!Filter::new()
            .with("group", json!("A"))
            .with("id", json!(3))
            .matches(&item));
    }

    #[test]
    fn filter_equality_never_coerces_value_kinds() {
        let item = record(json!({"id": 1, "count": 5}));

        assert!(!Filter::new().with("count", json!("5")).matches(&item));
        assert!(!Filter::new().with("count", json!(5.0)).matches(&item));
        assert!(Filter::new().with("count", json!(5)).matches(&item));
    }

    #[test]
    fn null_term_does_not_match_missing_field() {
        let item = record(json!({"id": 1}));
        assert!(!Filter::new().with("name", json!(null)).matches(&item));
    }

    #[test]
    fn record_id_requires_positive_integer() {
        assert_eq!(record(json!({"id": 7})).id(), Some(7));
        assert_eq!(record(json!({"id": 0})).id(), None);
        assert_eq!(record(json!({"id": -3})).id(), None);
        assert_eq!(record(json!({"id": "7"})).id(), None);
        assert_eq!(record(json!({"name": "no id"})).id(), None);
    }

    #[test]
    fn record_parses_from_json_object_only() {
        let parsed = Record::from_json(r#"{"name":"X"}"#).unwrap();
        assert_eq!(parsed.get("name"), Some(&json!("X")));
        assert_eq!(parsed.fields().len(), 1);

        assert!(Record::from_json("[1, 2, 3]").is_err());
        assert!(Record::from_json("not json").is_err());
    }

    #[test]
    fn filter_parses_from_json_text() {
        let filter = Filter::from_json(r#"{"group":"A"}"#).unwrap();
        assert!(filter.matches(&record(json!({"id": 1, "group": "A"}))));
        assert!(!filter.matches(&record(json!({"id": 2, "group": "B"}))));

        assert!(Filter::from_json("12").is_err());
    }
}
