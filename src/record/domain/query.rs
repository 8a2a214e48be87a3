//! Filter predicates passed to record store listings.

use super::Record;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Conjunction of field equality predicates.
///
/// An empty query matches every record in a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordQuery {
    predicates: BTreeMap<String, Value>,
}

impl RecordQuery {
    /// Creates a query matching every record.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Adds an equality predicate on `field`.
    #[must_use]
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.predicates.insert(field.into(), value.into());
        self
    }

    /// Returns the equality predicates in field order.
    pub fn predicates(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.predicates
            .iter()
            .map(|(field, value)| (field.as_str(), value))
    }

    /// Returns `true` when the query has no predicates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Returns whether `record` satisfies every predicate.
    ///
    /// A predicate on `id` compares against the store-assigned identifier.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        self.predicates.iter().all(|(field, expected)| {
            if field == "id" {
                return expected.as_str() == Some(record.id().to_string().as_str());
            }
            record
                .fields()
                .get(field)
                .map_or(expected.is_null(), |actual| actual == expected)
        })
    }
}

impl fmt::Display for RecordQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.predicates.is_empty() {
            return write!(f, "*");
        }
        let mut first = true;
        for (field, value) in &self.predicates {
            if !first {
                write!(f, "&")?;
            }
            first = false;
            write!(f, "{field}={value}")?;
        }
        Ok(())
    }
}
