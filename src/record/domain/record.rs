//! Raw record value as held by the record store.

use super::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Loosely typed field map of a record.
pub type RecordFields = serde_json::Map<String, Value>;

/// Record as stored and returned by a record store.
///
/// The store owns `id`, `created_at`, and `updated_at`; every other field
/// lives in the untyped field map until an [`super::Entity`] validates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    id: RecordId,
    fields: RecordFields,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Record {
    /// Creates a record with store-assigned metadata.
    #[must_use]
    pub const fn new(id: RecordId, fields: RecordFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            fields,
            created_at,
            updated_at: created_at,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> RecordId {
        self.id
    }

    /// Returns the raw field map.
    #[must_use]
    pub const fn fields(&self) -> &RecordFields {
        &self.fields
    }

    /// Returns a field value, treating JSON `null` as absent.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).filter(|value| !value.is_null())
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Merges `patch` into the field map and bumps `updated_at`.
    ///
    /// Store-owned keys (`id`, `created_at`, `updated_at`) in the patch are
    /// ignored.
    pub fn apply_patch(&mut self, patch: RecordFields, at: DateTime<Utc>) {
        for (key, value) in patch {
            if is_reserved(&key) {
                continue;
            }
            self.fields.insert(key, value);
        }
        self.updated_at = at;
    }

    /// Flattens the record into a single JSON object including the
    /// store-owned metadata, ready for row deserialisation.
    #[must_use]
    pub fn to_row_value(&self) -> Value {
        let mut row = self.fields.clone();
        row.insert("id".to_owned(), Value::String(self.id.to_string()));
        row.insert(
            "created_at".to_owned(),
            Value::String(self.created_at.to_rfc3339()),
        );
        row.insert(
            "updated_at".to_owned(),
            Value::String(self.updated_at.to_rfc3339()),
        );
        Value::Object(row)
    }
}

/// Returns whether a field name is owned by the store.
#[must_use]
pub(crate) fn is_reserved(key: &str) -> bool {
    matches!(key, "id" | "created_at" | "updated_at")
}
