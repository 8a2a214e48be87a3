//! Typed-entity contract for validating records at the store boundary.

use super::{Record, RecordFields, RecordId, RecordSchemaError};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

/// A typed entity backed by a record store table.
///
/// Implementations own the mapping between loosely typed [`Record`]s and a
/// fully typed value. Decoding is the only place where raw fields are
/// inspected.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Payload used to create a new record.
    type Draft: Serialize + Send + Sync;
    /// Partial update payload; `None` fields must be skipped when
    /// serialised.
    type Patch: Serialize + Send + Sync;

    /// Table holding the entity's records.
    const TABLE: &'static str;

    /// Lowercase singular name used in user notifications, e.g. `task`.
    const LABEL: &'static str;

    /// Validates a raw record into the typed entity.
    ///
    /// # Errors
    ///
    /// Returns [`RecordSchemaError`] when required fields are missing or
    /// hold values of the wrong shape.
    fn from_record(record: &Record) -> Result<Self, RecordSchemaError>;

    /// Returns the store-assigned identifier of the entity.
    fn record_id(&self) -> RecordId;
}

/// Deserialises the flattened form of `record` into a loose row type.
///
/// # Errors
///
/// Returns [`RecordSchemaError::Malformed`] when serde rejects the row.
pub fn decode_row<T: DeserializeOwned>(record: &Record) -> Result<T, RecordSchemaError> {
    serde_json::from_value(record.to_row_value())
        .map_err(|err| RecordSchemaError::Malformed(err.to_string()))
}

/// Serialises a draft or patch payload into record fields.
///
/// # Errors
///
/// Returns [`RecordSchemaError::NotAnObject`] when the payload does not
/// serialise to a JSON object, or [`RecordSchemaError::Malformed`] when
/// serialisation fails.
pub fn encode_fields<T: Serialize>(payload: &T) -> Result<RecordFields, RecordSchemaError> {
    match serde_json::to_value(payload) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(RecordSchemaError::NotAnObject),
        Err(err) => Err(RecordSchemaError::Malformed(err.to_string())),
    }
}
