//! Error types for record validation and decoding.

use thiserror::Error;

/// Errors returned while validating raw records into typed values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordSchemaError {
    /// The identifier is not a valid UUID.
    #[error("invalid record identifier: {0}")]
    InvalidId(String),

    /// The table name is empty or uses unsupported characters.
    #[error("invalid table name '{0}', expected lowercase letters, digits, or underscores")]
    InvalidTableName(String),

    /// A required field is missing or null.
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// A field holds a value of the wrong shape.
    #[error("invalid value for field '{field}': {reason}")]
    InvalidField {
        /// Field name.
        field: &'static str,
        /// Human-readable reason.
        reason: String,
    },

    /// Serde could not map the record onto the expected row shape.
    #[error("malformed record: {0}")]
    Malformed(String),

    /// The payload did not serialise to a JSON object.
    #[error("record payload must serialise to an object")]
    NotAnObject,
}
