//! Record store port: list, insert, update, and delete records by table.

use crate::record::domain::{Record, RecordFields, RecordId, RecordQuery, TableName};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for record store operations.
pub type RecordStoreResult<T> = Result<T, RecordStoreError>;

/// Remote record store contract.
///
/// The store owns durability and identifiers. Callers consume exactly these
/// four operation shapes and assume nothing about the underlying storage.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Lists the records of `table` satisfying `query`, in store order.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::Unavailable`] when the store cannot be
    /// reached or the query fails.
    async fn list(&self, table: &TableName, query: &RecordQuery)
    -> RecordStoreResult<Vec<Record>>;

    /// Creates a record and returns it with store-assigned metadata.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::Rejected`] when the store refuses the
    /// payload.
    async fn insert(&self, table: &TableName, fields: RecordFields) -> RecordStoreResult<Record>;

    /// Merges `patch` into an existing record and returns the result.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::NotFound`] when the record does not
    /// exist.
    async fn update(
        &self,
        table: &TableName,
        id: RecordId,
        patch: RecordFields,
    ) -> RecordStoreResult<Record>;

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::NotFound`] when the record does not
    /// exist.
    async fn delete(&self, table: &TableName, id: RecordId) -> RecordStoreResult<()>;
}

/// Operation kinds exposed by [`RecordStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    /// Collection listing.
    List,
    /// Record creation.
    Insert,
    /// Record update.
    Update,
    /// Record deletion.
    Delete,
}

impl StoreOperation {
    /// Returns the operation name used in logs and monitors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors returned by record store implementations.
#[derive(Debug, Clone, Error)]
pub enum RecordStoreError {
    /// The record does not exist in the table.
    #[error("record {id} not found in table {table}")]
    NotFound {
        /// Table that was searched.
        table: TableName,
        /// Missing record identifier.
        id: RecordId,
    },

    /// The store refused the operation.
    #[error("store rejected {operation} on {table}: {reason}")]
    Rejected {
        /// Rejected operation.
        operation: StoreOperation,
        /// Target table.
        table: TableName,
        /// Store-provided reason.
        reason: String,
    },

    /// The store could not be reached or failed internally.
    #[error("store unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl RecordStoreError {
    /// Wraps an infrastructure error.
    #[must_use]
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }

    /// Builds a rejection error.
    #[must_use]
    pub fn rejected(operation: StoreOperation, table: &TableName, reason: impl Into<String>) -> Self {
        Self::Rejected {
            operation,
            table: table.clone(),
            reason: reason.into(),
        }
    }
}
