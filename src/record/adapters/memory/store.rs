//! In-memory record store that owns identifiers and timestamps.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::record::{
    domain::{Record, RecordFields, RecordId, RecordQuery, TableName, is_reserved},
    ports::{RecordStore, RecordStoreError, RecordStoreResult},
};

/// Thread-safe in-memory record store.
///
/// Tables keep records in insertion order, which is the order listings
/// return them in.
pub struct InMemoryRecordStore<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<InMemoryStoreState>>,
    clock: Arc<C>,
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    tables: HashMap<TableName, Vec<Record>>,
}

impl InMemoryRecordStore<DefaultClock> {
    /// Creates an empty store driven by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryRecordStore<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> std::fmt::Debug for InMemoryRecordStore<C>
where
    C: Clock + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRecordStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<C> Clone for InMemoryRecordStore<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> InMemoryRecordStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store stamping records with `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryStoreState::default())),
            clock,
        }
    }

    /// Returns the number of records held in `table`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::Unavailable`] if the state lock is
    /// poisoned.
    pub fn record_count(&self, table: &TableName) -> RecordStoreResult<usize> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tables.get(table).map_or(0, Vec::len))
    }
}

fn lock_error(err: impl std::fmt::Display) -> RecordStoreError {
    RecordStoreError::unavailable(std::io::Error::other(err.to_string()))
}

fn not_found(table: &TableName, id: RecordId) -> RecordStoreError {
    RecordStoreError::NotFound {
        table: table.clone(),
        id,
    }
}

#[async_trait]
impl<C> RecordStore for InMemoryRecordStore<C>
where
    C: Clock + Send + Sync,
{
    async fn list(
        &self,
        table: &TableName,
        query: &RecordQuery,
    ) -> RecordStoreResult<Vec<Record>> {
        let state = self.state.read().map_err(lock_error)?;
        let records = state
            .tables
            .get(table)
            .map(|records| {
                records
                    .iter()
                    .filter(|record| query.matches(record))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(records)
    }

    async fn insert(&self, table: &TableName, fields: RecordFields) -> RecordStoreResult<Record> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored_fields = fields
            .into_iter()
            .filter(|(key, _)| !is_reserved(key))
            .collect();
        let record = Record::new(RecordId::new(), stored_fields, self.clock.utc());
        state
            .tables
            .entry(table.clone())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        table: &TableName,
        id: RecordId,
        patch: RecordFields,
    ) -> RecordStoreResult<Record> {
        let mut state = self.state.write().map_err(lock_error)?;
        let record = state
            .tables
            .get_mut(table)
            .and_then(|records| records.iter_mut().find(|record| record.id() == id))
            .ok_or_else(|| not_found(table, id))?;
        record.apply_patch(patch, self.clock.utc());
        Ok(record.clone())
    }

    async fn delete(&self, table: &TableName, id: RecordId) -> RecordStoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let records = state
            .tables
            .get_mut(table)
            .ok_or_else(|| not_found(table, id))?;
        let position = records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| not_found(table, id))?;
        records.remove(position);
        Ok(())
    }
}
