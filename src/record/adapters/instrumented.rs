//! Request-monitor decorator around any [`RecordStore`].
//!
//! Outgoing store calls are logged through `tracing` and captured into a
//! bounded [`RequestMonitor`] that a developer-tools panel can read. The
//! decorator wraps the store explicitly instead of patching a global
//! transport, so instrumentation composes with any store implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tracing::{debug, warn};

use crate::record::{
    domain::{Record, RecordFields, RecordId, RecordQuery, TableName},
    ports::{RecordStore, RecordStoreResult, StoreOperation},
};

/// Outcome of a monitored store request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The request succeeded and touched `records` records.
    Succeeded {
        /// Number of records returned or affected.
        records: usize,
    },
    /// The request failed.
    Failed {
        /// Rendered error message.
        error: String,
    },
}

/// One captured store request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLogEntry {
    /// Operation kind.
    pub operation: StoreOperation,
    /// Target table.
    pub table: TableName,
    /// Wall-clock start time.
    pub started_at: DateTime<Utc>,
    /// Time spent awaiting the inner store, measured on the injected clock.
    pub elapsed: Duration,
    /// Request outcome.
    pub outcome: RequestOutcome,
}

impl RequestLogEntry {
    /// Returns `true` when the request failed.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self.outcome, RequestOutcome::Failed { .. })
    }
}

/// Bounded ring of the most recent store requests.
///
/// Clones share the same buffer.
#[derive(Debug, Clone)]
pub struct RequestMonitor {
    capacity: usize,
    entries: Arc<RwLock<VecDeque<RequestLogEntry>>>,
}

impl RequestMonitor {
    /// Creates a monitor keeping at most `capacity` entries (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let bounded = capacity.max(1);
        Self {
            capacity: bounded,
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(bounded))),
        }
    }

    /// Returns the maximum number of retained entries.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends an entry, evicting the oldest one when full.
    pub fn record(&self, entry: RequestLogEntry) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Returns retained entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<RequestLogEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Returns retained failed entries, oldest first.
    #[must_use]
    pub fn failures(&self) -> Vec<RequestLogEntry> {
        self.entries()
            .into_iter()
            .filter(RequestLogEntry::is_failure)
            .collect()
    }

    /// Drops every retained entry.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// Record store decorator that logs and captures every request.
pub struct InstrumentedRecordStore<S, C>
where
    S: RecordStore,
    C: Clock + Send + Sync,
{
    inner: S,
    monitor: RequestMonitor,
    clock: Arc<C>,
}

impl<S, C> InstrumentedRecordStore<S, C>
where
    S: RecordStore,
    C: Clock + Send + Sync,
{
    /// Wraps `inner`, capturing requests into `monitor`.
    #[must_use]
    pub const fn new(inner: S, monitor: RequestMonitor, clock: Arc<C>) -> Self {
        Self {
            inner,
            monitor,
            clock,
        }
    }

    /// Returns the monitor receiving captured requests.
    #[must_use]
    pub const fn monitor(&self) -> &RequestMonitor {
        &self.monitor
    }

    /// Returns the wrapped store.
    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    async fn observe<T, F>(
        &self,
        operation: StoreOperation,
        table: &TableName,
        request: F,
        affected: fn(&T) -> usize,
    ) -> RecordStoreResult<T>
    where
        F: Future<Output = RecordStoreResult<T>> + Send,
        T: Send,
    {
        let started_at = self.clock.utc();
        let result = request.await;
        let elapsed = (self.clock.utc() - started_at)
            .to_std()
            .unwrap_or_default();

        let outcome = match &result {
            Ok(value) => {
                let records = affected(value);
                debug!(
                    operation = %operation,
                    table = %table,
                    records,
                    elapsed = ?elapsed,
                    "record store request succeeded"
                );
                RequestOutcome::Succeeded { records }
            }
            Err(err) => {
                warn!(
                    operation = %operation,
                    table = %table,
                    error = %err,
                    elapsed = ?elapsed,
                    "record store request failed"
                );
                RequestOutcome::Failed {
                    error: err.to_string(),
                }
            }
        };

        self.monitor.record(RequestLogEntry {
            operation,
            table: table.clone(),
            started_at,
            elapsed,
            outcome,
        });
        result
    }
}

#[async_trait]
impl<S, C> RecordStore for InstrumentedRecordStore<S, C>
where
    S: RecordStore,
    C: Clock + Send + Sync,
{
    async fn list(
        &self,
        table: &TableName,
        query: &RecordQuery,
    ) -> RecordStoreResult<Vec<Record>> {
        self.observe(
            StoreOperation::List,
            table,
            self.inner.list(table, query),
            Vec::len,
        )
        .await
    }

    async fn insert(&self, table: &TableName, fields: RecordFields) -> RecordStoreResult<Record> {
        self.observe(
            StoreOperation::Insert,
            table,
            self.inner.insert(table, fields),
            |_| 1,
        )
        .await
    }

    async fn update(
        &self,
        table: &TableName,
        id: RecordId,
        patch: RecordFields,
    ) -> RecordStoreResult<Record> {
        self.observe(
            StoreOperation::Update,
            table,
            self.inner.update(table, id, patch),
            |_| 1,
        )
        .await
    }

    async fn delete(&self, table: &TableName, id: RecordId) -> RecordStoreResult<()> {
        self.observe(
            StoreOperation::Delete,
            table,
            self.inner.delete(table, id),
            |_| 1,
        )
        .await
    }
}
