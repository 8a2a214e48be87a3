//! Per-entity data-access collection over the record store.
//!
//! A collection loads one table listing through the shared
//! [`CollectionCache`], decodes it into typed entities, and exposes
//! create/update/delete operations that invalidate and re-fetch on success
//! and notify the user on failure.

use std::marker::PhantomData;
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};
use thiserror::Error;
use tracing::{debug, warn};

use super::{CacheKey, CollectionCache};
use crate::record::{
    domain::{Entity, Record, RecordId, RecordQuery, RecordSchemaError, TableName, encode_fields},
    ports::{Notification, Notifier, RecordStore, RecordStoreError},
};

/// Errors returned by collection operations.
#[derive(Debug, Clone, Error)]
pub enum CollectionError {
    /// A record or payload failed schema validation.
    #[error(transparent)]
    Schema(#[from] RecordSchemaError),
    /// The record store rejected or failed the operation.
    #[error(transparent)]
    Store(#[from] RecordStoreError),
}

/// Result type for collection operations.
pub type CollectionResult<T> = Result<T, CollectionError>;

/// Which mutation outcomes a collection reports through its notifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotifyPolicy {
    /// Report successes and failures.
    #[default]
    All,
    /// Report failures only.
    ErrorsOnly,
    /// Report nothing; failures are still logged and returned.
    Silent,
}

/// Snapshot of a collection's visible state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadState<E> {
    /// Most recently loaded entities; kept when a later load fails.
    pub items: Vec<E>,
    /// Whether a load is in flight.
    pub loading: bool,
    /// Message of the last failed load, cleared by a successful one.
    pub error: Option<String>,
    /// Number of records skipped by schema validation in the last load.
    pub rejected: usize,
}

impl<E> Default for LoadState<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            rejected: 0,
        }
    }
}

#[derive(Debug)]
struct CollectionState<E> {
    view: LoadState<E>,
    in_flight: usize,
}

impl<E> Default for CollectionState<E> {
    fn default() -> Self {
        Self {
            view: LoadState::default(),
            in_flight: 0,
        }
    }
}

/// Data-access collection for one entity type.
pub struct EntityCollection<E, S>
where
    E: Entity,
    S: RecordStore,
{
    store: Arc<S>,
    cache: Arc<CollectionCache>,
    notifier: Arc<dyn Notifier>,
    table: TableName,
    scope: RecordQuery,
    key: CacheKey,
    policy: NotifyPolicy,
    state: RwLock<CollectionState<E>>,
    entity: PhantomData<fn() -> E>,
}

impl<E, S> EntityCollection<E, S>
where
    E: Entity,
    S: RecordStore,
{
    /// Creates a collection over the entity's table.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Schema`] when the entity declares an
    /// invalid table name.
    pub fn new(
        store: Arc<S>,
        cache: Arc<CollectionCache>,
        notifier: Arc<dyn Notifier>,
    ) -> CollectionResult<Self> {
        let table = TableName::new(E::TABLE)?;
        let scope = RecordQuery::all();
        let key = CacheKey::new(&table, &scope);
        Ok(Self {
            store,
            cache,
            notifier,
            table,
            scope,
            key,
            policy: NotifyPolicy::default(),
            state: RwLock::new(CollectionState::default()),
            entity: PhantomData,
        })
    }

    /// Restricts listings to records matching `scope` and stamps its
    /// equality fields onto created records.
    #[must_use]
    pub fn with_scope(mut self, scope: RecordQuery) -> Self {
        self.key = CacheKey::new(&self.table, &scope);
        self.scope = scope;
        self
    }

    /// Sets which mutation outcomes are reported to the user.
    #[must_use]
    pub const fn with_notify_policy(mut self, policy: NotifyPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the table backing the collection.
    #[must_use]
    pub const fn table(&self) -> &TableName {
        &self.table
    }

    /// Returns the cache key of the collection's listing.
    #[must_use]
    pub const fn cache_key(&self) -> &CacheKey {
        &self.key
    }

    /// Returns a snapshot of the visible state.
    #[must_use]
    pub fn state(&self) -> LoadState<E> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .view
            .clone()
    }

    /// Returns the currently visible entities.
    #[must_use]
    pub fn items(&self) -> Vec<E> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .view
            .items
            .clone()
    }

    /// Returns the visible entity with identifier `id`.
    #[must_use]
    pub fn find(&self, id: RecordId) -> Option<E> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .view
            .items
            .iter()
            .find(|item| item.record_id() == id)
            .cloned()
    }

    /// Loads the collection, serving the cached listing when present.
    ///
    /// A failed load keeps the previously visible items and records the
    /// failure in [`LoadState::error`]. A load overtaken by an invalidation
    /// leaves the visible state to the load that superseded it.
    pub async fn load(&self) -> LoadState<E> {
        let ticket = {
            let mut state = self.write_state();
            if let Some(records) = self.cache.get(&self.key) {
                let (items, rejected) = self.decode(&records);
                Self::show(&mut state.view, items, rejected);
                return state.view.clone();
            }
            state.in_flight += 1;
            state.view.loading = true;
            self.cache.begin_load(&self.key)
        };

        let listing = self
            .store
            .list(&self.table, &self.scope)
            .await
            .map(|records| {
                let decoded = self.decode(&records);
                (records, decoded)
            });

        let mut state = self.write_state();
        state.in_flight = state.in_flight.saturating_sub(1);
        state.view.loading = state.in_flight > 0;
        match listing {
            Ok((records, (items, rejected))) => {
                if self.cache.complete_load(ticket, records) {
                    Self::show(&mut state.view, items, rejected);
                } else {
                    debug!(key = %self.key, "listing superseded by a newer load");
                }
            }
            Err(err) => {
                warn!(table = %self.table, error = %err, "collection load failed");
                if self.cache.is_current(&ticket) {
                    state.view.error = Some(err.to_string());
                }
            }
        }
        state.view.clone()
    }

    /// Invalidates the cached listing and loads it again.
    pub async fn refetch(&self) -> LoadState<E> {
        self.invalidate();
        self.load().await
    }

    /// Drops the cached listing without loading.
    pub fn invalidate(&self) {
        self.cache.invalidate(&self.key);
    }

    /// Creates a record from `draft`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError`] when the payload is invalid or the store
    /// rejects it. The failure is also delivered as an error notification.
    pub async fn create(&self, draft: &E::Draft) -> CollectionResult<E> {
        let result = self.try_create(draft).await;
        self.settle(result, "created", "create").await
    }

    /// Applies `patch` to the record `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError`] when the patch is invalid or the store
    /// rejects it. The failure is also delivered as an error notification.
    pub async fn update(&self, id: RecordId, patch: &E::Patch) -> CollectionResult<E> {
        let result = self.try_update(id, patch).await;
        self.settle(result, "updated", "update").await
    }

    /// Deletes the record `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Store`] when the store rejects the
    /// deletion. The failure is also delivered as an error notification.
    pub async fn delete(&self, id: RecordId) -> CollectionResult<()> {
        let result = self
            .store
            .delete(&self.table, id)
            .await
            .map_err(CollectionError::from);
        self.settle(result, "deleted", "delete").await
    }

    async fn try_create(&self, draft: &E::Draft) -> CollectionResult<E> {
        let mut fields = encode_fields(draft)?;
        for (field, value) in self.scope.predicates() {
            fields
                .entry(field.to_owned())
                .or_insert_with(|| value.clone());
        }
        let record = self.store.insert(&self.table, fields).await?;
        Ok(E::from_record(&record)?)
    }

    async fn try_update(&self, id: RecordId, patch: &E::Patch) -> CollectionResult<E> {
        let fields = encode_fields(patch)?;
        let record = self.store.update(&self.table, id, fields).await?;
        Ok(E::from_record(&record)?)
    }

    /// Notifies the outcome of a mutation and re-fetches after any store
    /// write that may have landed.
    async fn settle<T>(
        &self,
        result: CollectionResult<T>,
        past: &str,
        verb: &str,
    ) -> CollectionResult<T> {
        match &result {
            Ok(_) => {
                self.refetch().await;
                if self.policy == NotifyPolicy::All {
                    self.notifier.notify(Notification::success(
                        format!("{} {past}", capitalize(E::LABEL)),
                        format!("The {} was {past}.", E::LABEL),
                    ));
                }
            }
            Err(err) => {
                warn!(table = %self.table, operation = verb, error = %err, "collection mutation failed");
                if matches!(err, CollectionError::Schema(_)) {
                    self.refetch().await;
                }
                if self.policy != NotifyPolicy::Silent {
                    self.notifier.notify(Notification::error(
                        format!("Could not {verb} {}", E::LABEL),
                        err.to_string(),
                    ));
                }
            }
        }
        result
    }

    fn decode(&self, records: &[Record]) -> (Vec<E>, usize) {
        let mut rejected = 0_usize;
        let items: Vec<E> = records
            .iter()
            .filter_map(|record| match E::from_record(record) {
                Ok(item) => Some(item),
                Err(err) => {
                    warn!(
                        table = %self.table,
                        record = %record.id(),
                        error = %err,
                        "skipping record that failed validation"
                    );
                    rejected += 1;
                    None
                }
            })
            .collect();
        (items, rejected)
    }

    fn show(view: &mut LoadState<E>, items: Vec<E>, rejected: usize) {
        view.items = items;
        view.error = None;
        view.rejected = rejected;
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, CollectionState<E>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
