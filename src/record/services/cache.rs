//! Explicit collection cache shared by every view in a session.
//!
//! The cache is a constructed value handed to collections through `Arc`,
//! never ambient global state. Invalidation is explicit and ordered: each
//! key carries a generation counter, and a load that was started before an
//! invalidation cannot write its now-stale result back.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;
use tracing::debug;

use crate::record::domain::{Record, RecordQuery, TableName};

const INVALIDATION_CHANNEL_CAPACITY: usize = 64;

/// Cache key identifying one table listing under one query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    table: TableName,
    query: String,
}

impl CacheKey {
    /// Builds the key for listing `table` with `query`.
    #[must_use]
    pub fn new(table: &TableName, query: &RecordQuery) -> Self {
        Self {
            table: table.clone(),
            query: query.to_string(),
        }
    }

    /// Returns the table the key belongs to.
    #[must_use]
    pub const fn table(&self) -> &TableName {
        &self.table
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}?{}", self.table, self.query)
    }
}

/// Proof that a load began at a given key generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    key: CacheKey,
    generation: u64,
}

impl LoadTicket {
    /// Returns the key being loaded.
    #[must_use]
    pub const fn key(&self) -> &CacheKey {
        &self.key
    }
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<CacheKey, Arc<Vec<Record>>>,
    generations: HashMap<CacheKey, u64>,
}

impl CacheState {
    fn generation(&self, key: &CacheKey) -> u64 {
        self.generations.get(key).copied().unwrap_or_default()
    }

    fn bump(&mut self, key: &CacheKey) {
        let next = self.generation(key).wrapping_add(1);
        self.generations.insert(key.clone(), next);
    }
}

/// Process-wide cache of loaded record collections.
#[derive(Debug)]
pub struct CollectionCache {
    state: RwLock<CacheState>,
    invalidations: broadcast::Sender<CacheKey>,
}

impl Default for CollectionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectionCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        let (invalidations, _) = broadcast::channel(INVALIDATION_CHANNEL_CAPACITY);
        Self {
            state: RwLock::new(CacheState::default()),
            invalidations,
        }
    }

    /// Returns the cached records for `key`, if loaded and not invalidated.
    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<Arc<Vec<Record>>> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.entries.get(key).cloned()
    }

    /// Returns the number of cached collections.
    #[must_use]
    pub fn len(&self) -> usize {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.entries.len()
    }

    /// Returns `true` when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records the start of a load for `key`.
    #[must_use]
    pub fn begin_load(&self, key: &CacheKey) -> LoadTicket {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        LoadTicket {
            key: key.clone(),
            generation: state.generation(key),
        }
    }

    /// Returns `true` while no invalidation has followed `ticket`.
    #[must_use]
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.generation(&ticket.key) == ticket.generation
    }

    /// Stores the result of a load started with `ticket`.
    ///
    /// Returns `false` and discards `records` when the key was invalidated
    /// after the ticket was issued.
    pub fn complete_load(&self, ticket: LoadTicket, records: Vec<Record>) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.generation(&ticket.key) != ticket.generation {
            debug!(key = %ticket.key, "discarding load superseded by invalidation");
            return false;
        }
        state.entries.insert(ticket.key, Arc::new(records));
        true
    }

    /// Drops the cached collection for `key` and notifies subscribers.
    ///
    /// Returns `true` when a collection was cached under `key`.
    pub fn invalidate(&self, key: &CacheKey) -> bool {
        let was_cached = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.bump(key);
            state.entries.remove(key).is_some()
        };
        self.announce(key.clone());
        was_cached
    }

    /// Invalidates every key of `table`, returning how many keys were
    /// affected.
    pub fn invalidate_table(&self, table: &TableName) -> usize {
        let keys: Vec<CacheKey> = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            let mut keys: Vec<CacheKey> = state
                .entries
                .keys()
                .chain(state.generations.keys())
                .filter(|key| key.table() == table)
                .cloned()
                .collect();
            keys.sort_by_key(ToString::to_string);
            keys.dedup();
            for key in &keys {
                state.bump(key);
                state.entries.remove(key);
            }
            keys
        };
        let affected = keys.len();
        for key in keys {
            self.announce(key);
        }
        affected
    }

    /// Subscribes to invalidated keys.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CacheKey> {
        self.invalidations.subscribe()
    }

    fn announce(&self, key: CacheKey) {
        debug!(key = %key, "collection invalidated");
        if self.invalidations.send(key).is_err() {
            debug!("no invalidation subscribers");
        }
    }
}
