//! Client-side services over the record store: an explicit collection
//! cache and per-entity data-access collections.

mod cache;
mod collection;

pub use cache::{CacheKey, CollectionCache, LoadTicket};
pub use collection::{CollectionError, CollectionResult, EntityCollection, LoadState, NotifyPolicy};
