//! Port contracts for the record store boundary.
//!
//! Ports define infrastructure-agnostic interfaces used by collections and
//! workflow services.

pub mod notifier;
pub mod store;

pub use notifier::{Notification, NotificationLevel, Notifier};
pub use store::{RecordStore, RecordStoreError, RecordStoreResult, StoreOperation};
