//! In-memory adapters used by tests and local tooling.

mod notifier;
mod store;

pub use notifier::RecordingNotifier;
pub use store::InMemoryRecordStore;
