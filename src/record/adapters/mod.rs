//! Adapter implementations for the record store ports.

pub mod instrumented;
pub mod memory;
pub mod tracing_notifier;

pub use instrumented::{InstrumentedRecordStore, RequestLogEntry, RequestMonitor, RequestOutcome};
pub use tracing_notifier::TracingNotifier;
