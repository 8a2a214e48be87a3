//! Taskdeck: task board workflow for a multi-tenant business suite.
//!
//! The crate models tasks moving across a kanban board: a pure filter
//! layer, a board partitioned by status, an optimistic drag-and-drop commit
//! coordinator, and cached data-access collections over an abstract record
//! store.
//!
//! # Architecture
//!
//! Taskdeck follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory store,
//!   request monitor, notifiers)
//! - **Services**: Orchestration over ports (collections, board
//!   coordination)
//!
//! # Modules
//!
//! - [`record`]: Record store boundary, collection cache, and data-access
//!   collections
//! - [`task`]: Task model, filtering, board, and drag-and-drop workflow
//! - [`suite`]: Composition root wiring one board over a store
//! - [`config`]: Environment configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod config;
pub mod record;
pub mod suite;
pub mod task;
pub mod telemetry;
