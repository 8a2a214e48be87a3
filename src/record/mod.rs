//! Record Store boundary for the business suite.
//!
//! Every entity the suite displays lives in a remote record store that owns
//! durability and identifiers. This module defines that boundary and the
//! client-side plumbing around it:
//!
//! - Record values, queries, and the typed-entity contract in [`domain`]
//! - The store and notification port contracts in [`ports`]
//! - In-memory and instrumented adapters in [`adapters`]
//! - The collection cache and per-entity data-access hooks in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod tests;
