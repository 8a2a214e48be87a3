//! Task board workflow.
//!
//! Tasks are loaded through an [`crate::record::services::EntityCollection`],
//! narrowed by a [`domain::TaskFilter`], grouped into a [`domain::Board`],
//! and moved between columns by drag gestures or a status select, both of
//! which commit through [`services::BoardCoordinator`]. The module follows
//! the same layering as [`crate::record`]:
//!
//! - Domain types in [`domain`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
