//! Activity log entries written after selected task mutations.

use crate::record::domain::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of mutation an activity entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    /// A record was created.
    Created,
    /// A task changed status.
    StatusChanged,
    /// A record was deleted.
    Deleted,
}

impl ActivityAction {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::StatusChanged => "status_changed",
            Self::Deleted => "deleted",
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stored activity log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    pub(super) id: RecordId,
    pub(super) entity: String,
    pub(super) entity_id: RecordId,
    pub(super) action: ActivityAction,
    pub(super) detail: Option<String>,
    pub(super) created_at: DateTime<Utc>,
}

impl ActivityEntry {
    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> RecordId {
        self.id
    }

    /// Returns the table of the record the entry describes.
    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Returns the identifier of the record the entry describes.
    #[must_use]
    pub const fn entity_id(&self) -> RecordId {
        self.entity_id
    }

    /// Returns the recorded action.
    #[must_use]
    pub const fn action(&self) -> ActivityAction {
        self.action
    }

    /// Returns the free-form detail, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Returns when the entry was written.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Payload for writing an activity entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewActivityEntry {
    entity: String,
    entity_id: RecordId,
    action: ActivityAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl NewActivityEntry {
    /// Creates an entry for `action` on the record `entity_id` of table
    /// `entity`.
    #[must_use]
    pub fn new(entity: impl Into<String>, entity_id: RecordId, action: ActivityAction) -> Self {
        Self {
            entity: entity.into(),
            entity_id,
            action,
            detail: None,
        }
    }

    /// Attaches a free-form detail.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Activity entries are append-only; the patch can only amend the detail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivityPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}
