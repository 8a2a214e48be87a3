//! Best-effort activity logging for task mutations.

use std::sync::Arc;
use tracing::warn;

use crate::record::{domain::RecordId, ports::RecordStore, services::EntityCollection};
use crate::task::domain::{ActivityAction, ActivityEntry, NewActivityEntry};

/// Writes activity entries after mutations; disabled recorders are no-ops.
///
/// Activity is an ad hoc audit aid: a failure to write it is logged and
/// never reaches the user.
pub struct ActivityRecorder<S>
where
    S: RecordStore,
{
    log: Option<Arc<EntityCollection<ActivityEntry, S>>>,
}

impl<S> Clone for ActivityRecorder<S>
where
    S: RecordStore,
{
    fn clone(&self) -> Self {
        Self {
            log: self.log.clone(),
        }
    }
}

impl<S> ActivityRecorder<S>
where
    S: RecordStore,
{
    /// Creates a recorder writing to `log`.
    #[must_use]
    pub const fn new(log: Arc<EntityCollection<ActivityEntry, S>>) -> Self {
        Self { log: Some(log) }
    }

    /// Creates a recorder that writes nothing.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { log: None }
    }

    /// Returns whether entries are written.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.log.is_some()
    }

    /// Records `action` on the record `entity_id` of table `entity`.
    pub async fn record(
        &self,
        entity: &str,
        entity_id: RecordId,
        action: ActivityAction,
        detail: Option<String>,
    ) {
        let Some(log) = &self.log else {
            return;
        };
        let mut entry = NewActivityEntry::new(entity, entity_id, action);
        if let Some(text) = detail {
            entry = entry.with_detail(text);
        }
        if let Err(err) = log.create(&entry).await {
            warn!(entity, %entity_id, %action, error = %err, "failed to write activity entry");
        }
    }
}
