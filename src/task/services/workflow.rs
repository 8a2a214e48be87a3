//! Task creation, editing, and confirmed deletion.

use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::record::{
    domain::Entity,
    ports::RecordStore,
    services::{CollectionError, EntityCollection},
};
use crate::task::domain::{ActivityAction, NewTask, Task, TaskId, TaskPatch};

use super::ActivityRecorder;

/// Service-level errors for task workflow operations.
#[derive(Debug, Error)]
pub enum TaskWorkflowError {
    /// Collection operation failed.
    #[error(transparent)]
    Collection(#[from] CollectionError),
}

/// Result type for task workflow operations.
pub type TaskWorkflowResult<T> = Result<T, TaskWorkflowError>;

/// Answer to the delete confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// The user confirmed the deletion.
    Confirmed,
    /// The user dismissed the prompt.
    Declined,
}

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The task was deleted.
    Deleted,
    /// The prompt was declined; nothing was sent.
    Cancelled,
}

/// Task workflow orchestration service.
pub struct TaskWorkflowService<S>
where
    S: RecordStore,
{
    tasks: Arc<EntityCollection<Task, S>>,
    activity: ActivityRecorder<S>,
}

impl<S> TaskWorkflowService<S>
where
    S: RecordStore,
{
    /// Creates a workflow service over the shared task collection.
    #[must_use]
    pub const fn new(tasks: Arc<EntityCollection<Task, S>>, activity: ActivityRecorder<S>) -> Self {
        Self { tasks, activity }
    }

    /// Returns the underlying task collection.
    #[must_use]
    pub fn tasks(&self) -> &EntityCollection<Task, S> {
        &self.tasks
    }

    /// Creates a task from a validated payload.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Collection`] when the store rejects the
    /// task.
    pub async fn create_task(&self, request: NewTask) -> TaskWorkflowResult<Task> {
        let task = self.tasks.create(&request).await?;
        info!(task = %task.id(), status = %task.status(), "task created");
        self.activity
            .record(
                Task::TABLE,
                task.id().into(),
                ActivityAction::Created,
                Some(task.title().to_owned()),
            )
            .await;
        Ok(task)
    }

    /// Applies a patch to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Collection`] when the store rejects the
    /// patch or the task does not exist.
    pub async fn edit_task(&self, id: TaskId, patch: TaskPatch) -> TaskWorkflowResult<Task> {
        let current = self.tasks.find(id.into());
        if let Some(task) = current.as_ref().filter(|_| patch.is_empty()) {
            return Ok(task.clone());
        }
        let task = self.tasks.update(id.into(), &patch).await?;
        let change = current
            .as_ref()
            .map(Task::status)
            .zip(patch.new_status())
            .filter(|(from, to)| from != to);
        if let Some((from, to)) = change {
            self.activity
                .record(
                    Task::TABLE,
                    id.into(),
                    ActivityAction::StatusChanged,
                    Some(format!("{from} -> {to}")),
                )
                .await;
        }
        Ok(task)
    }

    /// Deletes a task once the user has confirmed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Collection`] when the store rejects the
    /// deletion.
    pub async fn delete_task(
        &self,
        id: TaskId,
        confirmation: Confirmation,
    ) -> TaskWorkflowResult<DeleteOutcome> {
        if confirmation == Confirmation::Declined {
            return Ok(DeleteOutcome::Cancelled);
        }
        self.tasks.delete(id.into()).await?;
        info!(task = %id, "task deleted");
        self.activity
            .record(Task::TABLE, id.into(), ActivityAction::Deleted, None)
            .await;
        Ok(DeleteOutcome::Deleted)
    }
}
