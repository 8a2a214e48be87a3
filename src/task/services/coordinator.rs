//! Optimistic drop-commit coordinator for the task board.
//!
//! A drop onto a column moves the card locally, issues exactly one status
//! update, and then re-derives the board from the authoritative collection.
//! A failed update is not retried and not rolled back by hand: the
//! collection is re-fetched and the board rebuilt from whatever the store
//! reports.

use mockable::Clock;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

use crate::record::{
    domain::Entity,
    ports::RecordStore,
    services::{CollectionError, EntityCollection},
};
use crate::task::domain::{
    ActivityAction, Board, BoardSummary, DragPhase, DragStart, DropEvent, Task, TaskDomainError,
    TaskFilter, TaskId, TaskPatch, TaskStatus,
};

use super::ActivityRecorder;

/// A drag gesture in progress.
///
/// The gesture is consumed by [`BoardCoordinator::drop`], so a gesture can
/// commit at most one mutation.
#[derive(Debug, PartialEq, Eq)]
pub struct DragGesture {
    task_id: TaskId,
    phase: DragPhase,
}

impl DragGesture {
    /// Returns the dragged task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the current phase of the gesture.
    #[must_use]
    pub const fn phase(&self) -> &DragPhase {
        &self.phase
    }
}

/// Result of a drop or status selection.
#[derive(Debug, Clone)]
pub enum DropOutcome {
    /// Nothing was sent: no destination, unknown card, or stale gesture.
    Ignored,
    /// The store accepted the update and the board was re-derived.
    Reconciled {
        /// Task as returned by the store.
        task: Task,
        /// Terminal phase of the gesture.
        phase: DragPhase,
    },
    /// The store rejected the update; the board was re-derived from a
    /// fresh fetch.
    Failed {
        /// Task whose update failed.
        task_id: TaskId,
        /// Failure reported by the collection.
        error: CollectionError,
        /// Terminal phase of the gesture.
        phase: DragPhase,
    },
}

impl DropOutcome {
    /// Returns the terminal phase of the gesture.
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        match self {
            Self::Ignored => DragPhase::Idle,
            Self::Reconciled { phase, .. } | Self::Failed { phase, .. } => phase.clone(),
        }
    }
}

/// Coordinates filtering, board derivation, and status commits.
pub struct BoardCoordinator<S, C>
where
    S: RecordStore,
    C: Clock + Send + Sync,
{
    tasks: Arc<EntityCollection<Task, S>>,
    activity: ActivityRecorder<S>,
    clock: Arc<C>,
    filter: RwLock<TaskFilter>,
    board: RwLock<Board>,
}

impl<S, C> BoardCoordinator<S, C>
where
    S: RecordStore,
    C: Clock + Send + Sync,
{
    /// Creates a coordinator over the shared task collection.
    #[must_use]
    pub fn new(
        tasks: Arc<EntityCollection<Task, S>>,
        activity: ActivityRecorder<S>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            activity,
            clock,
            filter: RwLock::new(TaskFilter::default()),
            board: RwLock::new(Board::default()),
        }
    }

    /// Returns the underlying task collection.
    #[must_use]
    pub fn tasks(&self) -> &EntityCollection<Task, S> {
        &self.tasks
    }

    /// Loads the task collection and re-derives the board.
    pub async fn refresh(&self) -> Board {
        self.tasks.load().await;
        self.rebuild()
    }

    /// Returns the current board.
    #[must_use]
    pub fn board(&self) -> Board {
        self.board
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns derived figures for the current board.
    #[must_use]
    pub fn summary(&self) -> BoardSummary {
        self.board
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .summary(self.clock.utc())
    }

    /// Returns the active filter.
    #[must_use]
    pub fn filter(&self) -> TaskFilter {
        self.filter
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the filter and re-derives the board from loaded tasks.
    pub fn set_filter(&self, filter: TaskFilter) -> Board {
        *self.filter.write().unwrap_or_else(PoisonError::into_inner) = filter;
        self.rebuild()
    }

    /// Starts a drag gesture.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTaskId`] or
    /// [`TaskDomainError::UnknownColumn`] when the event does not name a
    /// task and a board column.
    pub fn begin_drag(&self, start: &DragStart) -> Result<DragGesture, TaskDomainError> {
        let task_id = TaskId::from_str(&start.draggable_id)?;
        let source = TaskStatus::from_column_id(&start.source_column)
            .ok_or_else(|| TaskDomainError::UnknownColumn(start.source_column.clone()))?;
        let phase = DragPhase::Idle.start(task_id, source)?;
        debug!(task = %task_id, %source, "drag started");
        Ok(DragGesture { task_id, phase })
    }

    /// Completes a drag gesture.
    ///
    /// Drops outside any column, onto an unknown column, or carrying a
    /// different card are ignored without contacting the store. Any other
    /// drop, including one onto the source column, sends one status update.
    pub async fn drop(&self, gesture: DragGesture, event: &DropEvent) -> DropOutcome {
        let dropped = TaskId::from_str(&event.draggable_id).ok();
        if dropped != Some(gesture.task_id) {
            debug!(
                task = %gesture.task_id,
                draggable = %event.draggable_id,
                "drop does not match the dragged card"
            );
            return DropOutcome::Ignored;
        }

        let phase = match gesture.phase.release(event.destination()) {
            Ok(phase) => phase,
            Err(err) => {
                warn!(task = %gesture.task_id, error = %err, "ignoring drop");
                return DropOutcome::Ignored;
            }
        };
        if !matches!(phase, DragPhase::Committing { .. }) {
            debug!(task = %gesture.task_id, "drop outside any column");
            return DropOutcome::Ignored;
        }
        self.commit(phase, event.destination_index).await
    }

    /// Sets the status of `task_id` from a status select control.
    ///
    /// Runs the same commit as a drag onto the target column, so both paths
    /// leave the store in the same state.
    pub async fn change_status(&self, task_id: TaskId, status: TaskStatus) -> DropOutcome {
        let Some(current) = self.tasks.find(task_id.into()) else {
            debug!(task = %task_id, "status change for a task that is not loaded");
            return DropOutcome::Ignored;
        };
        let phase = DragPhase::Idle
            .start(task_id, current.status())
            .and_then(|dragging| dragging.release(Some(status)));
        match phase {
            Ok(committing) => self.commit(committing, usize::MAX).await,
            Err(err) => {
                warn!(task = %task_id, error = %err, "ignoring status change");
                DropOutcome::Ignored
            }
        }
    }

    async fn commit(&self, phase: DragPhase, index: usize) -> DropOutcome {
        let DragPhase::Committing { task_id, from, to } = phase else {
            return DropOutcome::Ignored;
        };
        info!(task = %task_id, %from, %to, "committing status change");
        self.move_locally(task_id, to, index);

        let result = self.tasks.update(task_id.into(), &TaskPatch::status(to)).await;
        let answer = result
            .as_ref()
            .map(Task::status)
            .map_err(ToString::to_string);
        let settled = phase.settle(answer).unwrap_or_else(|err| DragPhase::Failed {
            task_id,
            reason: err.to_string(),
        });
        debug!(task = %task_id, phase = settled.name(), "drop settled");

        match result {
            Ok(task) => {
                self.rebuild();
                self.activity
                    .record(
                        Task::TABLE,
                        task_id.into(),
                        ActivityAction::StatusChanged,
                        Some(format!("{from} -> {to}")),
                    )
                    .await;
                DropOutcome::Reconciled {
                    task,
                    phase: settled,
                }
            }
            Err(error) => {
                warn!(task = %task_id, error = %error, "status change failed, re-fetching tasks");
                self.tasks.refetch().await;
                self.rebuild();
                DropOutcome::Failed {
                    task_id,
                    error,
                    phase: settled,
                }
            }
        }
    }

    fn move_locally(&self, task_id: TaskId, to: TaskStatus, index: usize) {
        let mut board = self.board.write().unwrap_or_else(PoisonError::into_inner);
        if !board.move_task(task_id, to, index) {
            debug!(task = %task_id, "task not on the visible board");
        }
    }

    fn rebuild(&self) -> Board {
        let filtered = self.filter().apply(&self.tasks.items());
        let board = Board::from_tasks(filtered);
        *self.board.write().unwrap_or_else(PoisonError::into_inner) = board.clone();
        board
    }
}
