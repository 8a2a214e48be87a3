//! Drag-and-drop gesture model for the board.
//!
//! The interaction library reports drag starts and drops with string column
//! identifiers. A gesture moves through [`DragPhase`] as follows:
//!
//! ```text
//! Idle -> Dragging -> Idle          (dropped outside any column)
//!                  -> Committing -> Reconciled   (update succeeded)
//!                                -> Failed       (update rejected)
//! ```

use super::{TaskDomainError, TaskId, TaskStatus};

/// Drag-start event from the interaction library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragStart {
    /// Identifier of the dragged card.
    pub draggable_id: String,
    /// Column the card was picked up from.
    pub source_column: String,
}

impl DragStart {
    /// Creates a drag-start event.
    #[must_use]
    pub fn new(draggable_id: impl Into<String>, source_column: impl Into<String>) -> Self {
        Self {
            draggable_id: draggable_id.into(),
            source_column: source_column.into(),
        }
    }
}

/// Drop event from the interaction library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropEvent {
    /// Identifier of the dragged card.
    pub draggable_id: String,
    /// Column the card was picked up from.
    pub source_column: String,
    /// Column the card was released over; `None` outside any column.
    pub destination_column: Option<String>,
    /// Position within the destination column.
    pub destination_index: usize,
}

impl DropEvent {
    /// Creates a drop onto `destination_column` at `destination_index`.
    #[must_use]
    pub fn onto(
        draggable_id: impl Into<String>,
        source_column: impl Into<String>,
        destination_column: impl Into<String>,
        destination_index: usize,
    ) -> Self {
        Self {
            draggable_id: draggable_id.into(),
            source_column: source_column.into(),
            destination_column: Some(destination_column.into()),
            destination_index,
        }
    }

    /// Creates a drop released outside every column.
    #[must_use]
    pub fn outside(draggable_id: impl Into<String>, source_column: impl Into<String>) -> Self {
        Self {
            draggable_id: draggable_id.into(),
            source_column: source_column.into(),
            destination_column: None,
            destination_index: 0,
        }
    }

    /// Resolves the destination column, treating unknown identifiers as no
    /// destination.
    #[must_use]
    pub fn destination(&self) -> Option<TaskStatus> {
        self.destination_column
            .as_deref()
            .and_then(TaskStatus::from_column_id)
    }
}

/// Phase of a single drag gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragPhase {
    /// No gesture in progress.
    Idle,
    /// A card is being dragged.
    Dragging {
        /// Dragged task.
        task_id: TaskId,
        /// Column the card came from.
        source: TaskStatus,
    },
    /// The status update is in flight.
    Committing {
        /// Dragged task.
        task_id: TaskId,
        /// Column the card came from.
        from: TaskStatus,
        /// Column the card was dropped on.
        to: TaskStatus,
    },
    /// The update succeeded and the board was re-derived.
    Reconciled {
        /// Dragged task.
        task_id: TaskId,
        /// Status confirmed by the store.
        status: TaskStatus,
    },
    /// The update failed; the board relies on re-fetching to recover.
    Failed {
        /// Dragged task.
        task_id: TaskId,
        /// Rendered failure.
        reason: String,
    },
}

impl DragPhase {
    /// Returns the phase name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging { .. } => "dragging",
            Self::Committing { .. } => "committing",
            Self::Reconciled { .. } => "reconciled",
            Self::Failed { .. } => "failed",
        }
    }

    /// Starts dragging `task_id` out of `source`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDragTransition`] unless idle.
    pub fn start(self, task_id: TaskId, source: TaskStatus) -> Result<Self, TaskDomainError> {
        match self {
            Self::Idle => Ok(Self::Dragging { task_id, source }),
            other => Err(other.reject("start")),
        }
    }

    /// Releases the dragged card over `destination`.
    ///
    /// Without a destination the gesture returns to idle; any column,
    /// including the source one, begins a commit.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDragTransition`] unless dragging.
    pub fn release(self, destination: Option<TaskStatus>) -> Result<Self, TaskDomainError> {
        match (self, destination) {
            (Self::Dragging { .. }, None) => Ok(Self::Idle),
            (Self::Dragging { task_id, source }, Some(to)) => Ok(Self::Committing {
                task_id,
                from: source,
                to,
            }),
            (other, _) => Err(other.reject("drop")),
        }
    }

    /// Settles an in-flight commit with the store's answer.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDragTransition`] unless committing.
    pub fn settle(self, outcome: Result<TaskStatus, String>) -> Result<Self, TaskDomainError> {
        match (self, outcome) {
            (Self::Committing { task_id, .. }, Ok(status)) => {
                Ok(Self::Reconciled { task_id, status })
            }
            (Self::Committing { task_id, .. }, Err(reason)) => {
                Ok(Self::Failed { task_id, reason })
            }
            (other, _) => Err(other.reject("settle")),
        }
    }

    fn reject(&self, event: &'static str) -> TaskDomainError {
        TaskDomainError::InvalidDragTransition {
            phase: self.name(),
            event,
        }
    }
}
