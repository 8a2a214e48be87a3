//! Error types for task domain validation and parsing.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing or transitioning task domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The employee name is empty after trimming.
    #[error("employee name must not be empty")]
    EmptyEmployeeName,

    /// A task identifier could not be parsed.
    #[error("invalid task identifier: {0}")]
    InvalidTaskId(String),

    /// An employee or project reference could not be parsed.
    #[error("invalid reference identifier: {0}")]
    InvalidReference(String),

    /// A board column identifier does not name a task status.
    #[error("unknown board column: {0}")]
    UnknownColumn(String),

    /// A date range starts after it ends.
    #[error("invalid date range: {start} is after {end}")]
    InvalidDateRange {
        /// Range start.
        start: DateTime<Utc>,
        /// Range end.
        end: DateTime<Utc>,
    },

    /// A calendar date could not be expanded into a timestamp.
    #[error("date out of range: {0}")]
    DateOutOfRange(String),

    /// A drag gesture received an event its current phase cannot accept.
    #[error("drag gesture cannot {event} while {phase}")]
    InvalidDragTransition {
        /// Phase the gesture was in.
        phase: &'static str,
        /// Rejected event.
        event: &'static str,
    },
}

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
