//! Domain model for the task workflow.
//!
//! Tasks are validated at the record-store boundary, narrowed by the
//! filter layer, partitioned into board columns, and moved between columns
//! by drag gestures. None of these types perform I/O.

mod activity;
mod board;
mod drag;
mod employee;
mod error;
mod filter;
mod ids;
mod priority;
mod schema;
mod status;
mod task;

pub use activity::{ActivityAction, ActivityEntry, ActivityPatch, NewActivityEntry};
pub use board::{Board, BoardColumn, BoardSummary};
pub use drag::{DragPhase, DragStart, DropEvent};
pub use employee::{Employee, EmployeePatch, NewEmployee};
pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use filter::{ANY_SENTINEL, Criterion, DateRange, TaskFilter};
pub use ids::{EmployeeId, ProjectId, TaskId};
pub use priority::TaskPriority;
pub use schema::parse_due_date;
pub use status::{ColumnStyle, TaskStatus};
pub use task::{NewTask, PersistedTaskData, Task, TaskPatch};
