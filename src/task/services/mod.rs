//! Application services for the task board workflow.

mod activity;
mod coordinator;
mod workflow;

pub use activity::ActivityRecorder;
pub use coordinator::{BoardCoordinator, DragGesture, DropOutcome};
pub use workflow::{Confirmation, DeleteOutcome, TaskWorkflowError, TaskWorkflowService};
