//! Task fixtures shared by the unit tests.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::task::domain::{PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus};

pub use crate::record::tests::support::FixedClock;

/// Midnight UTC of an ISO calendar day.
pub fn day(iso: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .expect("valid day")
        .and_hms_opt(0, 0, 0)
        .expect("valid midnight")
        .and_utc()
}

/// Persisted data for a task with only a title and status set.
pub fn task_data(title: &str, status: TaskStatus) -> PersistedTaskData {
    let created = day("2024-12-01");
    PersistedTaskData {
        id: TaskId::from_uuid(Uuid::new_v4()),
        title: title.to_owned(),
        description: None,
        status,
        priority: TaskPriority::Medium,
        assigned_to: None,
        due_date: None,
        project_id: None,
        created_at: created,
        updated_at: created,
    }
}

pub fn task(title: &str, status: TaskStatus) -> Task {
    Task::from_persisted(task_data(title, status))
}

pub fn due_task(title: &str, status: TaskStatus, due: &str) -> Task {
    Task::from_persisted(PersistedTaskData {
        due_date: Some(day(due)),
        ..task_data(title, status)
    })
}

pub fn titles<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Vec<&'a str> {
    tasks.into_iter().map(Task::title).collect()
}
