//! Record-store schema for task-domain entities.
//!
//! Raw records are deserialised into permissive row types and validated
//! here, so the rest of the crate only sees fully typed values. Task
//! status is normalised rather than rejected: the status set is closed
//! and anything outside it lands in `todo`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;

use super::{
    ActivityAction, ActivityEntry, ActivityPatch, Employee, EmployeeId, EmployeePatch,
    NewActivityEntry, NewEmployee, NewTask, PersistedTaskData, ProjectId, Task, TaskId,
    TaskPatch, TaskPriority, TaskStatus,
};
use crate::record::domain::{Entity, Record, RecordId, RecordSchemaError, decode_row};

#[derive(Debug, Deserialize)]
struct TaskRow {
    id: String,
    title: Option<String>,
    description: Option<String>,
    #[serde(default)]
    status: Value,
    priority: Option<String>,
    assigned_to: Option<String>,
    due_date: Option<String>,
    project_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct EmployeeRow {
    id: String,
    name: Option<String>,
    email: Option<String>,
    department: Option<String>,
    active: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ActivityRow {
    id: String,
    entity: Option<String>,
    entity_id: Option<String>,
    action: Option<ActivityAction>,
    detail: Option<String>,
    created_at: DateTime<Utc>,
}

impl Entity for Task {
    type Draft = NewTask;
    type Patch = TaskPatch;

    const TABLE: &'static str = "tasks";
    const LABEL: &'static str = "task";

    fn from_record(record: &Record) -> Result<Self, RecordSchemaError> {
        let row: TaskRow = decode_row(record)?;
        let priority = match non_blank(row.priority.as_deref()) {
            None => TaskPriority::default(),
            Some(raw) => TaskPriority::try_from(raw).map_err(|err| invalid("priority", err))?,
        };

        Ok(Self::from_persisted(PersistedTaskData {
            id: TaskId::from(RecordId::from_str(&row.id)?),
            title: row.title.ok_or(RecordSchemaError::MissingField("title"))?,
            description: row.description,
            status: TaskStatus::normalize(row.status.as_str()),
            priority,
            assigned_to: parse_reference::<EmployeeId>("assigned_to", row.assigned_to.as_deref())?,
            due_date: parse_due_date(row.due_date.as_deref())?,
            project_id: parse_reference::<ProjectId>("project_id", row.project_id.as_deref())?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }

    fn record_id(&self) -> RecordId {
        self.id().into()
    }
}

impl Entity for Employee {
    type Draft = NewEmployee;
    type Patch = EmployeePatch;

    const TABLE: &'static str = "employees";
    const LABEL: &'static str = "employee";

    fn from_record(record: &Record) -> Result<Self, RecordSchemaError> {
        let row: EmployeeRow = decode_row(record)?;
        let name = non_blank(row.name.as_deref())
            .ok_or(RecordSchemaError::MissingField("name"))?
            .to_owned();
        Ok(Self {
            id: EmployeeId::from(RecordId::from_str(&row.id)?),
            name,
            email: row.email,
            department: row.department,
            active: row.active.unwrap_or(true),
        })
    }

    fn record_id(&self) -> RecordId {
        self.id().into()
    }
}

impl Entity for ActivityEntry {
    type Draft = NewActivityEntry;
    type Patch = ActivityPatch;

    const TABLE: &'static str = "activity_log";
    const LABEL: &'static str = "activity entry";

    fn from_record(record: &Record) -> Result<Self, RecordSchemaError> {
        let row: ActivityRow = decode_row(record)?;
        let entity_id = row
            .entity_id
            .as_deref()
            .ok_or(RecordSchemaError::MissingField("entity_id"))?;
        Ok(Self {
            id: RecordId::from_str(&row.id)?,
            entity: row.entity.ok_or(RecordSchemaError::MissingField("entity"))?,
            entity_id: RecordId::from_str(entity_id)?,
            action: row.action.ok_or(RecordSchemaError::MissingField("action"))?,
            detail: row.detail,
            created_at: row.created_at,
        })
    }

    fn record_id(&self) -> RecordId {
        self.id()
    }
}

fn invalid(field: &'static str, reason: impl ToString) -> RecordSchemaError {
    RecordSchemaError::InvalidField {
        field,
        reason: reason.to_string(),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}

fn parse_reference<T: FromStr>(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<T>, RecordSchemaError>
where
    T::Err: ToString,
{
    non_blank(raw)
        .map(|value| T::from_str(value).map_err(|err| invalid(field, err)))
        .transpose()
}

/// Parses a stored due date.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` timestamps
/// (read as UTC), and bare `YYYY-MM-DD` dates (midnight UTC). Blank
/// values mean no due date.
///
/// # Errors
///
/// Returns [`RecordSchemaError::InvalidField`] for any other shape.
pub fn parse_due_date(raw: Option<&str>) -> Result<Option<DateTime<Utc>>, RecordSchemaError> {
    let Some(value) = non_blank(raw) else {
        return Ok(None);
    };
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(Some(timestamp.with_timezone(&Utc)));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Some(naive.and_utc()));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Some(midnight.and_utc()))
        .ok_or_else(|| invalid("due_date", format!("unrecognised date '{value}'")))
}
