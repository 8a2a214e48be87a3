//! Filter/search layer applied to a task collection before board grouping.
//!
//! Filtering is pure and order-preserving: it selects a subsequence of the
//! input and never mutates it. Criteria combine with logical AND, and an
//! inactive criterion admits every task.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::str::FromStr;

use super::{EmployeeId, ProjectId, Task, TaskDomainError, TaskPriority};

/// Literal used by select controls for "no restriction".
pub const ANY_SENTINEL: &str = "all";

/// Single equality criterion that may be inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion<T> {
    /// Admits every value.
    Any,
    /// Admits only this value.
    Is(T),
}

impl<T> Default for Criterion<T> {
    fn default() -> Self {
        Self::Any
    }
}

impl<T: PartialEq> Criterion<T> {
    /// Returns `true` unless the criterion is [`Criterion::Any`].
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Is(_))
    }

    /// Returns whether `value` satisfies the criterion. An absent value
    /// only satisfies an inactive criterion.
    #[must_use]
    pub fn admits(&self, value: Option<&T>) -> bool {
        match self {
            Self::Any => true,
            Self::Is(expected) => value == Some(expected),
        }
    }
}

impl<T> From<Option<T>> for Criterion<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Any, Self::Is)
    }
}

impl<T: FromStr> FromStr for Criterion<T> {
    type Err = T::Err;

    /// Parses a select-control value; blank or `all` is [`Criterion::Any`].
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ANY_SENTINEL) {
            return Ok(Self::Any);
        }
        T::from_str(trimmed).map(Self::Is)
    }
}

/// Inclusive due-date range with optionally open ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Creates a range between two inclusive bounds.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDateRange`] when `start` is after
    /// `end`.
    pub fn new(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Self, TaskDomainError> {
        match (start, end) {
            (Some(from), Some(to)) if from > to => Err(TaskDomainError::InvalidDateRange {
                start: from,
                end: to,
            }),
            _ => Ok(Self { start, end }),
        }
    }

    /// Creates a range covering whole calendar days, from the start of
    /// `first` to the last instant of `last`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDateRange`] when `first` is after
    /// `last`, or [`TaskDomainError::DateOutOfRange`] when a day cannot be
    /// expanded into a timestamp.
    pub fn from_days(
        first: Option<NaiveDate>,
        last: Option<NaiveDate>,
    ) -> Result<Self, TaskDomainError> {
        let start = first.map(|day| day.and_time(NaiveTime::MIN).and_utc());
        let end = last
            .map(|day| {
                NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
                    .map(|time| day.and_time(time).and_utc())
                    .ok_or_else(|| TaskDomainError::DateOutOfRange(day.to_string()))
            })
            .transpose()?;
        Self::new(start, end)
    }

    /// Returns the inclusive lower bound, if any.
    #[must_use]
    pub const fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    /// Returns the inclusive upper bound, if any.
    #[must_use]
    pub const fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    /// Returns whether `due_date` lies within the range. A missing date
    /// never does.
    #[must_use]
    pub fn contains(&self, due_date: Option<DateTime<Utc>>) -> bool {
        let Some(due) = due_date else {
            return false;
        };
        self.start.is_none_or(|start| due >= start) && self.end.is_none_or(|end| due <= end)
    }
}

/// Filter criteria for a task collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    query: String,
    priority: Criterion<TaskPriority>,
    project: Criterion<ProjectId>,
    assignee: Criterion<EmployeeId>,
    due: Option<DateRange>,
}

impl TaskFilter {
    /// Creates a filter with every criterion inactive.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the free-text query matched against title and description.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Sets the priority criterion.
    #[must_use]
    pub const fn with_priority(mut self, priority: Criterion<TaskPriority>) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the project criterion.
    #[must_use]
    pub const fn with_project(mut self, project: Criterion<ProjectId>) -> Self {
        self.project = project;
        self
    }

    /// Sets the assignee criterion.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: Criterion<EmployeeId>) -> Self {
        self.assignee = assignee;
        self
    }

    /// Sets or clears the due-date range.
    #[must_use]
    pub const fn with_due(mut self, due: Option<DateRange>) -> Self {
        self.due = due;
        self
    }

    /// Returns the free-text query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns `true` when at least one criterion restricts the result.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty()
            || self.priority.is_active()
            || self.project.is_active()
            || self.assignee.is_active()
            || self.due.is_some()
    }

    /// Returns whether `task` satisfies every active criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_query(task)
            && self.priority.admits(Some(&task.priority()))
            && self.project.admits(task.project_id().as_ref())
            && self.assignee.admits(task.assigned_to().as_ref())
            && self.due.is_none_or(|range| range.contains(task.due_date()))
    }

    /// Returns the tasks satisfying the filter, in input order.
    #[must_use]
    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        if !self.is_active() {
            return tasks.to_vec();
        }
        tasks
            .iter()
            .filter(|task| self.matches(task))
            .cloned()
            .collect()
    }

    fn matches_query(&self, task: &Task) -> bool {
        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        task.title().to_lowercase().contains(&needle)
            || task
                .description()
                .unwrap_or_default()
                .to_lowercase()
                .contains(&needle)
    }
}
