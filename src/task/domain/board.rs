//! Board model: a task collection partitioned into status columns.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use super::{ColumnStyle, EmployeeId, Task, TaskId, TaskStatus};

/// One board column: the tasks sharing a status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumn {
    status: TaskStatus,
    tasks: Vec<Task>,
}

impl BoardColumn {
    const fn empty(status: TaskStatus) -> Self {
        Self {
            status,
            tasks: Vec::new(),
        }
    }

    /// Returns the status of the column.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the column presentation.
    #[must_use]
    pub const fn style(&self) -> ColumnStyle {
        self.status.style()
    }

    /// Returns the column's tasks in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of tasks in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when the column holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Derived figures for a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSummary {
    /// Task count per column, in column order.
    pub counts: Vec<(TaskStatus, usize)>,
    /// Tasks not done whose due date has passed.
    pub overdue: usize,
    /// Tasks without an assignee.
    pub unassigned: usize,
    /// Tasks not done per assignee.
    pub open_per_assignee: BTreeMap<EmployeeId, usize>,
}

/// Task board with one column per status in [`TaskStatus::COLUMN_ORDER`].
///
/// Every task of the input appears in exactly one column. Within a column,
/// tasks with a due date come first in ascending due order; tasks without
/// one follow in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    columns: Vec<BoardColumn>,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            columns: TaskStatus::COLUMN_ORDER
                .into_iter()
                .map(BoardColumn::empty)
                .collect(),
        }
    }
}

impl Board {
    /// Partitions `tasks` into status columns.
    #[must_use]
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut board = Self::default();
        for task in tasks {
            if let Some(column) = board.column_mut(task.status()) {
                column.tasks.push(task);
            }
        }
        for column in &mut board.columns {
            column
                .tasks
                .sort_by_key(|task| (task.due_date().is_none(), task.due_date()));
        }
        board
    }

    /// Returns the columns in board order.
    #[must_use]
    pub fn columns(&self) -> &[BoardColumn] {
        &self.columns
    }

    /// Returns the column for `status`.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> Option<&BoardColumn> {
        self.columns.get(status.column_index())
    }

    /// Returns the task count of every column, in board order.
    #[must_use]
    pub fn counts(&self) -> Vec<(TaskStatus, usize)> {
        self.columns
            .iter()
            .map(|column| (column.status, column.len()))
            .collect()
    }

    /// Returns the number of tasks on the board.
    #[must_use]
    pub fn total(&self) -> usize {
        self.columns.iter().map(BoardColumn::len).sum()
    }

    /// Returns every task on the board, column by column.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.columns.iter().flat_map(|column| column.tasks.iter())
    }

    /// Returns the column and position of the task `id`.
    #[must_use]
    pub fn locate(&self, id: TaskId) -> Option<(TaskStatus, usize)> {
        self.columns.iter().find_map(|column| {
            column
                .tasks
                .iter()
                .position(|task| task.id() == id)
                .map(|index| (column.status, index))
        })
    }

    /// Moves the task `id` into column `to` at `index`, clamped to the
    /// column length.
    ///
    /// This is the optimistic local move made while a status mutation is
    /// in flight. Returns `false`, leaving the board untouched, when the
    /// task is not on the board.
    pub fn move_task(&mut self, id: TaskId, to: TaskStatus, index: usize) -> bool {
        let Some((from, position)) = self.locate(id) else {
            return false;
        };
        let Some(task) = self
            .column_mut(from)
            .filter(|column| position < column.tasks.len())
            .map(|column| column.tasks.remove(position))
        else {
            return false;
        };
        let Some(target) = self.column_mut(to) else {
            return false;
        };
        let slot = index.min(target.tasks.len());
        target.tasks.insert(slot, task.with_status(to));
        true
    }

    /// Computes derived figures for the board at `now`.
    #[must_use]
    pub fn summary(&self, now: DateTime<Utc>) -> BoardSummary {
        let mut open_per_assignee = BTreeMap::new();
        let mut overdue = 0;
        let mut unassigned = 0;
        for task in self.tasks() {
            if task.is_overdue(now) {
                overdue += 1;
            }
            match task.assigned_to() {
                None => unassigned += 1,
                Some(assignee) if task.status() != TaskStatus::Done => {
                    *open_per_assignee.entry(assignee).or_insert(0) += 1;
                }
                Some(_) => {}
            }
        }
        BoardSummary {
            counts: self.counts(),
            overdue,
            unassigned,
            open_per_assignee,
        }
    }

    fn column_mut(&mut self, status: TaskStatus) -> Option<&mut BoardColumn> {
        self.columns.get_mut(status.column_index())
    }
}
