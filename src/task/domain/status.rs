//! Task workflow status and its board presentation.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Workflow status of a task. The set is closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started.
    #[default]
    Todo,
    /// Being worked on.
    InProgress,
    /// Awaiting review.
    Review,
    /// Cannot progress until something else happens.
    Blocked,
    /// Completed.
    Done,
}

/// Presentation attributes of a board column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnStyle {
    /// Column heading.
    pub label: &'static str,
    /// Accent colour token.
    pub color: &'static str,
    /// Icon name.
    pub icon: &'static str,
}

impl TaskStatus {
    /// Board columns, left to right.
    pub const COLUMN_ORDER: [Self; 5] = [
        Self::Todo,
        Self::InProgress,
        Self::Review,
        Self::Blocked,
        Self::Done,
    ];

    /// Returns the canonical storage representation, also used as the
    /// board column identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Review => "review",
            Self::Blocked => "blocked",
            Self::Done => "done",
        }
    }

    /// Returns the column position of the status on the board.
    #[must_use]
    pub const fn column_index(self) -> usize {
        match self {
            Self::Todo => 0,
            Self::InProgress => 1,
            Self::Review => 2,
            Self::Blocked => 3,
            Self::Done => 4,
        }
    }

    /// Returns the column presentation for the status.
    #[must_use]
    pub const fn style(self) -> ColumnStyle {
        match self {
            Self::Todo => ColumnStyle {
                label: "To Do",
                color: "slate",
                icon: "circle",
            },
            Self::InProgress => ColumnStyle {
                label: "In Progress",
                color: "blue",
                icon: "loader",
            },
            Self::Review => ColumnStyle {
                label: "Review",
                color: "amber",
                icon: "eye",
            },
            Self::Blocked => ColumnStyle {
                label: "Blocked",
                color: "red",
                icon: "ban",
            },
            Self::Done => ColumnStyle {
                label: "Done",
                color: "green",
                icon: "check-circle",
            },
        }
    }

    /// Resolves a raw stored value, falling back to [`TaskStatus::Todo`]
    /// when it is absent or unrecognised.
    #[must_use]
    pub fn normalize(raw: Option<&str>) -> Self {
        raw.and_then(|value| Self::try_from(value).ok())
            .unwrap_or_default()
    }

    /// Resolves a board column identifier.
    #[must_use]
    pub fn from_column_id(column_id: &str) -> Option<Self> {
        Self::try_from(column_id).ok()
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "todo" | "to_do" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "review" | "in_review" => Ok(Self::Review),
            "blocked" => Ok(Self::Blocked),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = ParseTaskStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(value)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
