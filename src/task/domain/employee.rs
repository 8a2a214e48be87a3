//! Employee records referenced as task assignees.

use super::{EmployeeId, TaskDomainError};
use serde::Serialize;

/// Employee directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub(super) id: EmployeeId,
    pub(super) name: String,
    pub(super) email: Option<String>,
    pub(super) department: Option<String>,
    pub(super) active: bool,
}

impl Employee {
    /// Returns the employee identifier.
    #[must_use]
    pub const fn id(&self) -> EmployeeId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the e-mail address, if known.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the department, if known.
    #[must_use]
    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    /// Returns whether the employee is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

/// Payload for creating an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewEmployee {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    department: Option<String>,
    active: bool,
}

impl NewEmployee {
    /// Creates an active employee payload.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyEmployeeName`] when the name is
    /// blank.
    pub fn new(name: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyEmployeeName);
        }
        Ok(Self {
            name: trimmed.to_owned(),
            email: None,
            department: None,
            active: true,
        })
    }

    /// Sets the e-mail address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the department.
    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }
}

/// Partial employee update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmployeePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    department: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    active: Option<bool>,
}

impl EmployeePatch {
    /// Creates a patch that activates or deactivates the employee.
    #[must_use]
    pub fn active(active: bool) -> Self {
        Self {
            active: Some(active),
            ..Self::default()
        }
    }

    /// Sets or clears the department.
    #[must_use]
    pub fn with_department(mut self, department: Option<String>) -> Self {
        self.department = Some(department);
        self
    }
}
