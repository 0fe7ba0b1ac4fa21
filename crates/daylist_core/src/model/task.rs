//! Task domain model.
//!
//! # Responsibility
//! - Define the task record returned by list/get operations and the draft
//!   shape submitted to add.
//! - Own the name validation rule shared by every write path.
//!
//! # Invariants
//! - `id` is assigned by the store on creation and never reused for another
//!   task.
//! - `name` is non-blank after trimming.
//! - List position is store-internal; ordering is conveyed by the sequence
//!   returned from list operations, not by a field on the record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for a stored task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = i64;

/// Validation failure for task field contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Task name is blank after trimming.
    BlankName,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "task name must not be blank"),
        }
    }
}

impl Error for TaskValidationError {}

/// A to-do item as stored and displayed.
///
/// The record carries every user-visible field; the list position is kept by
/// the store and changed only through the reorder operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned stable id.
    pub id: TaskId,
    /// Display name shown in the list.
    pub name: String,
    /// Completion flag. New tasks start not done.
    pub is_done: bool,
    /// Optional due date. Absent until scheduled.
    pub deadline: Option<NaiveDate>,
}

impl Task {
    /// Checks field-level rules before persistence.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        validate_name(&self.name)
    }

    /// Returns whether this task is open past its deadline on `today`.
    ///
    /// Completed tasks are never overdue, and neither is a task due today.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        if self.is_done {
            return false;
        }
        self.deadline.is_some_and(|deadline| deadline < today)
    }
}

/// Creation draft: a task lacking an id.
///
/// The store assigns the id and the end-of-list position when the draft is
/// added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Display name for the new task.
    pub name: String,
    /// Optional due date to set on creation.
    pub deadline: Option<NaiveDate>,
}

impl NewTask {
    /// Creates a draft with no deadline, the shape the add box submits.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            deadline: None,
        }
    }

    /// Creates a draft that is already scheduled.
    pub fn with_deadline(name: impl Into<String>, deadline: NaiveDate) -> Self {
        Self {
            name: name.into(),
            deadline: Some(deadline),
        }
    }

    /// Checks field-level rules before persistence.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        validate_name(&self.name)
    }
}

fn validate_name(name: &str) -> Result<(), TaskValidationError> {
    if name.trim().is_empty() {
        return Err(TaskValidationError::BlankName);
    }
    Ok(())
}
