//! The to-do entity and its priority rule.
//!
//! # Design
//! `ToDo` never holds an out-of-range priority: the only way to change it is
//! through `set_priority` / `apply_update`, both of which check the range
//! before writing anything. Incoming request bodies are decoded into
//! `ToDoInput`, which carries the raw integer, so validation stays in one
//! place instead of being spread across serde attributes.
//!
//! Deadlines are stored as `YYYY-MM-DD` text and ordered as text, which only
//! matches date order for four-digit years. Deadlines outside
//! `DEADLINE_YEAR_MIN..=DEADLINE_YEAR_MAX` are rejected the same way as a bad
//! priority.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::TodoError;

/// Lowest accepted priority (low).
pub const PRIORITY_MIN: i32 = 1;
/// Highest accepted priority (high).
pub const PRIORITY_MAX: i32 = 3;

/// Earliest deadline year that can be stored.
pub const DEADLINE_YEAR_MIN: i32 = 0;
/// Latest deadline year that can be stored.
pub const DEADLINE_YEAR_MAX: i32 = 9999;

const PRIORITY_RANGE_MESSAGE: &str = "Priority must be between 1 and 3!";
const DEADLINE_RANGE_MESSAGE: &str = "Deadline year must be between 0 and 9999!";

/// A single to-do item.
///
/// `id` is `None` until the repository has stored the item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ToDo {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    description: Option<String>,
    deadline: Option<NaiveDate>,
    priority: i32,
}

/// Request payload for creating, updating, or replacing a to-do.
///
/// The priority is not checked here; the repository rejects out-of-range
/// values when it turns the input into an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToDoInput {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    pub priority: i32,
}

impl ToDoInput {
    pub fn new(description: impl Into<String>, deadline: NaiveDate, priority: i32) -> Self {
        Self {
            description: Some(description.into()),
            deadline: Some(deadline),
            priority,
        }
    }
}

/// Whether `priority` lies in `PRIORITY_MIN..=PRIORITY_MAX`.
pub fn is_valid_priority(priority: i32) -> bool {
    (PRIORITY_MIN..=PRIORITY_MAX).contains(&priority)
}

fn check_priority(priority: i32) -> Result<(), TodoError> {
    if is_valid_priority(priority) {
        Ok(())
    } else {
        Err(TodoError::validation(PRIORITY_RANGE_MESSAGE))
    }
}

fn check_deadline(deadline: Option<NaiveDate>) -> Result<(), TodoError> {
    match deadline {
        Some(date) if !(DEADLINE_YEAR_MIN..=DEADLINE_YEAR_MAX).contains(&date.year()) => {
            Err(TodoError::validation(DEADLINE_RANGE_MESSAGE))
        }
        _ => Ok(()),
    }
}

impl ToDo {
    /// Build an unsaved to-do. Fails if `priority` or the deadline year is
    /// out of range.
    pub fn new(
        description: Option<String>,
        deadline: Option<NaiveDate>,
        priority: i32,
    ) -> Result<Self, TodoError> {
        check_priority(priority)?;
        check_deadline(deadline)?;
        Ok(Self {
            id: None,
            description,
            deadline,
            priority,
        })
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn deadline(&self) -> Option<NaiveDate> {
        self.deadline
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Commit `deadline` unless its year is out of range.
    pub fn set_deadline(&mut self, deadline: Option<NaiveDate>) -> Result<(), TodoError> {
        check_deadline(deadline)?;
        self.deadline = deadline;
        Ok(())
    }

    /// Commit `priority` if it is in range; otherwise leave the current
    /// value untouched and return a validation error.
    pub fn set_priority(&mut self, priority: i32) -> Result<(), TodoError> {
        check_priority(priority)?;
        self.priority = priority;
        Ok(())
    }

    /// Overwrite description, deadline and priority with the values from
    /// `other`. All three fields are taken as given, including `None`.
    ///
    /// Priority and deadline are checked first, so a rejected update changes
    /// nothing.
    pub fn apply_update(&mut self, other: &ToDoInput) -> Result<(), TodoError> {
        check_priority(other.priority)?;
        check_deadline(other.deadline)?;
        self.set_description(other.description.clone());
        self.deadline = other.deadline;
        self.priority = other.priority;
        Ok(())
    }

    pub(crate) fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

impl TryFrom<ToDoInput> for ToDo {
    type Error = TodoError;

    fn try_from(input: ToDoInput) -> Result<Self, Self::Error> {
        ToDo::new(input.description, input.deadline, input.priority)
    }
}
