//! Wire types for the to-do API.
//!
//! # Design
//! These mirror the server's JSON but are defined independently so the
//! client does not pull in the storage stack. The integration test against a
//! live server catches schema drift between the two.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stored to-do item as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub priority: i32,
}

/// Request body for create, update (PATCH) and replace (PUT).
///
/// All three fields are sent on every call; the server does not support
/// omitting fields on update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoPayload {
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub priority: i32,
}

impl TodoPayload {
    pub fn new(description: impl Into<String>, deadline: NaiveDate, priority: i32) -> Self {
        Self {
            description: Some(description.into()),
            deadline: Some(deadline),
            priority,
        }
    }
}
