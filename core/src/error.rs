//! Error taxonomy for the to-do domain.
//!
//! # Design
//! `Validation` and `NotFound` are the two client-facing conditions and get
//! their own variants so the API layer can map them to distinct statuses.
//! Storage and migration faults wrap the underlying `sqlx` errors unchanged.

use thiserror::Error;

/// Error type of the underlying storage driver.
pub use sqlx::Error as StorageError;

/// Errors raised by the entity setters and the repository.
#[derive(Debug, Error)]
pub enum TodoError {
    /// Input violates a domain rule, e.g. priority out of range or a
    /// negative id. No state was changed.
    #[error("{0}")]
    Validation(String),

    /// No stored to-do carries this id.
    #[error("todo {0} not found")]
    NotFound(i64),

    /// The storage engine failed while executing a query.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Embedded migrations could not be applied.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl TodoError {
    pub fn validation(message: impl Into<String>) -> Self {
        TodoError::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, TodoError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TodoError::NotFound(_))
    }
}
