//! Mapping from domain errors to HTTP responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use todo_core::TodoError;
use tracing::error;

/// Error returned by every handler.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Todo(#[from] TodoError),

    /// The request body was missing, not JSON, or did not match `ToDoInput`.
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    /// A stored item came back from the repository without an id.
    #[error("stored todo has no id")]
    MissingId,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Todo(TodoError::Validation(message)) => {
                (StatusCode::BAD_REQUEST, message).into_response()
            }
            AppError::Todo(err @ TodoError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, err.to_string()).into_response()
            }
            AppError::InvalidBody(rejection) => {
                (StatusCode::BAD_REQUEST, rejection.body_text()).into_response()
            }
            err => {
                error!(error = %err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use todo_core::error::StorageError;

    use super::*;

    #[test]
    fn validation_is_bad_request() {
        let resp = AppError::from(TodoError::validation("Priority must be between 1 and 3!")).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_is_404() {
        let resp = AppError::from(TodoError::NotFound(3)).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn storage_fault_is_500() {
        let resp = AppError::from(TodoError::Storage(StorageError::PoolClosed)).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(AppError::MissingId.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
