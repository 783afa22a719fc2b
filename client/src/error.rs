//! Error types for the to-do API client.
//!
//! # Design
//! `NotFound` and `BadRequest` get dedicated variants because those are the
//! two statuses the service uses to report caller mistakes. Every other
//! non-2xx response lands in `HttpError` with the raw status and body.

use thiserror::Error;

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: no to-do with the requested id.
    #[error("resource not found")]
    NotFound,

    /// The server returned 400, e.g. for a priority outside 1..=3.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The server returned a non-2xx status other than 400 or 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// A 201/204 response lacked a usable `Location` header.
    #[error("response has no usable Location header")]
    MissingLocation,

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
