//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` and `BadRequest` get dedicated variants because callers
//! routinely branch on them; `BadRequest` carries the server's `error`
//! message. Every other unexpected status lands in `HttpError` with the raw
//! status code and body.

use thiserror::Error;

/// Errors returned by `TodoClient` parse and build methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned 400 with this message.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The server returned any other unexpected status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
