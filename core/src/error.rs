//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `Http` with the status code
//! and the server's `{"error": ...}` message (or the raw body when the body
//! is not in that shape).

use thiserror::Error;

/// Errors returned by `TodoClient` methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The host could not complete the round-trip (connection refused, DNS,
    /// timeout). Never produced by the client itself.
    #[error("transport failed: {0}")]
    Transport(String),
}
