//! Error types for the todo client.
//!
//! # Design
//! Two layers. [`ApiError`] is the diagnostic error produced by the codec and
//! the transport; it keeps the status code and body so failures can be logged
//! with their cause. [`StoreError`] is what the UI sees: one fixed message per
//! store operation, independent of the cause.

use thiserror::Error;

/// Failure to complete a network round trip (connection refused, timeout,
/// broken pipe). Produced by [`Transport`](crate::transport::Transport)
/// implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport failed: {0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Errors returned by `TodoClient` build/parse methods and by the transport.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404; the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// User-facing failure of a store operation. Stored in the store's error
/// slot and shown in place of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Failed to fetch todos")]
    Fetch,
    #[error("Failed to create todo")]
    Create,
    #[error("Failed to update todo")]
    Update,
    #[error("Failed to delete todo")]
    Delete,
}
