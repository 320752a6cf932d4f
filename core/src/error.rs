//! Error types for the users/posts API client.
//!
//! # Design
//! Every non-2xx response collapses into `Request`: the API signals failure
//! only through the status code, so the error carries the status and a
//! generic per-operation message and nothing more structured. Whether a
//! failure means "not found" is decided by the caller (see
//! `views::user_posts`).

use thiserror::Error;

/// Errors returned by `ApiClient` parse methods and by hosts executing requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The server answered with a status outside 200-299.
    #[error("{message}")]
    Request { status: u16, message: &'static str },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The host could not complete the HTTP exchange at all.
    #[error("transport failed: {0}")]
    Transport(String),
}

impl ApiError {
    /// Status code of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}
