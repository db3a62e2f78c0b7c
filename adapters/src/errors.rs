//! Custom error types specific to the `adapters` crate.
//!
//! This module defines errors that can occur while talking to the auth and
//! resource backends: transport failures, unexpected statuses and payloads
//! that do not decode.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    /// Connection, timeout or other transport-level failure.
    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for AdapterError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AdapterError::Decode(err.to_string())
        } else {
            AdapterError::Network(err.to_string())
        }
    }
}

pub type AdapterResult<T> = Result<T, AdapterError>;
