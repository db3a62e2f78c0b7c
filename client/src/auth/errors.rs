//! Error types for session operations.
//!
//! Every variant is recoverable by the caller. None of them leaves the
//! session half-updated: a failing operation either never started its commit
//! or was rolled back before the in-memory state changed.

use showcase_adapters::AdapterError;
use thiserror::Error;

use crate::storage::StorageError;

/// Coarse classification of an [`AuthError`], convenient for UI branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorReason {
    InvalidCredentials,
    NetworkFailure,
    MalformedResponse,
    StorageFailure,
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend refused the username/password pair.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// The backend answered but the payload was incomplete.
    #[error("malformed login response: {0}")]
    MalformedResponse(String),

    #[error("session storage failure: {0}")]
    StorageFailure(#[from] StorageError),
}

impl AuthError {
    pub fn reason(&self) -> AuthErrorReason {
        match self {
            AuthError::InvalidCredentials => AuthErrorReason::InvalidCredentials,
            AuthError::NetworkFailure(_) => AuthErrorReason::NetworkFailure,
            AuthError::MalformedResponse(_) => AuthErrorReason::MalformedResponse,
            AuthError::StorageFailure(_) => AuthErrorReason::StorageFailure,
        }
    }
}

impl From<AdapterError> for AuthError {
    fn from(err: AdapterError) -> Self {
        match err {
            AdapterError::Decode(message) => AuthError::MalformedResponse(message),
            other => AuthError::NetworkFailure(other.to_string()),
        }
    }
}
