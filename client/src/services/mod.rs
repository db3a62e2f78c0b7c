//! Session-aware access to the resource backend.
//!
//! Every request built here passes through the session store's
//! `attach_credential` before it reaches the `ResourceClient`, and every
//! payload is typed on the way in and out.

pub mod resource;
pub mod users;

use showcase_adapters::AdapterError;
use thiserror::Error;

pub use resource::ResourceService;
pub use users::{NewUser, UserService, UserUpdate};

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The backend refused the (possibly missing) credential.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected response payload: {0}")]
    Decode(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl From<AdapterError> for ServiceError {
    fn from(err: AdapterError) -> Self {
        match err {
            AdapterError::Status { status, message } if status == 401 || status == 403 => {
                ServiceError::Unauthorized(message)
            }
            AdapterError::NotFound(path) => ServiceError::NotFound(path),
            AdapterError::Decode(message) => ServiceError::Decode(message),
            AdapterError::InvalidRequest(message) => ServiceError::InvalidRequest(message),
            other => ServiceError::Transport(other.to_string()),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
