//! Global application error types.
//!
//! This module gathers the per-layer errors (configuration, adapters,
//! session, services) into the one type the application surfaces.

use config::ConfigError;
use showcase_adapters::AdapterError;
use thiserror::Error;

use crate::auth::AuthError;
use crate::services::ServiceError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("adapter error: {0}")]
    Adapter(#[from] AdapterError),

    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("service error: {0}")]
    Service(#[from] ServiceError),
}

pub type AppResult<T> = Result<T, AppError>;
