//! Core `adapters` crate for the backends the session layer talks to.
//!
//! This crate defines the `AuthClient` and `ResourceClient` traits, which
//! outline the login exchange and generic CRUD calls, and provides the
//! HTTP implementations used by the application.

pub mod auth_http;
pub mod errors;
pub mod models;
pub mod resource_http;

use async_trait::async_trait;

pub use auth_http::HttpAuthClient;
pub use errors::{AdapterError, AdapterResult};
pub use models::*;
pub use resource_http::HttpResourceClient;

/// Performs the network half of a login.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Exchanges a credential for tokens. Transport failures are errors;
    /// refusals and incomplete payloads are [`LoginReply`] variants.
    async fn login(&self, credential: &Credential) -> AdapterResult<LoginReply>;
}

/// Sends CRUD requests to the resource backend.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ResourceClient: Send + Sync {
    async fn send(&self, request: ApiRequest) -> AdapterResult<ApiResponse>;
}
