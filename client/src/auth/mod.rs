//! Authentication module for the client-side session.
//!
//! This module provides the session store (login, logout, session reads),
//! the session data model, its error taxonomy and the helper that attaches
//! the bearer credential to outgoing requests.

pub mod errors;
pub mod middleware;
pub mod models;
pub mod service;

// Re-exports for convenience
pub use errors::*;
pub use middleware::*;
pub use models::*;
pub use service::*;
