//! Client-side session core.
//!
//! Holds the authentication state of the running process, persists it
//! through a pluggable storage boundary, and attaches its bearer credential
//! to requests sent to the resource backend.

pub mod auth;
pub mod config;
pub mod errors;
pub mod services;
pub mod storage;
pub mod telemetry;

use std::sync::Arc;

use showcase_adapters::{HttpAuthClient, HttpResourceClient};

use crate::auth::SessionStore;
use crate::config::ClientConfig;
use crate::errors::AppResult;
use crate::services::{ResourceService, UserService};

/// Everything the application needs, wired from one configuration.
pub struct AppContext {
    pub session: Arc<SessionStore>,
    pub resources: ResourceService,
    pub users: UserService,
}

impl AppContext {
    pub fn from_config(config: &ClientConfig) -> AppResult<Self> {
        let connection = config.http_connection();
        let auth_client = Arc::new(HttpAuthClient::new(&connection)?);
        let resource_client = Arc::new(HttpResourceClient::new(connection)?);

        let session = Arc::new(SessionStore::init(auth_client, config.session_storage()));
        let resources = ResourceService::new(resource_client, session.clone());
        let users = UserService::new(resources.clone());

        Ok(Self {
            session,
            resources,
            users,
        })
    }
}
