//! Typed access to the `users` collection.
//!
//! Wraps [`ResourceService`] with the user payload types. Passwords in
//! [`NewUser`] and [`UserUpdate`] are sent to the backend but never appear
//! in `Debug` output or logs.

use std::fmt;

use serde::Serialize;
use showcase_adapters::UserProfile;
use tracing::info;

use super::{ResourceService, ServiceResult};

const USERS: &str = "users";

#[derive(Serialize, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Partial update; `None` fields are left out of the request body.
#[derive(Serialize, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl fmt::Debug for UserUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserUpdate")
            .field("email", &self.email)
            .field("role", &self.role)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Clone)]
pub struct UserService {
    resources: ResourceService,
}

impl UserService {
    pub fn new(resources: ResourceService) -> Self {
        Self { resources }
    }

    pub async fn get_users(&self) -> ServiceResult<Vec<UserProfile>> {
        let users: Vec<UserProfile> = self.resources.list(USERS).await?;
        info!(count = users.len(), "fetched users");
        Ok(users)
    }

    pub async fn get_user_by_id(&self, id: i64) -> ServiceResult<UserProfile> {
        self.resources.get(USERS, id).await
    }

    pub async fn create_user(&self, user: &NewUser) -> ServiceResult<UserProfile> {
        let created: UserProfile = self.resources.create(USERS, user).await?;
        info!(user_id = created.id, "user created");
        Ok(created)
    }

    pub async fn update_user(&self, id: i64, update: &UserUpdate) -> ServiceResult<UserProfile> {
        let updated: UserProfile = self.resources.update(USERS, id, update).await?;
        info!(user_id = updated.id, "user updated");
        Ok(updated)
    }

    pub async fn delete_user(&self, id: i64) -> ServiceResult<()> {
        self.resources.delete(USERS, id).await?;
        info!(user_id = id, "user deleted");
        Ok(())
    }

    pub async fn search_users(&self, query: &str) -> ServiceResult<Vec<UserProfile>> {
        self.resources.search(USERS, query).await
    }
}
