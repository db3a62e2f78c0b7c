//! Key/value layout of the persisted session record.
//!
//! The record holds three string entries: `token`, `refreshToken` and `user`
//! (the profile serialized as JSON). Anything missing or unreadable turns the
//! record into an unauthenticated session.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use showcase_adapters::UserProfile;
use tracing::warn;

use super::{StorageError, StorageResult};
use crate::auth::{AuthenticatedSession, Session};

pub const TOKEN_KEY: &str = "token";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "user";

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersistedRecord {
    entries: BTreeMap<String, String>,
}

impl PersistedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_session(session: &AuthenticatedSession) -> StorageResult<Self> {
        let user = serde_json::to_string(&session.user)
            .map_err(|err| StorageError::Corrupt(format!("cannot serialize user: {err}")))?;

        let mut record = Self::new();
        record.insert(TOKEN_KEY, session.access_token.clone());
        record.insert(REFRESH_TOKEN_KEY, session.refresh_token.clone());
        record.insert(USER_KEY, user);
        Ok(record)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(key.to_string(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rebuilds the session this record describes.
    ///
    /// Never fails: absent keys, empty tokens and a `user` entry that does not
    /// parse all yield [`Session::empty`].
    pub fn to_session(&self) -> Session {
        let token = self.get(TOKEN_KEY).filter(|t| !t.is_empty());
        let refresh_token = self.get(REFRESH_TOKEN_KEY).filter(|t| !t.is_empty());
        let (Some(token), Some(refresh_token)) = (token, refresh_token) else {
            return Session::empty();
        };

        let user = match self.get(USER_KEY).map(serde_json::from_str::<UserProfile>) {
            Some(Ok(user)) => user,
            Some(Err(err)) => {
                warn!(error = %err, "persisted user entry is unreadable, starting logged out");
                return Session::empty();
            }
            None => return Session::empty(),
        };

        Session::authenticated(AuthenticatedSession {
            access_token: token.to_string(),
            refresh_token: refresh_token.to_string(),
            user,
        })
    }
}

impl fmt::Debug for PersistedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistedRecord")
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
