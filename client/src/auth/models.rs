//! Data structures for the client-side authentication state.
//!
//! The access token, refresh token and user profile travel together in one
//! [`AuthenticatedSession`]; a [`Session`] either holds one or is empty, so a
//! token can never exist without its user or the other way round.

use std::fmt;

use showcase_adapters::{LoginSuccess, UserProfile};

/// The three pieces of state installed by a successful login.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthenticatedSession {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserProfile,
}

impl From<LoginSuccess> for AuthenticatedSession {
    fn from(success: LoginSuccess) -> Self {
        Self {
            access_token: success.token,
            refresh_token: success.refresh_token,
            user: success.user,
        }
    }
}

impl fmt::Debug for AuthenticatedSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatedSession")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

/// Authentication state of the current process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    state: Option<AuthenticatedSession>,
}

impl Session {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn authenticated(state: AuthenticatedSession) -> Self {
        Self { state: Some(state) }
    }

    pub fn state(&self) -> Option<&AuthenticatedSession> {
        self.state.as_ref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.state.as_ref().map(|s| s.access_token.as_str())
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.state.as_ref().map(|s| s.refresh_token.as_str())
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.state.as_ref().map(|s| &s.user)
    }

    /// Presence-only check: the token is neither validated nor checked for expiry.
    pub fn is_authenticated(&self) -> bool {
        self.state.is_some()
    }
}
