//! The session store: single source of truth for "am I logged in, and as whom".
//!
//! `login` and `logout` run under one async lifecycle lock, so two of them
//! never interleave. Reads go through a separate `RwLock` snapshot and never
//! wait on the network. Every commit writes the persisted record first and
//! only then swaps the in-memory session; if persisting fails, neither side
//! changes.

use std::sync::Arc;

use parking_lot::RwLock;
use showcase_adapters::{ApiRequest, AuthClient, Credential, LoginReply};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::errors::AuthError;
use super::middleware;
use super::models::{AuthenticatedSession, Session};
use crate::storage::{PersistedRecord, SessionStorage};

pub struct SessionStore {
    auth_client: Arc<dyn AuthClient>,
    storage: Arc<dyn SessionStorage>,
    current: RwLock<Session>,
    lifecycle: Mutex<()>,
}

impl SessionStore {
    /// Starts the store from whatever `storage` holds.
    ///
    /// A missing, partial or unreadable record starts the store logged out.
    pub fn init(auth_client: Arc<dyn AuthClient>, storage: Arc<dyn SessionStorage>) -> Self {
        let session = match storage.load() {
            Ok(Some(record)) => record.to_session(),
            Ok(None) => Session::empty(),
            Err(err) => {
                warn!(error = %err, "cannot read persisted session, starting logged out");
                Session::empty()
            }
        };

        info!(
            authenticated = session.is_authenticated(),
            user_id = session.user().map(|u| u.id),
            "session store initialised"
        );

        Self {
            auth_client,
            storage,
            current: RwLock::new(session),
            lifecycle: Mutex::new(()),
        }
    }

    /// Ends the store's lifecycle and hands back the last session it held.
    pub fn teardown(self) -> Session {
        let session = self.current.into_inner();
        debug!(authenticated = session.is_authenticated(), "session store torn down");
        session
    }

    /// Logs in through the auth client and installs the returned session.
    ///
    /// On any error the previous session, in memory and persisted, is left
    /// exactly as it was. Failures are reported, never retried.
    pub async fn login(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Session, AuthError> {
        let _guard = self.lifecycle.lock().await;

        let credential = Credential::new(username, password);
        debug!("login requested");

        let reply = self.auth_client.login(&credential).await;
        drop(credential);

        let success = match reply {
            Ok(LoginReply::Success(success)) => success,
            Ok(LoginReply::Rejected) => {
                info!("login rejected");
                return Err(AuthError::InvalidCredentials);
            }
            Ok(LoginReply::Malformed { field }) => {
                warn!(field, "login response is incomplete");
                return Err(AuthError::MalformedResponse(format!(
                    "missing or invalid `{field}`"
                )));
            }
            Err(err) => {
                warn!(error = %err, "login request failed");
                return Err(err.into());
            }
        };

        let authenticated = AuthenticatedSession::from(success);
        let record = PersistedRecord::from_session(&authenticated)?;
        if let Err(err) = self.storage.save(&record) {
            warn!(error = %err, "cannot persist session, keeping previous state");
            return Err(err.into());
        }

        let session = Session::authenticated(authenticated);
        *self.current.write() = session.clone();

        if let Some(user) = session.user() {
            info!(user_id = user.id, "login committed");
        }
        Ok(session)
    }

    /// Clears the session in memory and in storage.
    ///
    /// Logging out while logged out is a no-op. If storage cannot be cleared
    /// the in-memory session is kept, so both sides stay in lockstep.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let _guard = self.lifecycle.lock().await;

        if !self.current.read().is_authenticated() {
            if let Err(err) = self.storage.clear() {
                debug!(error = %err, "ignoring storage error while already logged out");
            }
            return Ok(());
        }

        if let Err(err) = self.storage.clear() {
            warn!(error = %err, "cannot clear persisted session, logout aborted");
            return Err(err.into());
        }

        let previous = std::mem::take(&mut *self.current.write());
        info!(user_id = previous.user().map(|u| u.id), "logged out");
        Ok(())
    }

    /// Drops the session after the backend refused `rejected_token`.
    ///
    /// Only clears when the current access token is still `rejected_token`,
    /// so a login committed since the request was sent survives. Returns
    /// whether the session was cleared. Storage is cleared before memory; on
    /// a storage failure neither changes.
    pub async fn invalidate(&self, rejected_token: &str) -> Result<bool, AuthError> {
        let _guard = self.lifecycle.lock().await;

        if self.current.read().access_token() != Some(rejected_token) {
            debug!("rejected token is no longer current, keeping session");
            return Ok(false);
        }

        if let Err(err) = self.storage.clear() {
            warn!(error = %err, "cannot clear persisted session after token rejection");
            return Err(err.into());
        }

        let previous = std::mem::take(&mut *self.current.write());
        info!(
            user_id = previous.user().map(|u| u.id),
            "session cleared after token rejection"
        );
        Ok(true)
    }

    /// Snapshot of the current session.
    pub fn current_session(&self) -> Session {
        self.current.read().clone()
    }

    /// True iff an access token is present. No expiry or signature check.
    pub fn is_authenticated(&self) -> bool {
        self.current.read().is_authenticated()
    }

    /// Applies [`middleware::attach_credential`] with the current session.
    pub fn attach_credential(&self, request: ApiRequest) -> ApiRequest {
        middleware::attach_credential(&self.current.read(), request)
    }
}
