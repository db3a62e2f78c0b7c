//! End-to-end behaviour of the session store against stub collaborators.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use showcase_adapters::{
    AdapterError, AdapterResult, ApiRequest, AuthClient, Credential, LoginReply, LoginSuccess,
    UserProfile,
};
use showcase_client::auth::{AuthErrorReason, Session, SessionStore};
use showcase_client::storage::{
    FileStorage, MemoryStorage, PersistedRecord, SessionStorage, StorageResult,
};

fn profile(id: i64, username: &str) -> UserProfile {
    UserProfile {
        id,
        username: username.to_string(),
        email: format!("{username}@x.com"),
        role: (if id == 1 { "admin" } else { "user" }).to_string(),
    }
}

/// Auth backend with a fixed user table and an optional per-user delay.
#[derive(Default)]
struct StubAuthClient {
    accounts: HashMap<String, (String, LoginSuccess)>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
}

impl StubAuthClient {
    fn with_account(
        mut self,
        username: &str,
        password: &str,
        token: &str,
        user: UserProfile,
    ) -> Self {
        self.accounts.insert(
            username.to_string(),
            (
                password.to_string(),
                LoginSuccess {
                    token: token.to_string(),
                    refresh_token: format!("refresh-{token}"),
                    user,
                },
            ),
        );
        self
    }

    fn with_delay(mut self, username: &str, delay: Duration) -> Self {
        self.delays.insert(username.to_string(), delay);
        self
    }
}

#[async_trait]
impl AuthClient for StubAuthClient {
    async fn login(&self, credential: &Credential) -> AdapterResult<LoginReply> {
        self.calls.lock().push(credential.username.clone());
        if let Some(delay) = self.delays.get(&credential.username) {
            tokio::time::sleep(*delay).await;
        }
        match self.accounts.get(&credential.username) {
            Some((password, success)) if *password == credential.password => {
                Ok(LoginReply::Success(success.clone()))
            }
            Some(_) => Ok(LoginReply::Rejected),
            None => Err(AdapterError::Network("no route to host".into())),
        }
    }
}

/// Memory storage that remembers every record it was asked to save.
#[derive(Default)]
struct RecordingStorage {
    inner: MemoryStorage,
    saves: Mutex<Vec<PersistedRecord>>,
}

impl SessionStorage for RecordingStorage {
    fn load(&self) -> StorageResult<Option<PersistedRecord>> {
        self.inner.load()
    }

    fn save(&self, record: &PersistedRecord) -> StorageResult<()> {
        self.saves.lock().push(record.clone());
        self.inner.save(record)
    }

    fn clear(&self) -> StorageResult<()> {
        self.inner.clear()
    }
}

fn file_store(path: &Path) -> SessionStore {
    SessionStore::init(Arc::new(admin_backend()), Arc::new(FileStorage::new(path)))
}

fn admin_backend() -> StubAuthClient {
    StubAuthClient::default().with_account("admin", "admin123", "t1", profile(1, "admin"))
}

#[tokio::test]
async fn admin_login_installs_the_returned_session() {
    let store = SessionStore::init(Arc::new(admin_backend()), Arc::new(MemoryStorage::new()));

    store.login("admin", "admin123").await.unwrap();

    let session = store.current_session();
    assert!(store.is_authenticated());
    assert_eq!(session.access_token(), Some("t1"));
    assert_eq!(session.refresh_token(), Some("refresh-t1"));
    assert_eq!(session.user(), Some(&profile(1, "admin")));
}

#[tokio::test]
async fn wrong_password_leaves_initial_state() {
    let store = SessionStore::init(Arc::new(admin_backend()), Arc::new(MemoryStorage::new()));
    let before = store.current_session();

    let err = store.login("admin", "wrong").await.unwrap_err();

    assert_eq!(err.reason(), AuthErrorReason::InvalidCredentials);
    assert_eq!(store.current_session(), before);
    assert_eq!(before, Session::empty());
}

#[tokio::test]
async fn each_login_calls_the_backend_exactly_once() {
    let backend = Arc::new(admin_backend());
    let store = SessionStore::init(backend.clone(), Arc::new(MemoryStorage::new()));

    let err = store.login("ghost", "x").await.unwrap_err();
    assert_eq!(err.reason(), AuthErrorReason::NetworkFailure);
    store.login("admin", "admin123").await.unwrap();

    assert_eq!(*backend.calls.lock(), vec!["ghost".to_string(), "admin".to_string()]);
}

#[tokio::test]
async fn session_survives_restart_through_file_storage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let store = file_store(&path);
    let committed = store.login("admin", "admin123").await.unwrap();
    drop(store.teardown());

    let restarted = file_store(&path);
    assert_eq!(restarted.current_session(), committed);
    assert!(restarted.is_authenticated());

    restarted.logout().await.unwrap();
    drop(restarted.teardown());

    let after_logout = file_store(&path);
    assert!(!after_logout.is_authenticated());
    assert!(!path.exists());
}

#[tokio::test]
async fn corrupt_persisted_record_starts_logged_out() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, b"\x00garbage").unwrap();

    let store = file_store(&path);
    assert!(!store.is_authenticated());

    // A fresh login overwrites the unreadable record.
    store.login("admin", "admin123").await.unwrap();
    let restarted = file_store(&path);
    assert!(restarted.is_authenticated());
}

#[tokio::test]
async fn logout_is_idempotent_from_any_state() {
    let store = SessionStore::init(Arc::new(admin_backend()), Arc::new(MemoryStorage::new()));

    store.logout().await.unwrap();
    assert!(!store.is_authenticated());

    store.login("admin", "admin123").await.unwrap();
    store.logout().await.unwrap();
    store.logout().await.unwrap();
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn attach_credential_tracks_login_state() {
    let store = SessionStore::init(Arc::new(admin_backend()), Arc::new(MemoryStorage::new()));
    let request = ApiRequest::get("users").with_query("page", "1");

    assert_eq!(store.attach_credential(request.clone()), request);

    store.login("admin", "admin123").await.unwrap();
    let attached = store.attach_credential(request.clone());
    assert_eq!(attached.header("authorization"), Some("Bearer t1"));
    assert_eq!(attached.query, request.query);
}

#[tokio::test]
async fn concurrent_logins_never_mix_fields() {
    let backend = StubAuthClient::default()
        .with_account("alice", "pw-a", "token-alice", profile(2, "alice"))
        .with_account("bob", "pw-b", "token-bob", profile(3, "bob"))
        .with_delay("alice", Duration::from_millis(40))
        .with_delay("bob", Duration::from_millis(5));
    let storage = Arc::new(RecordingStorage::default());
    let store = Arc::new(SessionStore::init(Arc::new(backend), storage.clone()));

    let alice = {
        let store = store.clone();
        tokio::spawn(async move { store.login("alice", "pw-a").await })
    };
    let bob = {
        let store = store.clone();
        tokio::spawn(async move { store.login("bob", "pw-b").await })
    };
    alice.await.unwrap().unwrap();
    bob.await.unwrap().unwrap();

    let saves = storage.saves.lock().clone();
    assert_eq!(saves.len(), 2);

    let last_commit = saves.last().unwrap().to_session();
    let session = store.current_session();
    assert_eq!(session, last_commit);

    let user = session.user().unwrap();
    assert_eq!(session.access_token(), Some(format!("token-{}", user.username).as_str()));
    assert_eq!(
        session.refresh_token(),
        Some(format!("refresh-token-{}", user.username).as_str())
    );
}
