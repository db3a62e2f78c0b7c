//! Persisted session state.
//!
//! [`SessionStorage`] is the boundary between the session store and wherever
//! the session record lives. Swapping the medium (memory, a private file, an
//! OS keychain) never touches the store's contract.

pub mod file;
pub mod memory;
pub mod models;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use models::{PersistedRecord, REFRESH_TOKEN_KEY, TOKEN_KEY, USER_KEY};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("corrupt session record: {0}")]
    Corrupt(String),

    #[error("session storage unavailable: {0}")]
    Unavailable(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Reads and writes the whole session record.
///
/// `save` must replace the record atomically: a reader sees either the old
/// record or the new one, never a mix.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStorage: Send + Sync {
    /// Returns `None` when nothing has been persisted.
    fn load(&self) -> StorageResult<Option<PersistedRecord>>;

    fn save(&self, record: &PersistedRecord) -> StorageResult<()>;

    /// Removing a record that does not exist succeeds.
    fn clear(&self) -> StorageResult<()>;
}
