//! Session record kept in a private JSON file.
//!
//! Writes go to a uniquely named temporary file in the same directory
//! which is then renamed over the target, so a crash mid-write leaves the
//! previous record in place and concurrent writers never share a temp file.
//! On Unix the file is created with mode `0600`.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use super::{PersistedRecord, SessionStorage, StorageError, StorageResult};

#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, path: &Path, source: io::Error) -> StorageError {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> StorageResult<Option<PersistedRecord>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.io_error(&self.path, err)),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|err| StorageError::Corrupt(format!("{}: {err}", self.path.display())))
    }

    fn save(&self, record: &PersistedRecord) -> StorageResult<()> {
        let parent = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => parent,
            None => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|err| self.io_error(parent, err))?;

        let bytes = serde_json::to_vec(record)
            .map_err(|err| StorageError::Corrupt(format!("cannot encode record: {err}")))?;

        let mut temp = NamedTempFile::new_in(parent).map_err(|err| self.io_error(parent, err))?;
        temp.write_all(&bytes)
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|err| self.io_error(temp.path(), err))?;
        temp.persist(&self.path)
            .map_err(|err| self.io_error(&self.path, err.error))?;

        debug!(path = %self.path.display(), "session record written");
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "session record removed");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.io_error(&self.path, err)),
        }
    }
}
