//! Process-lifetime storage; the record disappears with the process.

use parking_lot::Mutex;

use super::{PersistedRecord, SessionStorage, StorageResult};

#[derive(Debug, Default)]
pub struct MemoryStorage {
    record: Mutex<Option<PersistedRecord>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `record` already persisted, as if left by an earlier run.
    pub fn with_record(record: PersistedRecord) -> Self {
        Self {
            record: Mutex::new(Some(record)),
        }
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> StorageResult<Option<PersistedRecord>> {
        Ok(self.record.lock().clone())
    }

    fn save(&self, record: &PersistedRecord) -> StorageResult<()> {
        *self.record.lock() = Some(record.clone());
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        self.record.lock().take();
        Ok(())
    }
}
