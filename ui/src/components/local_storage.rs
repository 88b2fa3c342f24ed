use polis_common::storage::{PersistenceBackend, StorageError};

/// Persistence backend over the browser's localStorage.
///
/// Off-wasm (native checks, tests) it degrades to an in-memory store so
/// the components still compile and run.
#[derive(Debug, Default)]
pub struct BrowserStorage {
    #[cfg(not(target_family = "wasm"))]
    fallback: polis_common::storage::MemoryBackend,
}

impl BrowserStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(target_family = "wasm")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .ok_or_else(|| StorageError::Unavailable("no window".into()))?
        .local_storage()
        .map_err(|_| StorageError::Unavailable("localStorage access denied".into()))?
        .ok_or_else(|| StorageError::Unavailable("localStorage unavailable".into()))
}

#[cfg(target_family = "wasm")]
impl PersistenceBackend for BrowserStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_storage()?
            .get_item(key)
            .map_err(|_| StorageError::ReadFailed(format!("failed to read '{key}'")))
    }

    fn store(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // set_item fails on quota overrun or when storage is disabled
        local_storage()?
            .set_item(key, value)
            .map_err(|_| StorageError::WriteFailed(format!("failed to write '{key}'")))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        local_storage()?
            .remove_item(key)
            .map_err(|_| StorageError::WriteFailed(format!("failed to remove '{key}'")))
    }
}

#[cfg(not(target_family = "wasm"))]
impl PersistenceBackend for BrowserStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.fallback.load(key)
    }

    fn store(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.fallback.store(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.fallback.remove(key)
    }
}
