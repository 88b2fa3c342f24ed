use std::cell::RefCell;
use std::collections::HashMap;

/// Storage slot holding the serialized party list.
pub const PARTY_STORE_KEY: &str = "politicalParties";

/// Errors from a persistence backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backing store does not exist in this environment.
    Unavailable(String),
    ReadFailed(String),
    WriteFailed(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "storage unavailable: {msg}"),
            Self::ReadFailed(msg) => write!(f, "storage read failed: {msg}"),
            Self::WriteFailed(msg) => write!(f, "storage write failed: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Abstraction over a named-blob store (browser localStorage in the web
/// UI, in-memory elsewhere). The store core never touches the browser
/// directly; it goes through this seam.
pub trait PersistenceBackend {
    /// Read the blob stored under `key`, `None` if nothing is stored.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous blob.
    fn store(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the blob under `key`. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory backend for tests and native runs.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistenceBackend for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.borrow_mut().insert(key.into(), value.into());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}
