//! Per-client key-value storage backing the session store.
//!
//! ARCHITECTURE
//! ============
//! `KeyValueStore` mirrors the browser `localStorage` surface (string keys,
//! string values). `MemoryStore` serves tests and ephemeral clients;
//! `FileStore` keeps the entries in a JSON object on disk so a session
//! survives restarts.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage file is not a JSON object: {0}")]
    Corrupt(String),
    #[error("storage serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// String-keyed, string-valued local storage.
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
