//! Pluggable key-value persistence capability.
//!
//! The state containers persist snapshots through an injected
//! [`KeyValueStore`] rather than talking to any concrete storage directly.
//! [`MemoryStore`] satisfies environments without persistent local storage;
//! [`JsonFileStore`] keeps one JSON file per key under a data directory.
//!
//! Values are JSON strings. There is no schema versioning: a malformed or
//! missing value for any key is treated as "absent" and the corresponding
//! in-memory collection starts empty.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

/// Fixed keys for the storefront's persisted state.
pub mod keys {
    /// Serialized active cart line list.
    pub const CART_LINES: &str = "clementine-cart";
    /// Serialized saved-for-later list.
    pub const SAVED_ITEMS: &str = "clementine-saved-items";
    /// Serialized current-user record.
    pub const CURRENT_USER: &str = "clementine-current-user";
    /// Opaque session token string.
    pub const AUTH_TOKEN: &str = "clementine-auth-token";
}

/// Errors a storage backend may report.
///
/// Containers never propagate these; they are logged at the point of use
/// and the operation continues with in-memory state only.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing store cannot be used in this environment.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A string-keyed key-value store holding JSON-serialized values.
pub trait KeyValueStore: Send {
    /// Read the value for `key`, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value for `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store for tests and restricted environments.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-backed store keeping one `<key>.json` file per key.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Load and deserialize a persisted value, treating every failure as absent.
///
/// Malformed JSON or a storage read failure is logged and discarded so the
/// caller falls back to an empty collection.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "discarding malformed persisted value");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            warn!(key, error = %e, "failed to read persisted value");
            None
        }
    }
}

/// Serialize and write a value, logging and swallowing any failure.
pub fn persist_json<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => {
            if let Err(e) = store.set(key, &raw) {
                warn!(key, error = %e, "failed to persist value");
            }
        }
        Err(e) => {
            warn!(key, error = %e, "failed to serialize value for persistence");
        }
    }
}
