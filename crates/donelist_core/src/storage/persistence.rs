//! Best-effort persistence adapter.
//!
//! # Responsibility
//! - Load the collection once at startup from a key-value backend.
//! - Write the full collection back after every mutation.
//!
//! # Invariants
//! - `load` never fails: missing, unreadable, or corrupt state yields an
//!   empty collection.
//! - `save` never fails: errors are logged and dropped.

use crate::model::collection::TodoCollection;
use crate::storage::codec::{decode_todos, encode_todos, CodecError};
use crate::storage::kv::{KvStorage, StorageError};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "todos";

#[derive(Debug)]
pub enum PersistenceError {
    Storage(StorageError),
    Codec(CodecError),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Codec(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Codec(err) => Some(err),
        }
    }
}

impl From<StorageError> for PersistenceError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<CodecError> for PersistenceError {
    fn from(value: CodecError) -> Self {
        Self::Codec(value)
    }
}

/// Binds a key-value backend to the key holding the todo list.
#[derive(Debug)]
pub struct PersistenceAdapter<S> {
    storage: S,
    key: String,
}

impl<S: KvStorage> PersistenceAdapter<S> {
    /// Uses `DEFAULT_STORAGE_KEY`.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Stores the list under a caller-chosen key.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Key the list is read from and written to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the stored collection, falling back to empty on any failure.
    pub fn load(&self) -> TodoCollection {
        match self.try_load() {
            Ok(collection) => {
                debug!(
                    "event=todos_load module=storage status=ok key={} count={}",
                    self.key,
                    collection.len()
                );
                collection
            }
            Err(err) => {
                warn!(
                    "event=todos_load module=storage status=error key={} fallback=empty error={}",
                    self.key, err
                );
                TodoCollection::new()
            }
        }
    }

    /// Loads the stored collection; a missing key is an empty collection.
    ///
    /// # Errors
    /// - Backend read failures and undecodable payloads.
    pub fn try_load(&self) -> Result<TodoCollection, PersistenceError> {
        match self.storage.get(&self.key)? {
            Some(payload) => Ok(decode_todos(&payload)?),
            None => Ok(TodoCollection::new()),
        }
    }

    /// Writes the full collection, logging and swallowing failures.
    pub fn save(&self, collection: &TodoCollection) {
        match self.try_save(collection) {
            Ok(()) => debug!(
                "event=todos_save module=storage status=ok key={} count={}",
                self.key,
                collection.len()
            ),
            Err(err) => warn!(
                "event=todos_save module=storage status=error key={} count={} error={}",
                self.key,
                collection.len(),
                err
            ),
        }
    }

    /// Writes the full collection.
    ///
    /// # Errors
    /// - Encoding or backend write failures.
    pub fn try_save(&self, collection: &TodoCollection) -> Result<(), PersistenceError> {
        let payload = encode_todos(collection)?;
        self.storage.put(&self.key, &payload)?;
        Ok(())
    }
}
