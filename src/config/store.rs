//! Thread-safe configuration store backed by a JSON file.

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;
use tracing::{debug, error};

use super::loader::{self, Document};
use super::paths;
use super::value::FromConfigValue;
use crate::error::ConfigError;

/// Whether the store has received any content yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    /// Fresh store; nothing loaded or set.
    Unloaded,
    /// Content came from a successful load or a setter.
    Loaded,
}

struct Inner {
    document: Document,
    state: StoreState,
}

/// Key/value configuration held in memory and persisted as a JSON object.
///
/// Every operation takes the same lock for its whole body, so concurrent
/// callers are linearized: readers share the lock, while setters, `load` and
/// `save` hold it exclusively. The backing file is only touched by
/// [`load`](Self::load) and [`save`](Self::save); setters change memory only.
///
/// Missing keys never produce errors. The typed getters return the caller's
/// default instead, and cross-type reads follow the rules in
/// [`value`](super::value).
pub struct ConfigStore {
    path: PathBuf,
    inner: RwLock<Inner>,
}

impl ConfigStore {
    /// Creates an empty store for `path`, expanding a leading `~`.
    ///
    /// No file I/O happens here; call [`load`](Self::load) to read the file.
    pub fn new(path: &str) -> Self {
        Self::with_path(paths::expand(path))
    }

    /// Creates an empty store for an already-resolved path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            inner: RwLock::new(Inner {
                document: Document::new(),
                state: StoreState::Unloaded,
            }),
        }
    }

    /// Returns the resolved path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> StoreState {
        self.read().state
    }

    /// Replaces the document with the file's contents.
    ///
    /// Returns `false` and logs the cause if the file cannot be read or does
    /// not hold a JSON object. The in-memory document is unchanged on failure.
    pub fn load(&self) -> bool {
        match self.try_load() {
            Ok(()) => true,
            Err(e) => {
                error!(path = %e.path().display(), error = %e, "Failed to load config");
                false
            }
        }
    }

    /// Like [`load`](Self::load), but returns the error instead of logging it.
    pub fn try_load(&self) -> Result<(), ConfigError> {
        let mut inner = self.write();

        debug!(path = %self.path.display(), "Loading config");

        let document = loader::load_from_path(&self.path)?;
        inner.document = document;
        inner.state = StoreState::Loaded;

        debug!(path = %self.path.display(), keys = inner.document.len(), "Config loaded");
        Ok(())
    }

    /// Writes the document to the backing file.
    ///
    /// Returns `false` and logs the cause if the file cannot be written. The
    /// previous file, if any, is left intact on failure.
    pub fn save(&self) -> bool {
        match self.try_save() {
            Ok(()) => true,
            Err(e) => {
                error!(path = %e.path().display(), error = %e, "Failed to save config");
                false
            }
        }
    }

    /// Like [`save`](Self::save), but returns the error instead of logging it.
    pub fn try_save(&self) -> Result<(), ConfigError> {
        // Exclusive so no setter or second save interleaves with the write
        let inner = self.write();

        debug!(path = %self.path.display(), "Saving config");

        loader::save_to_path(&self.path, &inner.document)
    }

    /// Stores a string value under `key`.
    pub fn set_string(&self, key: &str, value: &str) {
        self.set_value(key, Value::from(value));
    }

    /// Stores an unsigned integer value under `key`.
    pub fn set_uint32(&self, key: &str, value: u32) {
        self.set_value(key, Value::from(value));
    }

    /// Stores a boolean value under `key`.
    pub fn set_bool(&self, key: &str, value: bool) {
        self.set_value(key, Value::from(value));
    }

    /// Returns the value under `key` as a string, or `default` if absent.
    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.get_value(key).unwrap_or_else(|| default.to_string())
    }

    /// Returns the value under `key` as an unsigned integer, or `default` if
    /// absent.
    pub fn get_uint32(&self, key: &str, default: u32) -> u32 {
        self.get_value(key).unwrap_or(default)
    }

    /// Returns the value under `key` as a boolean, or `default` if absent.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get_value(key).unwrap_or(default)
    }

    /// Returns true if `key` holds a value of any type.
    pub fn contains(&self, key: &str) -> bool {
        self.read().document.contains_key(key)
    }

    /// Removes `key`, returning whether it was present.
    pub fn remove(&self, key: &str) -> bool {
        self.write().document.remove(key).is_some()
    }

    /// Returns all keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.read().document.keys().cloned().collect()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.read().document.len()
    }

    /// Returns true if the document has no entries.
    pub fn is_empty(&self) -> bool {
        self.read().document.is_empty()
    }

    /// Returns a copy of the whole document as a JSON object.
    pub fn snapshot(&self) -> Value {
        Value::Object(self.read().document.clone())
    }

    fn set_value(&self, key: &str, value: Value) {
        let mut inner = self.write();
        inner.document.insert(key.to_string(), value);
        inner.state = StoreState::Loaded;
    }

    fn get_value<T: FromConfigValue>(&self, key: &str) -> Option<T> {
        self.read().document.get(key).and_then(T::from_config_value)
    }

    // A panicking holder cannot leave the document half-updated: every
    // mutation is a single map operation or a whole-document swap.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.read();
        f.debug_struct("ConfigStore")
            .field("path", &self.path)
            .field("state", &inner.state)
            .field("keys", &inner.document.len())
            .finish()
    }
}
