//! Key/value session persistence.
//!
//! The token and user id live in an injected store so nothing reaches for
//! ambient global state. `InMemorySessionStore` lives for the process,
//! `FileSessionStore` survives restarts.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key for the authenticated user id.
pub const USER_ID_KEY: &str = "userId";

/// Process-wide key/value persistence with explicit set/get/remove.
///
/// Writes are best-effort, mirroring local storage: the API never fails, a
/// broken backing medium is logged and the in-memory view stays current.
pub trait SessionStore: Send + Sync {
    fn set(&self, key: &str, value: &str);
    fn get(&self, key: &str) -> Option<String>;
    fn remove(&self, key: &str);
}

impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value);
    }

    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}

/// Volatile store; state is gone when the process exits.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .expect("session store lock poisoned")
            .insert(key.to_string(), value.to_string());
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("session store lock poisoned")
            .get(key)
            .cloned()
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .expect("session store lock poisoned")
            .remove(key);
    }
}

/// JSON-file-backed store with write-through persistence.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileSessionStore {
    /// Open a store at `path`, loading any previously persisted entries.
    /// A missing or unreadable file starts the store empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Self::load(&path);
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    fn load(path: &Path) -> HashMap<String, String> {
        match std::fs::read(path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                log::warn!("Discarding corrupt session file {}: {e}", path.display());
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        }
    }

    fn persist(&self, entries: &HashMap<String, String>) {
        let serialized = match serde_json::to_vec_pretty(entries) {
            Ok(serialized) => serialized,
            Err(e) => {
                log::error!("Failed to serialize session state: {e}");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, serialized) {
            log::error!("Failed to write session file {}: {e}", self.path.display());
        }
    }
}

impl SessionStore for FileSessionStore {
    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().expect("session store lock poisoned");
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries);
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("session store lock poisoned")
            .get(key)
            .cloned()
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().expect("session store lock poisoned");
        entries.remove(key);
        self.persist(&entries);
    }
}
