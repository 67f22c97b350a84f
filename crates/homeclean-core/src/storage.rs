use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use crate::CoreError;

/// Named-key string storage shared by every screen of the app.
///
/// Mirrors browser-local storage: each key holds one serialized document and
/// callers own the document format.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), CoreError>;
    fn remove_item(&self, key: &str) -> Result<(), CoreError>;
}

/// Process-local store used by tests and embedders without a data directory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn items(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, CoreError> {
        self.items
            .lock()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.items()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.items()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), CoreError> {
        self.items()?.remove(key);
        Ok(())
    }
}
