use std::{collections::BTreeMap, sync::Mutex};

use serde::{Serialize, de::DeserializeOwned};

use crate::{KeyValueStore, StoreError};

/// Store keeping serialized values in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries
            .lock()
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Unavailable)?;
        entries
            .get(key)
            .map(|value| serde_json::from_str(value))
            .transpose()
            .map_err(StoreError::from)
    }

    fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let value = serde_json::to_string(value)?;
        self.entries
            .lock()
            .map_err(|_| StoreError::Unavailable)?
            .insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Unavailable)?
            .remove(key);
        Ok(())
    }
}
