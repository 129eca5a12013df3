use gloo_storage::{Storage, errors::StorageError};
use serde::{Serialize, de::DeserializeOwned};

use crate::{KeyValueStore, StoreError};

/// The local storage of the browser.
pub struct LocalStorage;

impl KeyValueStore for LocalStorage {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match gloo_storage::LocalStorage::get(key) {
            Ok(value) => Ok(Some(value)),
            Err(StorageError::KeyNotFound(_)) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        Ok(gloo_storage::LocalStorage::set(key, value)?)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        gloo_storage::LocalStorage::delete(key);
        Ok(())
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::SerdeError(err) => StoreError::Serialization(err),
            err => StoreError::Other(anyhow::anyhow!("{err}")),
        }
    }
}
