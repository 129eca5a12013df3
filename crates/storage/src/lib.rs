#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use repfit_domain as domain;
use serde::{Serialize, de::DeserializeOwned};

pub mod key_value;
#[cfg(target_arch = "wasm32")]
#[allow(clippy::module_name_repetitions)]
pub mod local_storage;
mod memory;

pub use key_value::KeyValue;
pub use memory::MemoryStore;

/// Blob store holding JSON values under string keys.
pub trait KeyValueStore {
    /// Returns `None` if the key is not present.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError>;
    fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("storage unavailable")]
    Unavailable,
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<StoreError> for domain::StorageError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Unavailable => domain::StorageError::Unavailable,
            StoreError::Serialization(err) => domain::StorageError::Other(Box::new(err)),
            StoreError::Other(err) => domain::StorageError::Other(err.into()),
        }
    }
}

impl From<StoreError> for domain::ReadError {
    fn from(value: StoreError) -> Self {
        domain::ReadError::Storage(value.into())
    }
}

impl From<StoreError> for domain::CreateError {
    fn from(value: StoreError) -> Self {
        domain::CreateError::Storage(value.into())
    }
}

impl From<StoreError> for domain::UpdateError {
    fn from(value: StoreError) -> Self {
        domain::UpdateError::Storage(value.into())
    }
}

impl From<StoreError> for domain::DeleteError {
    fn from(value: StoreError) -> Self {
        domain::DeleteError::Storage(value.into())
    }
}
