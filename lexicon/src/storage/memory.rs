//! In-memory key-value store for testing and ephemeral sessions

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::storage::errors::StorageError;
use crate::storage::traits::KeyValueStore;

/// Key-value store held entirely in process memory.
///
/// An optional per-value byte quota models the storage limits of a real backend so
/// that write-failure handling can be exercised.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
    max_value_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects values larger than `max_value_bytes`
    pub fn with_quota(max_value_bytes: usize) -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
            max_value_bytes: Some(max_value_bytes),
        }
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.values.read().map(|values| values.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn poisoned() -> StorageError {
        StorageError::Operation("memory store lock poisoned".to_string())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.read().map_err(|_| Self::poisoned())?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        if let Some(limit) = self.max_value_bytes
            && value.len() > limit
        {
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
                size: value.len(),
                limit,
            });
        }

        let mut values = self.values.write().map_err(|_| Self::poisoned())?;
        values.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let mut values = self.values.write().map_err(|_| Self::poisoned())?;
        Ok(values.remove(key).is_some())
    }
}
