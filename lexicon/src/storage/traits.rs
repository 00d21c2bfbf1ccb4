//! Trait definitions for persistent storage in Lexicon

use async_trait::async_trait;
use std::fmt::Debug;

use crate::storage::errors::StorageError;

/// String-keyed store of serialized JSON values.
///
/// Persistence in Lexicon is a best-effort cache: callers log failures from these
/// methods and carry on with their in-memory state.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static + Debug {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: String) -> std::result::Result<(), StorageError>;

    /// Remove `key`, returning whether it existed
    async fn remove(&self, key: &str) -> std::result::Result<bool, StorageError>;
}
