//! Storage abstractions and implementations
//!
//! Persistence is a best-effort cache behind the [`KeyValueStore`] trait. Two
//! independent keys are used: one for the dictionary cache snapshot and one for the
//! search history.
//!
//! ## Storage Implementations
//!
//! - **MemoryStore**: in-process map, for tests and ephemeral sessions
//! - **FileStore**: one JSON file per key under the configured data directory

pub mod errors;
pub mod file;
pub mod memory;
pub mod schema;
pub mod traits;
pub mod write_behind;

use std::sync::Arc;

use crate::config::{StorageBackend, StorageConfig};

pub use errors::{StorageError, StorageResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::KeyValueStore;
pub use write_behind::WriteBehind;

/// Create the key-value store selected by the configuration.
pub async fn create_store(config: &StorageConfig) -> StorageResult<Arc<dyn KeyValueStore>> {
    match config.backend {
        StorageBackend::Memory => {
            tracing::debug!("Using in-memory storage backend");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::File => {
            let store = FileStore::open(&config.data_dir).await?;
            tracing::info!(dir = %config.data_dir.display(), "Using file storage backend");
            Ok(Arc::new(store))
        }
    }
}
