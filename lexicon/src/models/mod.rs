//! Domain models for dictionary entries, the cache snapshot, and search history

pub mod entry;
pub mod history;
pub mod snapshot;

// Re-export important models
pub use entry::{WordEntry, WordEntryBuilder, normalize_key};
pub use history::{SearchHistory, SearchRecord};
pub use snapshot::CacheSnapshot;
