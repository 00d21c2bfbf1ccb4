//! # Lexicon
//!
//! Dictionary lookup cache with ranked search, access tracking and a persistent
//! search history.
//!
//! ## Quick Start
//!
//! ```rust
//! use lexicon::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let dataset = Dataset::from_json_str(
//!         r#"{ "words": [ { "word": "bet" }, { "word": "beta" }, { "word": "cab" } ] }"#,
//!     )?;
//!     let lexicon = Lexicon::for_testing(dataset).await?;
//!
//!     // Exact matches rank before prefix matches, which rank before substrings
//!     let results = lexicon.search("bet");
//!     assert_eq!(results.len(), 2);
//!
//!     // Lookups are case-insensitive and feed the popular-words list
//!     lexicon.get_entry("BETA").await;
//!     assert_eq!(lexicon.popular_words(1), vec!["beta"]);
//!
//!     // Only searches for real words are recorded
//!     assert!(lexicon.record_search("cab").await);
//!     assert!(!lexicon.record_search("zzznotaword").await);
//!
//!     lexicon.shutdown().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Dataset**: immutable JSON input, validated for shape on load
//! - **DictionaryStore**: versioned in-memory snapshot with a case-insensitive
//!   index, persisted through a deferred write-behind
//! - **SearchHistoryLedger**: frequency-ranked history, persisted on every change
//! - **Storage**: async key-value backends (in-memory or one JSON file per key)

pub mod config;
pub mod core;
pub mod dataset;
pub mod logging;
pub mod models;
pub mod search;
pub mod simple;
pub mod storage;

pub use simple::{Lexicon, LexiconBuilder};

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    // Re-export the simplified API (recommended for new users)
    pub use crate::simple::{Lexicon, LexiconBuilder};

    // Re-export core initialization functions
    pub use crate::init;

    // Re-export config types
    pub use crate::config::{ConfigBuilder, ConfigLoader, LexiconConfig, LogLevel, StorageBackend};

    // Re-export model types
    pub use crate::dataset::Dataset;
    pub use crate::models::{SearchHistory, SearchRecord, WordEntry};
    pub use crate::search::{MatchKind, SearchHit};

    // Re-export core types for advanced usage
    pub use crate::core::{Clock, DictionaryStore, FixedClock, SearchHistoryLedger, SystemClock};

    // Re-export storage types for advanced usage
    pub use crate::storage::{FileStore, KeyValueStore, MemoryStore, StorageError};

    // Re-export essential result type
    pub use crate::{LexiconError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for Lexicon operations
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    /// The dataset could not be loaded
    #[error("Dataset error: {0}")]
    Dataset(#[from] dataset::DatasetError),

    /// Error during storage operations
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] logging::LogError),

    /// Other unclassified errors
    #[error("{0}")]
    Other(String),
}

impl From<config::ConfigError> for LexiconError {
    fn from(err: config::ConfigError) -> Self {
        LexiconError::Configuration(err.to_string())
    }
}

/// Result type for Lexicon operations
pub type Result<T> = std::result::Result<T, LexiconError>;

/// Initialize Lexicon from a configuration
///
/// Installs logging, loads the dataset from `config.dataset.path`, opens the
/// configured storage backend and hydrates the cache and search history.
///
/// # Examples
///
/// ```rust,no_run
/// use lexicon::prelude::*;
///
/// async fn example() -> Result<()> {
///     let config = ConfigBuilder::production()
///         .with_dataset_path("./dictionary.json")
///         .build()?;
///     let lexicon = lexicon::init(config).await?;
///     println!("{} words", lexicon.dictionary_size());
///     Ok(())
/// }
/// ```
pub async fn init(config: config::LexiconConfig) -> Result<Lexicon> {
    // Ignore errors if tracing is already initialized
    let _ = logging::init(&config.logging);

    Lexicon::builder().with_config(config).build().await
}

/// Initialize Lexicon with default configuration
///
/// The dataset path comes from `LEXICON_DATASET`.
pub async fn init_with_defaults() -> Result<Lexicon> {
    let config = config::ConfigBuilder::defaults().build()?;
    init(config).await
}
