//! Simplified Lexicon API
//!
//! [`Lexicon`] bundles the dictionary store and the search history ledger behind a
//! single handle. It is cheap to clone and every clone shares the same state.

use rand::Rng;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{ConfigBuilder, LexiconConfig};
use crate::core::{Clock, DictionaryStore, SearchHistoryLedger, SystemClock};
use crate::dataset::{Dataset, DatasetError};
use crate::models::{SearchHistory, WordEntry};
use crate::search::SearchHit;
use crate::storage::{self, KeyValueStore};
use crate::{LexiconError, Result};

/// Dictionary lookups, ranked search, access tracking and search history.
///
/// Clones share state. History changes are applied in memory under a lock but
/// written to storage after it is released, so overlapping `record_search` or
/// `clear_search_history` calls made through different clones may reach storage
/// in a different order than they were applied. A `record_search` that finishes
/// after a concurrent clear can write the history back. Await these calls in
/// sequence when the persisted copy must match memory.
///
/// # Examples
///
/// ```rust
/// use lexicon::Lexicon;
/// use lexicon::dataset::Dataset;
/// use lexicon::models::WordEntry;
///
/// async fn example() -> lexicon::Result<()> {
///     let dataset = Dataset::new(vec![WordEntry::new("bet"), WordEntry::new("beta")])?;
///     let lexicon = Lexicon::for_testing(dataset).await?;
///
///     let entry = lexicon.get_entry("BET").await;
///     assert!(entry.is_some());
///
///     lexicon.record_search("bet").await;
///     assert_eq!(lexicon.popular_searches(5), vec!["bet"]);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Lexicon {
    dictionary: DictionaryStore,
    history: SearchHistoryLedger,
    config: Arc<LexiconConfig>,
}

impl Lexicon {
    /// Create a Lexicon with default configuration
    ///
    /// The dataset path is taken from `LEXICON_DATASET`; without it this fails with
    /// [`DatasetError::NotConfigured`].
    pub async fn new() -> Result<Self> {
        let config = ConfigBuilder::defaults().build()?;
        crate::init(config).await
    }

    /// Create a Lexicon over the dataset file at `path` with persistent storage
    pub async fn with_dataset_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder()
            .with_config(ConfigBuilder::production().build()?)
            .with_dataset_path(path)
            .build()
            .await
    }

    /// Create a Lexicon for testing: in-memory storage, system clock.
    pub async fn for_testing(dataset: Dataset) -> Result<Self> {
        Self::builder()
            .with_config(ConfigBuilder::testing().build()?)
            .with_dataset(dataset)
            .build()
            .await
    }

    /// Create a builder for custom setups
    pub fn builder() -> LexiconBuilder {
        LexiconBuilder::new()
    }

    /// Load the dictionary snapshot and search history. Repeated calls are no-ops.
    pub async fn initialize(&self) {
        self.dictionary.initialize().await;
        self.history.hydrate().await;
    }

    /// Look up a word case-insensitively and record the access
    pub async fn get_entry(&self, word: &str) -> Option<WordEntry> {
        self.dictionary.get_entry(word).await
    }

    /// Search using the configured default limit
    pub fn search(&self, term: &str) -> Vec<WordEntry> {
        self.search_with_limit(term, self.config.search.default_limit)
    }

    pub fn search_with_limit(&self, term: &str, limit: usize) -> Vec<WordEntry> {
        self.dictionary.search(term, limit)
    }

    /// Search, keeping how each entry matched
    pub fn search_scored(&self, term: &str, limit: usize) -> Vec<SearchHit> {
        self.dictionary.search_scored(term, limit)
    }

    pub fn dictionary_size(&self) -> usize {
        self.dictionary.dictionary_size()
    }

    /// Most recently looked-up words.
    ///
    /// The list is cached and only recomputed when a larger `limit` is requested,
    /// so it can trail behind lookups made since it was last computed.
    pub fn popular_words(&self, limit: usize) -> Vec<String> {
        self.dictionary.popular_words(limit)
    }

    /// Record a search. Returns `false` for blank terms and unknown words.
    pub async fn record_search(&self, term: &str) -> bool {
        self.history.record_search(term).await
    }

    pub fn popular_searches(&self, limit: usize) -> Vec<String> {
        self.history.popular_searches(limit)
    }

    pub fn recent_searches(&self, limit: usize) -> Vec<String> {
        self.history.recent_searches(limit)
    }

    pub fn sample_searches(&self, limit: usize) -> Vec<String> {
        self.history.sample_searches(limit)
    }

    pub fn sample_searches_with<R: Rng + ?Sized>(&self, limit: usize, rng: &mut R) -> Vec<String> {
        self.history.sample_searches_with(limit, rng)
    }

    pub async fn clear_search_history(&self) {
        self.history.clear_search_history().await;
    }

    /// A copy of the current search history
    pub fn history(&self) -> SearchHistory {
        self.history.history()
    }

    /// Drop in-memory state. The next [`initialize`](Self::initialize) reloads it.
    pub fn reset(&self) {
        self.dictionary.reset();
        self.history.reset();
    }

    /// Drop in-memory dictionary state and its persisted snapshot.
    ///
    /// ⚠️ **Warning**: Access times and the popular-words list are lost.
    pub async fn clear_cache(&self) {
        self.dictionary.clear_cache().await;
    }

    /// Persist the dictionary snapshot now instead of waiting for the deferred write
    pub async fn flush(&self) -> Result<()> {
        self.dictionary.flush().await?;
        Ok(())
    }

    /// Flush pending state. Call before dropping the last handle.
    pub async fn shutdown(&self) -> Result<()> {
        self.flush().await?;
        tracing::info!("Lexicon shut down");
        Ok(())
    }

    pub fn config(&self) -> &LexiconConfig {
        &self.config
    }

    /// The underlying dictionary store
    pub fn dictionary(&self) -> &DictionaryStore {
        &self.dictionary
    }

    /// The underlying search history ledger
    pub fn search_history(&self) -> &SearchHistoryLedger {
        &self.history
    }
}

/// Builder for advanced Lexicon configuration
pub struct LexiconBuilder {
    config_builder: ConfigBuilder,
    dataset: Option<Dataset>,
    store: Option<Arc<dyn KeyValueStore>>,
    clock: Option<Arc<dyn Clock>>,
}

impl LexiconBuilder {
    fn new() -> Self {
        Self {
            config_builder: ConfigBuilder::new(),
            dataset: None,
            store: None,
            clock: None,
        }
    }

    /// Start from a complete configuration
    pub fn with_config(mut self, config: LexiconConfig) -> Self {
        self.config_builder = ConfigBuilder::from_config(config);
        self
    }

    /// Use an already loaded dataset instead of `dataset.path`
    pub fn with_dataset(mut self, dataset: Dataset) -> Self {
        self.dataset = Some(dataset);
        self
    }

    /// Load the dataset from a JSON file
    pub fn with_dataset_path(mut self, path: impl AsRef<Path>) -> Self {
        self.config_builder = self.config_builder.with_dataset_path(path);
        self
    }

    /// Set the data directory for file storage
    pub fn with_data_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.config_builder = self.config_builder.with_data_dir(path);
        self
    }

    /// Use in-memory storage (good for testing)
    pub fn with_memory_storage(mut self) -> Self {
        self.config_builder = self.config_builder.with_memory_storage();
        self
    }

    /// Use a specific key-value store, overriding the configured backend
    pub fn with_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Use a specific time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_schema_version(mut self, version: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.with_schema_version(version);
        self
    }

    /// Delay between a lookup and the deferred snapshot write
    pub fn with_persist_delay(mut self, delay: Duration) -> Self {
        self.config_builder = self.config_builder.with_persist_delay(delay);
        self
    }

    pub fn with_history_limit(mut self, max_entries: usize) -> Self {
        self.config_builder = self.config_builder.with_history_limit(max_entries);
        self
    }

    /// Build and initialize the Lexicon instance
    pub async fn build(self) -> Result<Lexicon> {
        let config = self.config_builder.build()?;

        let dataset = match (self.dataset, &config.dataset.path) {
            (Some(dataset), _) => dataset,
            (None, Some(path)) => Dataset::load(path)?,
            (None, None) => return Err(LexiconError::Dataset(DatasetError::NotConfigured)),
        };

        let store = match self.store {
            Some(store) => store,
            None => storage::create_store(&config.storage).await?,
        };
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        let dictionary = DictionaryStore::new(
            Arc::new(dataset),
            Arc::clone(&store),
            Arc::clone(&clock),
            &config.storage,
            &config.cache,
        );
        let history = SearchHistoryLedger::new(
            dictionary.clone(),
            store,
            clock,
            &config.storage,
            &config.history,
        );

        let lexicon = Lexicon {
            dictionary,
            history,
            config: Arc::new(config),
        };
        lexicon.initialize().await;

        tracing::info!(
            entries = lexicon.dictionary_size(),
            "Lexicon initialized"
        );
        Ok(lexicon)
    }
}

impl Default for LexiconBuilder {
    fn default() -> Self {
        Self::new()
    }
}
