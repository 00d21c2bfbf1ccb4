//! Search history ledger
//!
//! Records searches for words that exist in the dictionary, keeps them ranked by
//! frequency, and persists every change immediately.

use chrono::Duration;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

use crate::config::{HistoryConfig, StorageConfig};
use crate::core::clock::Clock;
use crate::core::dictionary::DictionaryStore;
use crate::models::{SearchHistory, normalize_key};
use crate::storage::KeyValueStore;
use crate::storage::schema::{self, Decoded};

type SharedHistory = Arc<RwLock<Option<SearchHistory>>>;

/// Frequency-ranked history of searches, validated against the dictionary.
///
/// Queries made before the ledger is hydrated see an empty history.
#[derive(Debug, Clone)]
pub struct SearchHistoryLedger {
    dictionary: DictionaryStore,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    history: SharedHistory,
    history_key: String,
    max_entries: usize,
    recent_window: Duration,
}

impl SearchHistoryLedger {
    pub fn new(
        dictionary: DictionaryStore,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        storage: &StorageConfig,
        history: &HistoryConfig,
    ) -> Self {
        Self {
            dictionary,
            store,
            clock,
            history: Arc::new(RwLock::new(None)),
            history_key: storage.history_key.clone(),
            max_entries: history.max_entries,
            recent_window: Duration::days(i64::from(history.recent_window_days)),
        }
    }

    /// Load the persisted history once. Unusable blobs are logged and replaced.
    pub async fn hydrate(&self) {
        if read(&self.history).is_some() {
            return;
        }

        let blob = match self.store.get(&self.history_key).await {
            Ok(blob) => blob,
            Err(e) => {
                warn!(key = %self.history_key, error = %e, "Failed to read search history");
                None
            }
        };

        let history = match schema::decode_history(blob.as_deref(), self.max_entries) {
            Decoded::Valid(history) => {
                info!(searches = history.len(), "Restored search history");
                history
            }
            Decoded::Missing => SearchHistory::new(self.clock.now()),
            Decoded::Invalid(reason) => {
                warn!(
                    key = %self.history_key,
                    reason = %reason,
                    "Discarding stored search history"
                );
                SearchHistory::new(self.clock.now())
            }
        };

        let mut guard = write(&self.history);
        if guard.is_none() {
            *guard = Some(history);
        }
    }

    /// Record a search for `term` and persist the history.
    ///
    /// Blank terms and terms that are not dictionary words are ignored. Returns
    /// whether a record was written to the in-memory history.
    pub async fn record_search(&self, term: &str) -> bool {
        let term = normalize_key(term);
        if term.is_empty() {
            return false;
        }
        if !self.dictionary.contains(&term) {
            debug!(term = %term, "Ignoring search for unknown word");
            return false;
        }

        self.hydrate().await;

        let encoded = {
            let mut guard = write(&self.history);
            let history = guard.get_or_insert_with(|| SearchHistory::new(self.clock.now()));
            history.record(&term, self.clock.now(), self.max_entries);
            schema::encode_history(history)
        };

        let result = match encoded {
            Ok(blob) => self.store.set(&self.history_key, blob).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            warn!(key = %self.history_key, error = %e, "Failed to persist search history");
        }

        true
    }

    /// Most frequent searches that are still dictionary words, in stored order.
    pub fn popular_searches(&self, limit: usize) -> Vec<String> {
        read(&self.history)
            .as_ref()
            .map(|history| history.popular(limit, |term| self.dictionary.contains(term)))
            .unwrap_or_default()
    }

    /// Searches made within the recent window, newest first.
    pub fn recent_searches(&self, limit: usize) -> Vec<String> {
        read(&self.history)
            .as_ref()
            .map(|history| history.recent(limit, self.clock.now(), self.recent_window))
            .unwrap_or_default()
    }

    /// Random dictionary words, drawn without replacement.
    pub fn sample_searches(&self, limit: usize) -> Vec<String> {
        self.sample_searches_with(limit, &mut rand::rng())
    }

    /// Like [`sample_searches`](Self::sample_searches) with a caller-supplied RNG.
    pub fn sample_searches_with<R: Rng + ?Sized>(&self, limit: usize, rng: &mut R) -> Vec<String> {
        self.dictionary
            .words()
            .choose_multiple(rng, limit)
            .cloned()
            .collect()
    }

    /// Empty the history and remove its persisted copy.
    pub async fn clear_search_history(&self) {
        *write(&self.history) = Some(SearchHistory::new(self.clock.now()));

        match self.store.remove(&self.history_key).await {
            Ok(removed) => debug!(key = %self.history_key, removed, "Cleared search history"),
            Err(e) => warn!(key = %self.history_key, error = %e, "Failed to remove search history"),
        }
    }

    /// A copy of the current history
    pub fn history(&self) -> SearchHistory {
        read(&self.history)
            .clone()
            .unwrap_or_else(|| SearchHistory::new(self.clock.now()))
    }

    /// Forget the in-memory history so the next hydrate reloads it.
    pub fn reset(&self) {
        *write(&self.history) = None;
    }
}

fn read(history: &SharedHistory) -> RwLockReadGuard<'_, Option<SearchHistory>> {
    history.read().unwrap_or_else(PoisonError::into_inner)
}

fn write(history: &SharedHistory) -> RwLockWriteGuard<'_, Option<SearchHistory>> {
    history.write().unwrap_or_else(PoisonError::into_inner)
}
