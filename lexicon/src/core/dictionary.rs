//! Dictionary cache store
//!
//! Owns the in-memory [`CacheSnapshot`], hydrates it from persistence on first use,
//! and writes it back through a deferred write-behind after lookups change its
//! access state.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::{CacheConfig, StorageConfig};
use crate::core::clock::Clock;
use crate::dataset::Dataset;
use crate::models::{CacheSnapshot, WordEntry};
use crate::search::{SearchHit, SearchRanker};
use crate::storage::schema::{self, Decoded};
use crate::storage::{KeyValueStore, StorageResult, WriteBehind};

type SharedSnapshot = Arc<RwLock<Option<CacheSnapshot>>>;

/// Case-insensitive dictionary lookups, search and access tracking.
///
/// Cloning is cheap and every clone shares the same snapshot and write scheduler.
/// Until [`initialize`](Self::initialize) completes, the store behaves as empty.
#[derive(Debug, Clone)]
pub struct DictionaryStore {
    dataset: Arc<Dataset>,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    snapshot: SharedSnapshot,
    writer: WriteBehind,
    ranker: SearchRanker,
    cache_key: String,
    schema_version: String,
}

impl DictionaryStore {
    pub fn new(
        dataset: Arc<Dataset>,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        storage: &StorageConfig,
        cache: &CacheConfig,
    ) -> Self {
        Self {
            dataset,
            store,
            clock,
            snapshot: Arc::new(RwLock::new(None)),
            writer: WriteBehind::new(Duration::from_millis(cache.persist_delay_ms)),
            ranker: SearchRanker::new(),
            cache_key: storage.cache_key.clone(),
            schema_version: cache.schema_version.clone(),
        }
    }

    /// Load the snapshot, adopting the persisted one when it is current and valid.
    ///
    /// Subsequent calls are no-ops. Unusable persisted state is logged and replaced
    /// with a fresh snapshot built from the dataset.
    pub async fn initialize(&self) {
        if self.is_initialized() {
            return;
        }

        let blob = match self.store.get(&self.cache_key).await {
            Ok(blob) => blob,
            Err(e) => {
                warn!(key = %self.cache_key, error = %e, "Failed to read dictionary cache");
                None
            }
        };

        let snapshot = match schema::decode_snapshot(blob.as_deref(), &self.schema_version) {
            Decoded::Valid(snapshot) => {
                info!(
                    version = %snapshot.version(),
                    entries = snapshot.len(),
                    "Restored dictionary cache"
                );
                snapshot
            }
            Decoded::Missing => {
                debug!("No dictionary cache stored, building from dataset");
                self.fresh_snapshot()
            }
            Decoded::Invalid(reason) => {
                warn!(
                    key = %self.cache_key,
                    reason = %reason,
                    "Discarding stored dictionary cache, rebuilding from dataset"
                );
                self.fresh_snapshot()
            }
        };

        let mut guard = write(&self.snapshot);
        // Another caller may have finished first
        if guard.is_none() {
            *guard = Some(snapshot);
        }
    }

    pub fn is_initialized(&self) -> bool {
        read(&self.snapshot).is_some()
    }

    /// Look up a word case-insensitively, recording the access.
    ///
    /// Every hit schedules its own deferred persistence write. The write encodes the
    /// snapshot as it is when the delay elapses, so later writes carry newer state.
    pub async fn get_entry(&self, word: &str) -> Option<WordEntry> {
        let entry = write(&self.snapshot)
            .as_mut()
            .and_then(|snapshot| snapshot.touch(word, self.clock.now()))?;

        self.schedule_persist();
        Some(entry)
    }

    /// Matching entries ranked exact, then prefix, then substring.
    pub fn search(&self, term: &str, limit: usize) -> Vec<WordEntry> {
        self.search_scored(term, limit)
            .into_iter()
            .map(|hit| hit.entry)
            .collect()
    }

    /// Like [`search`](Self::search), keeping how each entry matched.
    pub fn search_scored(&self, term: &str, limit: usize) -> Vec<SearchHit> {
        match read(&self.snapshot).as_ref() {
            Some(snapshot) => self.ranker.rank(snapshot.entries(), term, limit),
            None => Vec::new(),
        }
    }

    pub fn dictionary_size(&self) -> usize {
        read(&self.snapshot).as_ref().map_or(0, CacheSnapshot::len)
    }

    /// Most recently accessed words. See [`CacheSnapshot::popular_words`].
    pub fn popular_words(&self, limit: usize) -> Vec<String> {
        write(&self.snapshot)
            .as_mut()
            .map(|snapshot| snapshot.popular_words(limit))
            .unwrap_or_default()
    }

    pub fn contains(&self, word: &str) -> bool {
        read(&self.snapshot)
            .as_ref()
            .is_some_and(|snapshot| snapshot.contains(word))
    }

    /// Canonical spelling of `word` if it is in the dictionary
    pub fn canonical_key(&self, word: &str) -> Option<String> {
        read(&self.snapshot)
            .as_ref()
            .and_then(|snapshot| snapshot.canonical_key(word).map(str::to_string))
    }

    /// All words in dataset order
    pub fn words(&self) -> Vec<String> {
        read(&self.snapshot)
            .as_ref()
            .map(|snapshot| {
                snapshot
                    .entries()
                    .iter()
                    .map(|entry| entry.word.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Drop the in-memory snapshot and all pending writes.
    ///
    /// The next [`initialize`](Self::initialize) hydrates from persistence again.
    pub fn reset(&self) {
        self.writer.cancel();
        *write(&self.snapshot) = None;
        debug!("Dictionary cache reset");
    }

    /// Reset and remove the persisted snapshot.
    pub async fn clear_cache(&self) {
        self.reset();
        match self.store.remove(&self.cache_key).await {
            Ok(removed) => debug!(key = %self.cache_key, removed, "Cleared dictionary cache"),
            Err(e) => warn!(key = %self.cache_key, error = %e, "Failed to remove dictionary cache"),
        }
    }

    /// Cancel every pending deferred write and persist the current snapshot now.
    pub async fn flush(&self) -> StorageResult<()> {
        self.writer.cancel();
        persist_snapshot(&self.snapshot, self.store.as_ref(), &self.cache_key).await
    }

    /// Whether any deferred write has yet to finish
    pub fn has_pending_write(&self) -> bool {
        self.writer.is_pending()
    }

    fn fresh_snapshot(&self) -> CacheSnapshot {
        CacheSnapshot::build(self.schema_version.clone(), self.dataset.entries().to_vec())
    }

    fn schedule_persist(&self) {
        let snapshot = Arc::clone(&self.snapshot);
        let store = Arc::clone(&self.store);
        let key = self.cache_key.clone();

        let pending = self.writer.schedule(async move {
            if let Err(e) = persist_snapshot(&snapshot, store.as_ref(), &key).await {
                warn!(key = %key, error = %e, "Failed to persist dictionary cache");
            }
        });

        debug!(delay = ?self.writer.delay(), pending, "Scheduled dictionary cache write");
    }
}

/// Encode the snapshot as it stands and write it. Nothing is written after a reset.
async fn persist_snapshot(
    snapshot: &SharedSnapshot,
    store: &dyn KeyValueStore,
    key: &str,
) -> StorageResult<()> {
    let blob = {
        let guard = read(snapshot);
        match guard.as_ref() {
            Some(snapshot) => schema::encode_snapshot(snapshot)?,
            None => return Ok(()),
        }
    };

    store.set(key, blob).await?;
    debug!(key = %key, "Persisted dictionary cache");
    Ok(())
}

fn read(snapshot: &SharedSnapshot) -> RwLockReadGuard<'_, Option<CacheSnapshot>> {
    snapshot.read().unwrap_or_else(PoisonError::into_inner)
}

fn write(snapshot: &SharedSnapshot) -> RwLockWriteGuard<'_, Option<CacheSnapshot>> {
    snapshot.write().unwrap_or_else(PoisonError::into_inner)
}
