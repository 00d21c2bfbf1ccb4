//! Persistence tests
//!
//! Covers snapshot hydration and versioning, the deferred write-behind, search
//! history round-trips, and recovery from storage failures.

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use lexicon::models::CacheSnapshot;
use lexicon::prelude::*;
use lexicon::storage::schema::{self, Decoded};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const CACHE_KEY: &str = "lexicon.dictionary_cache";
const HISTORY_KEY: &str = "lexicon.search_history";

fn dataset() -> Dataset {
    Dataset::new(vec![
        WordEntry::new("bet"),
        WordEntry::new("beta"),
        WordEntry::new("cab"),
    ])
    .expect("Failed to build dataset")
}

async fn lexicon_over(store: Arc<dyn KeyValueStore>) -> Lexicon {
    Lexicon::builder()
        .with_memory_storage()
        .with_dataset(dataset())
        .with_store(store)
        .build()
        .await
        .expect("Failed to initialize Lexicon")
}

async fn stored_version(store: &dyn KeyValueStore) -> Option<String> {
    let blob = store.get(CACHE_KEY).await.unwrap()?;
    let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
    value["version"].as_str().map(str::to_string)
}

/// Store wrapper that counts writes
#[derive(Debug, Default)]
struct CountingStore {
    inner: MemoryStore,
    writes: AtomicUsize,
}

impl CountingStore {
    fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyValueStore for CountingStore {
    async fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> std::result::Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> std::result::Result<bool, StorageError> {
        self.inner.remove(key).await
    }
}

#[tokio::test(start_paused = true)]
async fn test_outdated_snapshot_is_rebuilt_and_rewritten() {
    let store = Arc::new(MemoryStore::new());
    let mut outdated = CacheSnapshot::build("0.9.0", dataset().entries().to_vec());
    outdated.touch("cab", Utc::now());
    store
        .set(CACHE_KEY, schema::encode_snapshot(&outdated).unwrap())
        .await
        .unwrap();

    let lexicon = lexicon_over(store.clone()).await;

    // Access state from the old schema is discarded
    assert!(lexicon.popular_words(3).is_empty());
    assert_eq!(lexicon.dictionary_size(), 3);
    assert_eq!(stored_version(&*store).await.as_deref(), Some("0.9.0"));

    lexicon.get_entry("bet").await;
    tokio::time::sleep(Duration::from_secs(6)).await;

    assert_eq!(stored_version(&*store).await.as_deref(), Some("1.0.0"));
}

#[tokio::test]
async fn test_corrupt_snapshot_falls_back_to_dataset() {
    let store = Arc::new(MemoryStore::new());
    store
        .set(CACHE_KEY, "{\"version\": \"1.0.0\", \"words\": [".to_string())
        .await
        .unwrap();
    store.set(HISTORY_KEY, "not json".to_string()).await.unwrap();

    let lexicon = lexicon_over(store).await;

    assert_eq!(lexicon.dictionary_size(), 3);
    assert!(lexicon.history().is_empty());
    assert!(lexicon.record_search("bet").await);
}

#[tokio::test(start_paused = true)]
async fn test_each_lookup_schedules_its_own_write() {
    let store = Arc::new(CountingStore::default());
    let lexicon = lexicon_over(store.clone()).await;

    // Lookups at t=0, t=2 and t=4 fire writes at t=5, t=7 and t=9
    lexicon.get_entry("bet").await;
    tokio::time::sleep(Duration::from_secs(2)).await;
    lexicon.get_entry("beta").await;
    tokio::time::sleep(Duration::from_secs(2)).await;
    lexicon.get_entry("cab").await;
    assert_eq!(store.writes(), 0);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(store.writes(), 1);

    // The first write already carries every access made before it fired
    let blob = store.get(CACHE_KEY).await.unwrap().unwrap();
    let Decoded::Valid(snapshot) = schema::decode_snapshot(Some(&blob), "1.0.0") else {
        panic!("expected a valid snapshot");
    };
    assert_eq!(snapshot.last_accessed().len(), 3);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(store.writes(), 2);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(store.writes(), 3);
    assert!(!lexicon.dictionary().has_pending_write());
}

#[tokio::test(start_paused = true)]
async fn test_flush_cancels_every_scheduled_write() {
    let store = Arc::new(CountingStore::default());
    let lexicon = lexicon_over(store.clone()).await;

    lexicon.get_entry("bet").await;
    tokio::time::sleep(Duration::from_secs(1)).await;
    lexicon.get_entry("cab").await;

    lexicon.shutdown().await.unwrap();
    let after_flush = store.writes();

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(store.writes(), after_flush);
}

#[tokio::test(start_paused = true)]
async fn test_access_state_survives_restart() {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(FixedClock::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap()));
    let build = || {
        Lexicon::builder()
            .with_memory_storage()
            .with_dataset(dataset())
            .with_store(store.clone())
            .with_clock(clock.clone())
            .build()
    };

    let first = build().await.unwrap();
    first.get_entry("cab").await;
    clock.advance(ChronoDuration::seconds(1));
    first.get_entry("BETA").await;
    first.shutdown().await.unwrap();
    assert!(!first.dictionary().has_pending_write());

    let second = build().await.unwrap();
    assert_eq!(second.popular_words(2), vec!["beta", "cab"]);
}

#[tokio::test]
async fn test_history_round_trips_through_store() {
    let store = Arc::new(MemoryStore::new());

    let first = lexicon_over(store.clone()).await;
    for term in ["bet", "bet", "cab", "beta", "bet"] {
        assert!(first.record_search(term).await);
    }
    let recorded = first.history();

    let second = lexicon_over(store).await;
    assert_eq!(second.history(), recorded);
    assert_eq!(second.popular_searches(3), vec!["bet", "beta", "cab"]);
}

#[tokio::test]
async fn test_write_failures_keep_memory_state() {
    // Every blob is larger than the quota, so all writes fail
    let store = Arc::new(MemoryStore::with_quota(8));
    let lexicon = lexicon_over(store.clone()).await;

    assert!(lexicon.record_search("bet").await);
    assert!(lexicon.record_search("bet").await);
    assert_eq!(lexicon.popular_searches(1), vec!["bet"]);
    assert_eq!(lexicon.history().searches[0].count, 2);
    assert!(store.get(HISTORY_KEY).await.unwrap().is_none());

    lexicon.get_entry("cab").await;
    let err = lexicon.flush().await.unwrap_err();
    assert!(matches!(err, LexiconError::Storage(_)));
    assert_eq!(lexicon.popular_words(1), vec!["cab"]);
}

#[tokio::test]
async fn test_clear_search_history_removes_blob() {
    let store = Arc::new(MemoryStore::new());
    let lexicon = lexicon_over(store.clone()).await;
    lexicon.record_search("bet").await;
    assert!(store.get(HISTORY_KEY).await.unwrap().is_some());

    lexicon.clear_search_history().await;
    assert!(store.get(HISTORY_KEY).await.unwrap().is_none());

    let reloaded = lexicon_over(store).await;
    assert!(reloaded.history().is_empty());
}

#[tokio::test]
async fn test_clear_cache_forgets_access_state() {
    let store = Arc::new(MemoryStore::new());
    let lexicon = lexicon_over(store.clone()).await;
    lexicon.get_entry("bet").await;
    lexicon.flush().await.unwrap();

    lexicon.clear_cache().await;
    assert!(store.get(CACHE_KEY).await.unwrap().is_none());
    assert_eq!(lexicon.dictionary_size(), 0);

    lexicon.initialize().await;
    assert_eq!(lexicon.dictionary_size(), 3);
    assert!(lexicon.popular_words(1).is_empty());
}

#[tokio::test]
async fn test_recent_window_with_fixed_clock() {
    let start = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let clock = Arc::new(FixedClock::new(start));
    let lexicon = Lexicon::builder()
        .with_memory_storage()
        .with_dataset(dataset())
        .with_clock(clock.clone())
        .build()
        .await
        .unwrap();

    lexicon.record_search("cab").await;
    clock.advance(ChronoDuration::days(3));
    lexicon.record_search("bet").await;
    clock.advance(ChronoDuration::days(3));
    lexicon.record_search("beta").await;
    assert_eq!(lexicon.recent_searches(5), vec!["beta", "bet", "cab"]);

    clock.advance(ChronoDuration::days(2));
    assert_eq!(lexicon.recent_searches(5), vec!["beta", "bet"]);

    clock.advance(ChronoDuration::days(30));
    assert!(lexicon.recent_searches(5).is_empty());
    // Old searches still count towards popularity
    assert_eq!(lexicon.popular_searches(5).len(), 3);
}

#[tokio::test]
async fn test_file_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let build = || {
        Lexicon::builder()
            .with_dataset(dataset())
            .with_data_dir(dir.path())
            .build()
    };

    let first = build().await.unwrap();
    first.record_search("beta").await;
    first.get_entry("cab").await;
    first.shutdown().await.unwrap();

    assert!(dir.path().join(format!("{CACHE_KEY}.json")).exists());
    assert!(dir.path().join(format!("{HISTORY_KEY}.json")).exists());

    let second = build().await.unwrap();
    assert_eq!(second.popular_searches(5), vec!["beta"]);
    assert_eq!(second.popular_words(5), vec!["cab"]);
}
