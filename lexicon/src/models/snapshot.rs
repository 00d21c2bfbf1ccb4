//! In-memory dictionary cache snapshot

use super::entry::{WordEntry, normalize_key};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};

/// The versioned in-memory copy of the dictionary plus access metadata.
///
/// Entries keep their dataset order, which is what search ranking relies on
/// for tie-breaks. A lowercase key index is built once so lookups are O(1).
#[derive(Debug, Clone)]
pub struct CacheSnapshot {
    version: String,
    entries: Vec<WordEntry>,
    index: HashMap<String, usize>,
    last_accessed: BTreeMap<String, DateTime<Utc>>,
    popular_words: Vec<String>,
    initialized: bool,
}

impl CacheSnapshot {
    /// Build a fresh snapshot with empty access state.
    pub fn build(version: impl Into<String>, entries: Vec<WordEntry>) -> Self {
        Self::restore(version, entries, BTreeMap::new(), Vec::new())
    }

    /// Rebuild a snapshot from previously persisted parts.
    pub fn restore(
        version: impl Into<String>,
        entries: Vec<WordEntry>,
        last_accessed: BTreeMap<String, DateTime<Utc>>,
        popular_words: Vec<String>,
    ) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.key(), position))
            .collect();

        Self {
            version: version.into(),
            entries,
            index,
            last_accessed,
            popular_words,
            initialized: true,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Entries in dataset order
    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Case-insensitive lookup without side effects
    pub fn lookup(&self, word: &str) -> Option<&WordEntry> {
        self.index
            .get(&normalize_key(word))
            .and_then(|position| self.entries.get(*position))
    }

    /// Canonical spelling for a case-insensitive match
    pub fn canonical_key(&self, word: &str) -> Option<&str> {
        self.lookup(word).map(|entry| entry.word.as_str())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(&normalize_key(word))
    }

    /// Look up `word` and record the access time under its canonical key.
    pub fn touch(&mut self, word: &str, now: DateTime<Utc>) -> Option<WordEntry> {
        let entry = self.lookup(word)?.clone();
        self.last_accessed.insert(entry.word.clone(), now);
        Some(entry)
    }

    pub fn last_accessed(&self) -> &BTreeMap<String, DateTime<Utc>> {
        &self.last_accessed
    }

    /// The cached popular-words list as it currently stands
    pub fn cached_popular_words(&self) -> &[String] {
        &self.popular_words
    }

    /// Most recently accessed words, served from the cached list when it is long enough.
    ///
    /// The cached list is only recomputed when a caller asks for more words than it
    /// holds, so repeated calls with the same or a smaller limit can return a list that
    /// lags behind newer accesses. Ranking is by last access time, not access count.
    pub fn popular_words(&mut self, limit: usize) -> Vec<String> {
        if self.popular_words.len() >= limit {
            return self.popular_words[..limit].to_vec();
        }

        let mut accessed: Vec<(&String, &DateTime<Utc>)> = self.last_accessed.iter().collect();
        // Stable sort keeps equal timestamps in key order
        accessed.sort_by(|a, b| b.1.cmp(a.1));

        self.popular_words = accessed
            .into_iter()
            .take(limit)
            .map(|(word, _)| word.clone())
            .collect();

        self.popular_words.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn snapshot() -> CacheSnapshot {
        CacheSnapshot::build(
            "1.0.0",
            vec![
                WordEntry::new("Bet"),
                WordEntry::new("beta"),
                WordEntry::new("cab"),
            ],
        )
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let snapshot = snapshot();
        assert_eq!(snapshot.lookup("BET").unwrap().word, "Bet");
        assert_eq!(snapshot.canonical_key("bEtA"), Some("beta"));
        assert!(snapshot.contains("CAB"));
        assert!(snapshot.lookup("zzz").is_none());
    }

    #[test]
    fn test_touch_records_canonical_key() {
        let mut snapshot = snapshot();
        assert!(snapshot.touch("bet", at(1)).is_some());
        assert!(snapshot.touch("missing", at(2)).is_none());

        assert_eq!(snapshot.last_accessed().get("Bet"), Some(&at(1)));
        assert_eq!(snapshot.last_accessed().len(), 1);
    }

    #[test]
    fn test_popular_words_is_recency_ranked() {
        let mut snapshot = snapshot();
        snapshot.touch("cab", at(1));
        snapshot.touch("bet", at(3));
        snapshot.touch("beta", at(2));

        assert_eq!(snapshot.popular_words(3), vec!["Bet", "beta", "cab"]);
    }

    #[test]
    fn test_popular_words_cache_is_stale_until_larger_limit() {
        let mut snapshot = snapshot();
        snapshot.touch("cab", at(1));
        snapshot.touch("bet", at(2));
        assert_eq!(snapshot.popular_words(1), vec!["Bet"]);

        snapshot.touch("beta", at(3));
        // Same limit: cached list is returned unchanged
        assert_eq!(snapshot.popular_words(1), vec!["Bet"]);

        // Larger limit forces a recompute
        assert_eq!(snapshot.popular_words(2), vec!["beta", "Bet"]);
        assert_eq!(snapshot.cached_popular_words(), &["beta", "Bet"]);
    }

    #[test]
    fn test_equal_timestamps_order_by_key() {
        let mut snapshot = snapshot();
        snapshot.touch("cab", at(1));
        snapshot.touch("beta", at(1));

        assert_eq!(snapshot.popular_words(2), vec!["beta", "cab"]);
    }
}
