//! Search history models
//!
//! A [`SearchHistory`] is a bounded list of [`SearchRecord`]s kept in descending
//! count order. Records with equal counts are ordered by most recent use, then by
//! term, so the stored order never depends on insertion order.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Default maximum number of distinct terms retained
pub const DEFAULT_MAX_ENTRIES: usize = 50;

/// One distinct search term and its usage metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    /// Normalized (trimmed, lower-cased) term
    pub term: String,

    /// Time of the most recent occurrence
    pub timestamp: DateTime<Utc>,

    /// Number of times the term was recorded
    pub count: u32,
}

impl SearchRecord {
    pub fn new(term: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            term: term.into(),
            timestamp,
            count: 1,
        }
    }

    /// Ranking order used for the stored sequence
    fn rank(&self, other: &Self) -> Ordering {
        other
            .count
            .cmp(&self.count)
            .then_with(|| other.timestamp.cmp(&self.timestamp))
            .then_with(|| self.term.cmp(&other.term))
    }
}

/// Frequency-ordered history of valid searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistory {
    /// Records, highest count first
    pub searches: Vec<SearchRecord>,

    /// Time of the last mutation
    pub last_updated: DateTime<Utc>,
}

impl SearchHistory {
    /// Create an empty history
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            searches: Vec::new(),
            last_updated: now,
        }
    }

    /// Create a history from existing records, restoring ordering and the cap.
    pub fn from_records(
        searches: Vec<SearchRecord>,
        last_updated: DateTime<Utc>,
        max_entries: usize,
    ) -> Self {
        let mut history = Self {
            searches,
            last_updated,
        };
        history.sort_and_truncate(max_entries);
        history
    }

    pub fn len(&self) -> usize {
        self.searches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.searches.is_empty()
    }

    /// Find the record for an already-normalized term
    pub fn get(&self, term: &str) -> Option<&SearchRecord> {
        self.searches.iter().find(|record| record.term == term)
    }

    /// Record one occurrence of an already-normalized, already-validated term.
    pub fn record(&mut self, term: &str, now: DateTime<Utc>, max_entries: usize) {
        match self.searches.iter_mut().find(|record| record.term == term) {
            Some(record) => {
                record.timestamp = now;
                record.count = record.count.saturating_add(1);
            }
            None => self.searches.push(SearchRecord::new(term, now)),
        }

        self.last_updated = now;
        self.sort_and_truncate(max_entries);
    }

    /// Drop every record
    pub fn clear(&mut self, now: DateTime<Utc>) {
        self.searches.clear();
        self.last_updated = now;
    }

    /// First `limit` terms in stored order that still pass `is_valid`.
    pub fn popular<F>(&self, limit: usize, is_valid: F) -> Vec<String>
    where
        F: Fn(&str) -> bool,
    {
        self.searches
            .iter()
            .filter(|record| is_valid(&record.term))
            .take(limit)
            .map(|record| record.term.clone())
            .collect()
    }

    /// Terms used within `window` of `now`, newest first.
    ///
    /// A window reaching back past the earliest representable time includes every record.
    pub fn recent(&self, limit: usize, now: DateTime<Utc>, window: Duration) -> Vec<String> {
        let cutoff = now.checked_sub_signed(window);
        let mut recent: Vec<&SearchRecord> = self
            .searches
            .iter()
            .filter(|record| cutoff.is_none_or(|cutoff| record.timestamp >= cutoff))
            .collect();

        recent.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| a.term.cmp(&b.term))
        });

        recent
            .into_iter()
            .take(limit)
            .map(|record| record.term.clone())
            .collect()
    }

    fn sort_and_truncate(&mut self, max_entries: usize) {
        self.searches.sort_by(SearchRecord::rank);
        self.searches.truncate(max_entries);
    }
}
