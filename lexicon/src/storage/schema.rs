//! Versioned persistence schema for the cache snapshot and search history
//!
//! Stored blobs are never trusted as-is. Decoding yields a [`Decoded`] value that
//! is either a fully validated model, an explicit reason the blob was rejected,
//! or a marker that nothing was stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::dataset::Dataset;
use crate::models::{CacheSnapshot, SearchHistory, SearchRecord, WordEntry, normalize_key};
use crate::storage::errors::StorageError;

/// Format version written into persisted search history blobs
pub const HISTORY_FORMAT_VERSION: u32 = 1;

/// Outcome of decoding a persisted blob.
#[derive(Debug)]
pub enum Decoded<T> {
    /// Nothing was stored under the key
    Missing,

    /// The blob parsed and passed validation
    Valid(T),

    /// The blob was present but unusable
    Invalid(InvalidBlob),
}

/// Reason a persisted blob was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidBlob {
    #[error("malformed blob: {0}")]
    Malformed(String),

    #[error("version mismatch: found '{found}', expected '{expected}'")]
    VersionMismatch { found: String, expected: String },

    #[error("inconsistent contents: {0}")]
    Inconsistent(String),
}

/// Serialized form of a [`CacheSnapshot`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSnapshot {
    pub version: String,
    pub words: Vec<WordEntry>,
    pub last_accessed: BTreeMap<String, DateTime<Utc>>,
    pub popular_words: Vec<String>,
    pub initialized: bool,
}

impl From<&CacheSnapshot> for PersistedSnapshot {
    fn from(snapshot: &CacheSnapshot) -> Self {
        Self {
            version: snapshot.version().to_string(),
            words: snapshot.entries().to_vec(),
            last_accessed: snapshot.last_accessed().clone(),
            popular_words: snapshot.cached_popular_words().to_vec(),
            initialized: snapshot.is_initialized(),
        }
    }
}

/// Serialized form of a [`SearchHistory`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedHistory {
    pub version: u32,
    pub searches: Vec<SearchRecord>,
    pub last_updated: DateTime<Utc>,
}

/// Serialize a snapshot for storage.
pub fn encode_snapshot(snapshot: &CacheSnapshot) -> Result<String, StorageError> {
    Ok(serde_json::to_string(&PersistedSnapshot::from(snapshot))?)
}

/// Serialize a search history for storage.
pub fn encode_history(history: &SearchHistory) -> Result<String, StorageError> {
    let persisted = PersistedHistory {
        version: HISTORY_FORMAT_VERSION,
        searches: history.searches.clone(),
        last_updated: history.last_updated,
    };
    Ok(serde_json::to_string(&persisted)?)
}

/// Decode and validate a persisted snapshot against the expected schema version.
///
/// The version tag is checked before the rest of the shape so that blobs written by
/// an older schema report a version mismatch rather than a parse failure.
pub fn decode_snapshot(blob: Option<&str>, expected_version: &str) -> Decoded<CacheSnapshot> {
    let Some(blob) = blob else {
        return Decoded::Missing;
    };

    let value: serde_json::Value = match serde_json::from_str(blob) {
        Ok(value) => value,
        Err(e) => return Decoded::Invalid(InvalidBlob::Malformed(e.to_string())),
    };

    match value.get("version").and_then(|v| v.as_str()) {
        Some(found) if found == expected_version => {}
        Some(found) => {
            return Decoded::Invalid(InvalidBlob::VersionMismatch {
                found: found.to_string(),
                expected: expected_version.to_string(),
            });
        }
        None => {
            return Decoded::Invalid(InvalidBlob::Malformed(
                "missing version tag".to_string(),
            ));
        }
    }

    let persisted: PersistedSnapshot = match serde_json::from_value(value) {
        Ok(persisted) => persisted,
        Err(e) => return Decoded::Invalid(InvalidBlob::Malformed(e.to_string())),
    };

    match validate_snapshot(persisted) {
        Ok(snapshot) => Decoded::Valid(snapshot),
        Err(reason) => Decoded::Invalid(reason),
    }
}

fn validate_snapshot(persisted: PersistedSnapshot) -> Result<CacheSnapshot, InvalidBlob> {
    if !persisted.initialized {
        return Err(InvalidBlob::Inconsistent(
            "snapshot was not initialized".to_string(),
        ));
    }

    let dataset =
        Dataset::new(persisted.words).map_err(|e| InvalidBlob::Inconsistent(e.to_string()))?;
    let words: HashSet<&str> = dataset
        .entries()
        .iter()
        .map(|entry| entry.word.as_str())
        .collect();

    if let Some(unknown) = persisted
        .last_accessed
        .keys()
        .chain(persisted.popular_words.iter())
        .find(|word| !words.contains(word.as_str()))
    {
        return Err(InvalidBlob::Inconsistent(format!(
            "access data references unknown word '{}'",
            unknown
        )));
    }

    Ok(CacheSnapshot::restore(
        persisted.version,
        dataset.entries().to_vec(),
        persisted.last_accessed,
        persisted.popular_words,
    ))
}

/// Decode and validate a persisted search history.
pub fn decode_history(blob: Option<&str>, max_entries: usize) -> Decoded<SearchHistory> {
    let Some(blob) = blob else {
        return Decoded::Missing;
    };

    let persisted: PersistedHistory = match serde_json::from_str(blob) {
        Ok(persisted) => persisted,
        Err(e) => return Decoded::Invalid(InvalidBlob::Malformed(e.to_string())),
    };

    if persisted.version != HISTORY_FORMAT_VERSION {
        return Decoded::Invalid(InvalidBlob::VersionMismatch {
            found: persisted.version.to_string(),
            expected: HISTORY_FORMAT_VERSION.to_string(),
        });
    }

    let mut seen = HashSet::with_capacity(persisted.searches.len());
    for record in &persisted.searches {
        if record.term.is_empty() || normalize_key(&record.term) != record.term {
            return Decoded::Invalid(InvalidBlob::Inconsistent(format!(
                "term '{}' is not normalized",
                record.term
            )));
        }
        if record.count == 0 {
            return Decoded::Invalid(InvalidBlob::Inconsistent(format!(
                "term '{}' has a zero count",
                record.term
            )));
        }
        if !seen.insert(record.term.as_str()) {
            return Decoded::Invalid(InvalidBlob::Inconsistent(format!(
                "term '{}' appears more than once",
                record.term
            )));
        }
    }

    Decoded::Valid(SearchHistory::from_records(
        persisted.searches,
        persisted.last_updated,
        max_entries,
    ))
}
