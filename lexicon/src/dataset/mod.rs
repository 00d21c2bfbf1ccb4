//! Dictionary dataset loading
//!
//! The dataset is the immutable input the cache is built from. It arrives as a JSON
//! document with an ordered list of word summaries and a keyed map of details:
//!
//! ```json
//! {
//!   "words": [
//!     { "word": "bet", "pronunciation": "/bɛt/", "partOfSpeech": "verb",
//!       "definition": "Risk money on an outcome", "example": "I bet you will." }
//!   ],
//!   "details": {
//!     "bet": { "etymology": "Possibly from abet" }
//!   }
//! }
//! ```
//!
//! Summaries define the entry order. Details supply the etymology and override any
//! summary field they set to a non-empty value. Only structural shape is checked:
//! at least one entry, no blank words, and no case-insensitive duplicates.

use crate::models::{WordEntry, normalize_key};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Errors raised while loading a dataset. These are fatal for initialization.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// No dataset source was configured
    #[error("No dataset configured. Set `dataset.path` or provide a Dataset to the builder")]
    NotConfigured,

    /// The dataset file could not be read
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset is not valid JSON of the expected shape
    #[error("Failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    /// The dataset contains no entries
    #[error("Dataset contains no entries")]
    Empty,

    /// An entry has a blank word
    #[error("Dataset entry at position {position} has a blank word")]
    BlankWord { position: usize },

    /// Two entries share a key case-insensitively
    #[error("Dataset contains duplicate word '{word}'")]
    DuplicateWord { word: String },
}

/// Result type for dataset operations
pub type Result<T> = std::result::Result<T, DatasetError>;

#[derive(Debug, Deserialize)]
struct RawDataset {
    words: Vec<WordSummary>,
    #[serde(default)]
    details: HashMap<String, WordDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WordSummary {
    word: String,
    #[serde(default)]
    pronunciation: String,
    #[serde(default)]
    part_of_speech: String,
    #[serde(default)]
    definition: String,
    #[serde(default)]
    example: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct WordDetails {
    pronunciation: String,
    part_of_speech: String,
    definition: String,
    example: String,
    etymology: String,
}

/// An immutable, structurally validated set of dictionary entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    entries: Vec<WordEntry>,
}

impl Dataset {
    /// Create a dataset from entries, validating its shape.
    pub fn new(entries: Vec<WordEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut seen = HashSet::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            let key = normalize_key(&entry.word);
            if key.is_empty() {
                return Err(DatasetError::BlankWord { position });
            }
            if !seen.insert(key) {
                return Err(DatasetError::DuplicateWord {
                    word: entry.word.clone(),
                });
            }
        }

        Ok(Self { entries })
    }

    /// Parse a dataset from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawDataset = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Parse a dataset from any reader producing JSON.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: RawDataset = serde_json::from_reader(reader)?;
        Self::from_raw(raw)
    }

    /// Load a dataset from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let dataset = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            entries = dataset.len(),
            "Loaded dictionary dataset"
        );
        Ok(dataset)
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

    fn from_raw(raw: RawDataset) -> Result<Self> {
        let RawDataset { words, mut details } = raw;

        let lowercase_details: HashMap<String, String> = details
            .keys()
            .map(|key| (normalize_key(key), key.clone()))
            .collect();

        let entries = words
            .into_iter()
            .map(|summary| {
                let detail = details.remove(&summary.word).or_else(|| {
                    lowercase_details
                        .get(&normalize_key(&summary.word))
                        .and_then(|key| details.remove(key))
                });
                merge(summary, detail.unwrap_or_default())
            })
            .collect();

        if !details.is_empty() {
            tracing::debug!(
                unmatched = details.len(),
                "Ignoring dataset details with no matching word"
            );
        }

        Self::new(entries)
    }
}

fn merge(summary: WordSummary, details: WordDetails) -> WordEntry {
    fn pick(detail: String, summary: String) -> String {
        if detail.trim().is_empty() {
            summary
        } else {
            detail
        }
    }

    WordEntry {
        word: summary.word,
        pronunciation: pick(details.pronunciation, summary.pronunciation),
        part_of_speech: pick(details.part_of_speech, summary.part_of_speech),
        definition: pick(details.definition, summary.definition),
        example: pick(details.example, summary.example),
        etymology: details.etymology,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "words": [
            { "word": "bet", "partOfSpeech": "verb", "definition": "Risk money" },
            { "word": "Beta", "partOfSpeech": "noun", "definition": "Second letter" },
            { "word": "cab", "definition": "A taxi" }
        ],
        "details": {
            "bet": { "etymology": "Possibly from abet" },
            "beta": { "definition": "The second letter of the Greek alphabet", "etymology": "Greek" },
            "orphan": { "etymology": "unused" }
        }
    }"#;

    #[test]
    fn test_parse_merges_details_in_order() {
        let dataset = Dataset::from_json_str(SAMPLE).unwrap();
        let words: Vec<_> = dataset.entries().iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["bet", "Beta", "cab"]);

        let bet = &dataset.entries()[0];
        assert_eq!(bet.etymology, "Possibly from abet");
        assert_eq!(bet.definition, "Risk money");

        // Detail keys match case-insensitively and override non-empty fields
        let beta = &dataset.entries()[1];
        assert_eq!(beta.definition, "The second letter of the Greek alphabet");
        assert_eq!(beta.part_of_speech, "noun");
        assert_eq!(beta.etymology, "Greek");

        assert_eq!(dataset.entries()[2].etymology, "");
    }

    #[test]
    fn test_details_are_optional() {
        let dataset = Dataset::from_json_str(r#"{"words": [{"word": "solo"}]}"#).unwrap();
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_rejects_empty_dataset() {
        let err = Dataset::from_json_str(r#"{"words": []}"#).unwrap_err();
        assert!(matches!(err, DatasetError::Empty));
    }

    #[test]
    fn test_rejects_blank_word() {
        let err = Dataset::new(vec![WordEntry::new("ok"), WordEntry::new("  ")]).unwrap_err();
        assert!(matches!(err, DatasetError::BlankWord { position: 1 }));
    }

    #[test]
    fn test_rejects_case_insensitive_duplicates() {
        let err = Dataset::new(vec![WordEntry::new("Bet"), WordEntry::new("bet")]).unwrap_err();
        assert!(matches!(err, DatasetError::DuplicateWord { .. }));
    }

    #[test]
    fn test_rejects_wrong_shape() {
        let err = Dataset::from_json_str(r#"{"entries": {}}"#).unwrap_err();
        assert!(matches!(err, DatasetError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Dataset::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dictionary.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let dataset = Dataset::load(&path).unwrap();
        assert_eq!(dataset.len(), 3);
    }
}
