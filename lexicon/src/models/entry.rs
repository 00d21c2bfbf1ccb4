//! Dictionary entry model

use serde::{Deserialize, Serialize};

/// A single dictionary entry.
///
/// `word` is the canonical key. Lookups against it are case-insensitive, but the
/// original casing from the dataset is preserved here and reported back to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    /// Canonical spelling of the word
    pub word: String,

    /// Pronunciation guide
    #[serde(default)]
    pub pronunciation: String,

    /// Part of speech (noun, verb, ...)
    #[serde(default)]
    pub part_of_speech: String,

    /// Definition text
    #[serde(default)]
    pub definition: String,

    /// Example usage
    #[serde(default)]
    pub example: String,

    /// Word origin
    #[serde(default)]
    pub etymology: String,
}

impl WordEntry {
    /// Create an entry with only the word set
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            pronunciation: String::new(),
            part_of_speech: String::new(),
            definition: String::new(),
            example: String::new(),
            etymology: String::new(),
        }
    }

    /// Start building an entry for `word`
    pub fn builder(word: impl Into<String>) -> WordEntryBuilder {
        WordEntryBuilder {
            entry: Self::new(word),
        }
    }

    /// Lower-cased lookup key for this entry
    pub fn key(&self) -> String {
        normalize_key(&self.word)
    }
}

/// Normalize a word or search term for case-insensitive comparison.
pub fn normalize_key(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Builder for [`WordEntry`]
#[derive(Debug, Clone)]
pub struct WordEntryBuilder {
    entry: WordEntry,
}

impl WordEntryBuilder {
    pub fn pronunciation(mut self, pronunciation: impl Into<String>) -> Self {
        self.entry.pronunciation = pronunciation.into();
        self
    }

    pub fn part_of_speech(mut self, part_of_speech: impl Into<String>) -> Self {
        self.entry.part_of_speech = part_of_speech.into();
        self
    }

    pub fn definition(mut self, definition: impl Into<String>) -> Self {
        self.entry.definition = definition.into();
        self
    }

    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.entry.example = example.into();
        self
    }

    pub fn etymology(mut self, etymology: impl Into<String>) -> Self {
        self.entry.etymology = etymology.into();
        self
    }

    pub fn build(self) -> WordEntry {
        self.entry
    }
}
