//! Configuration model definitions.
//!
//! This module contains the configuration structures for all Lexicon components.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::models::history::DEFAULT_MAX_ENTRIES;

/// Main configuration structure for Lexicon.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LexiconConfig {
    /// Dataset source
    pub dataset: DatasetConfig,

    /// Storage configuration
    pub storage: StorageConfig,

    /// Dictionary cache configuration
    pub cache: CacheConfig,

    /// Search history configuration
    pub history: HistoryConfig,

    /// Search ranking configuration
    pub search: SearchConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Dataset source configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DatasetConfig {
    /// Path to the dataset JSON file. Not needed when a dataset is passed to the builder.
    pub path: Option<PathBuf>,
}

/// Configuration for storage components.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend used for persisted state
    pub backend: StorageBackend,

    /// Base directory for file storage
    pub data_dir: PathBuf,

    /// Key holding the serialized cache snapshot
    pub cache_key: String,

    /// Key holding the serialized search history
    pub history_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let data_dir = directories::ProjectDirs::from("org", "lexicon", "lexicon")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("./data"));

        Self {
            backend: StorageBackend::File,
            data_dir,
            cache_key: "lexicon.dictionary_cache".to_string(),
            history_key: "lexicon.search_history".to_string(),
        }
    }
}

/// Storage backend type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// In-process storage, lost on exit
    Memory,

    /// One JSON file per key under `data_dir`
    File,
}

/// Dictionary cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Schema version tag. Persisted snapshots with a different tag are discarded.
    pub schema_version: String,

    /// Delay before a scheduled snapshot write fires, in milliseconds
    pub persist_delay_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            schema_version: "1.0.0".to_string(),
            persist_delay_ms: 5_000,
        }
    }
}

/// Search history configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of distinct terms retained
    pub max_entries: usize,

    /// Size of the trailing window for recent searches, in days
    pub recent_window_days: u32,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            recent_window_days: 7,
        }
    }
}

/// Search ranking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Result limit used when callers do not pass one
    pub default_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { default_limit: 10 }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: LogLevel,

    /// Log format
    pub format: LogFormat,

    /// File to log to (if any)
    pub file: Option<PathBuf>,

    /// Whether to log to stdout
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Default,
            file: None,
            stdout: true,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level
    Trace,

    /// Debug level
    Debug,

    /// Info level
    Info,

    /// Warn level
    Warn,

    /// Error level
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Default format
    Default,

    /// JSON format
    Json,

    /// Compact format
    Compact,

    /// Pretty format
    Pretty,
}
