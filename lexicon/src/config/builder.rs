//! Configuration builder.
//!
//! This module provides a builder pattern API for creating configurations.

use super::{Result, models::*, validation};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Builder for creating LexiconConfig instances.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: LexiconConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: LexiconConfig::default(),
        }
    }

    /// Start from an existing configuration.
    pub fn from_config(config: LexiconConfig) -> Self {
        Self { config }
    }

    /// Set the dataset file.
    pub fn with_dataset_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.dataset.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the base data directory.
    pub fn with_data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.storage.data_dir = path.as_ref().to_path_buf();
        self
    }

    /// Select the storage backend.
    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage.backend = backend;
        self
    }

    /// Use in-memory storage (good for testing)
    pub fn with_memory_storage(self) -> Self {
        self.with_storage_backend(StorageBackend::Memory)
    }

    /// Use file storage under the data directory
    pub fn with_file_storage(self) -> Self {
        self.with_storage_backend(StorageBackend::File)
    }

    /// Override the storage keys for the snapshot and the history.
    pub fn with_storage_keys(
        mut self,
        cache_key: impl Into<String>,
        history_key: impl Into<String>,
    ) -> Self {
        self.config.storage.cache_key = cache_key.into();
        self.config.storage.history_key = history_key.into();
        self
    }

    /// Set the cache schema version tag.
    pub fn with_schema_version(mut self, version: impl Into<String>) -> Self {
        self.config.cache.schema_version = version.into();
        self
    }

    /// Set the snapshot write-behind delay.
    pub fn with_persist_delay(mut self, delay: Duration) -> Self {
        self.config.cache.persist_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the maximum number of distinct search terms retained.
    pub fn with_history_limit(mut self, max_entries: usize) -> Self {
        self.config.history.max_entries = max_entries;
        self
    }

    /// Set the recent-searches window in days.
    pub fn with_recent_window_days(mut self, days: u32) -> Self {
        self.config.history.recent_window_days = days;
        self
    }

    /// Set the default search result limit.
    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.config.search.default_limit = limit;
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Configure logging to a file.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.logging.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use default logging configuration (console output at Info level)
    pub fn with_default_logging(mut self) -> Self {
        self.config.logging.level = LogLevel::Info;
        self.config.logging.format = LogFormat::Json;
        self.config.logging.file = None;
        self
    }

    /// Create a configuration for development.
    ///
    /// - In-memory storage, nothing survives the process
    /// - Debug-level logging
    pub fn development() -> Self {
        Self::new()
            .with_memory_storage()
            .with_log_level(LogLevel::Debug)
    }

    /// Create a configuration for testing.
    ///
    /// Same as [`ConfigBuilder::development`] with a test-specific data directory.
    pub fn testing() -> Self {
        Self::development().with_data_dir(PathBuf::from("./test_data"))
    }

    /// Create a production-ready configuration with persistent storage.
    pub fn production() -> Self {
        Self::new().with_file_storage().with_default_logging()
    }

    /// Create a fully default configuration suitable for most uses
    ///
    /// This is equivalent to `production()` with the dataset path taken from
    /// `LEXICON_DATASET` when that variable is set.
    pub fn defaults() -> Self {
        let builder = Self::production();
        match std::env::var("LEXICON_DATASET") {
            Ok(path) if !path.trim().is_empty() => {
                tracing::info!(path = %path, "Using dataset from LEXICON_DATASET");
                builder.with_dataset_path(path)
            }
            _ => builder,
        }
    }

    /// Build the configuration, validating it in the process.
    pub fn build(self) -> Result<LexiconConfig> {
        validation::validate_config(&self.config)?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
