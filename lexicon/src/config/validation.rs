//! Configuration validation utilities.
//!
//! This module provides validation functions for configuration values.

use super::ConfigError;
use super::models::*;

/// Upper bound for `history.recent_window_days`, roughly a century
pub const MAX_RECENT_WINDOW_DAYS: u32 = 36_500;

/// Validate the entire configuration.
pub fn validate_config(config: &LexiconConfig) -> Result<(), ConfigError> {
    validate_storage_config(&config.storage)?;
    validate_cache_config(&config.cache)?;
    validate_history_config(&config.history)?;

    if config.search.default_limit == 0 {
        return Err(ConfigError::ValidationError(
            "Default search limit must be greater than 0".to_string(),
        ));
    }

    if let Some(path) = &config.dataset.path
        && path.as_os_str().is_empty()
    {
        return Err(ConfigError::ValidationError(
            "Dataset path cannot be empty when set".to_string(),
        ));
    }

    Ok(())
}

/// Validate storage configuration.
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.backend == StorageBackend::File && config.data_dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Data directory cannot be empty for file storage".to_string(),
        ));
    }

    if config.cache_key.trim().is_empty() || config.history_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Storage keys cannot be empty".to_string(),
        ));
    }

    if config.cache_key == config.history_key {
        return Err(ConfigError::ValidationError(format!(
            "Cache and history must use different storage keys (both are '{}')",
            config.cache_key
        )));
    }

    Ok(())
}

/// Validate cache configuration.
fn validate_cache_config(config: &CacheConfig) -> Result<(), ConfigError> {
    if config.schema_version.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Cache schema version cannot be empty".to_string(),
        ));
    }

    if config.persist_delay_ms == 0 {
        return Err(ConfigError::ValidationError(
            "persist_delay_ms must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate history configuration.
fn validate_history_config(config: &HistoryConfig) -> Result<(), ConfigError> {
    if config.max_entries == 0 {
        return Err(ConfigError::ValidationError(
            "History max_entries must be greater than 0".to_string(),
        ));
    }

    if config.recent_window_days == 0 {
        return Err(ConfigError::ValidationError(
            "History recent_window_days must be greater than 0".to_string(),
        ));
    }

    if config.recent_window_days > MAX_RECENT_WINDOW_DAYS {
        return Err(ConfigError::ValidationError(format!(
            "History recent_window_days must be at most {MAX_RECENT_WINDOW_DAYS}"
        )));
    }

    Ok(())
}
