//! Lexicon settings
//!
//! [`LexiconConfig`] groups the dataset location, storage keys, cache and history
//! limits, and logging. It is assembled with [`ConfigBuilder`] or layered from
//! `lexicon.*` files and `LEXICON_` variables by [`ConfigLoader`], then checked
//! before a [`Lexicon`](crate::Lexicon) is built from it.

mod builder;
mod loader;
mod models;
mod validation;

pub use builder::ConfigBuilder;
pub use loader::ConfigLoader;
pub use models::*;

/// Files searched, in order, when no explicit config path is given
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "lexicon.toml",
    "lexicon.yaml",
    "lexicon.yml",
    "lexicon.json",
    ".lexicon/config.toml",
    ".lexicon/config.yaml",
    ".lexicon/config.yml",
    ".lexicon/config.json",
];

/// Prefix for overrides such as `LEXICON_CACHE__PERSIST_DELAY_MS`
pub const ENV_PREFIX: &str = "LEXICON_";

/// Why a configuration could not be produced
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A named config file is missing or unreadable
    #[error("Failed to load configuration file: {0}")]
    FileLoadError(String),

    /// Values parsed but are out of range
    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    /// Sources could not be merged into a [`LexiconConfig`]
    #[error("Configuration parsing error: {0}")]
    ParseError(String),
}

/// Result of loading or validating configuration
pub type Result<T> = std::result::Result<T, ConfigError>;
