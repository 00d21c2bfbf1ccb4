//! Structured logging infrastructure for Lexicon.
//!
//! This module provides a configurable logging system based on the tracing crate,
//! supporting different output formats, log levels, and optional file output.


use crate::config::{LogFormat, LogLevel, LoggingConfig};
use std::path::Path;
use std::sync::OnceLock;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};

/// Keeps the non-blocking file writer alive for the life of the process
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Error type for logging operations
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing log level
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    /// Error in subscriber setup
    #[error("Subscriber error: {0}")]
    SubscriberError(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type for logging operations
pub type Result<T> = std::result::Result<T, LogError>;

/// Install a global subscriber for the given builder, routing output per config.
macro_rules! install {
    ($builder:expr, $config:expr) => {{
        let builder = $builder;
        match (&$config.file, $config.stdout) {
            (Some(file_path), false) => {
                let writer = create_non_blocking_file(file_path)?;
                builder.with_writer(writer).try_init()?;
            }
            (Some(_), true) => {
                builder.with_writer(std::io::stdout).try_init()?;
                tracing::warn!("Configured for stdout only; file logging ignored");
            }
            (None, true) => builder.try_init()?,
            (None, false) => {}
        }
    }};
}

/// Initialize the logging system with the given configuration.
///
/// Calling this when a global subscriber is already installed is not an error.
pub fn init(config: &LoggingConfig) -> Result<()> {
    match install_subscriber(config) {
        Err(LogError::SubscriberError(e)) if is_already_installed(e.as_ref()) => Ok(()),
        result => result,
    }
}

fn install_subscriber(config: &LoggingConfig) -> Result<()> {
    let base = tracing_subscriber::fmt()
        .with_max_level(log_level_to_level(&config.level))
        .with_level(true)
        .with_target(true)
        .with_line_number(true);

    match config.format {
        LogFormat::Json => install!(base.json(), config),
        LogFormat::Compact => install!(base.compact(), config),
        LogFormat::Pretty => install!(base.pretty(), config),
        LogFormat::Default => install!(base, config),
    }

    Ok(())
}

fn is_already_installed(error: &(dyn std::error::Error + Send + Sync)) -> bool {
    let message = error.to_string();
    message.contains("already been set") || message.contains("already initialized")
}

/// Create a non-blocking file writer.
fn create_non_blocking_file(path: impl AsRef<Path>) -> Result<NonBlocking> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file_appender = tracing_appender::rolling::never(
        path.parent().unwrap_or_else(|| Path::new(".")),
        path.file_name().unwrap_or_default(),
    );

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    // Only the first installed subscriber can succeed, so one guard is enough
    let _ = FILE_GUARD.set(guard);

    Ok(non_blocking)
}

/// Parse a log level string into a LogLevel enum.
pub fn parse_log_level(level: &str) -> Result<LogLevel> {
    level.parse().map_err(|_| LogError::InvalidLogLevel(level.to_string()))
}

/// Convert a LogLevel into a tracing::Level.
pub fn log_level_to_level(level: &LogLevel) -> Level {
    match level {
        LogLevel::Trace => Level::TRACE,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warn => Level::WARN,
        LogLevel::Error => Level::ERROR,
    }
}

/// Convert a tracing::Level to a LogLevel enum.
pub fn level_to_log_level(level: Level) -> LogLevel {
    match level {
        Level::TRACE => LogLevel::Trace,
        Level::DEBUG => LogLevel::Debug,
        Level::INFO => LogLevel::Info,
        Level::WARN => LogLevel::Warn,
        Level::ERROR => LogLevel::Error,
    }
}
