//! Marquee: a chart-to-spreadsheet movie extractor
//!
//! This crate drives a headless browser through a ranked movie chart,
//! persists one JSON record per title, and consolidates all records into a
//! single CSV table. Per-field lookup failures degrade to empty cells,
//! per-page timeouts discard single items, and the run always finishes with
//! a consolidation pass and a terminal summary.

pub mod config;
pub mod driver;
pub mod output;
pub mod paths;
pub mod record;
pub mod scraper;
pub mod storage;

use thiserror::Error;

/// Main error type for marquee operations
#[derive(Debug, Error)]
pub enum MarqueeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Browser driver error: {0}")]
    Driver(#[from] driver::DriverError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for marquee operations
pub type Result<T> = std::result::Result<T, MarqueeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use record::MovieRecord;
pub use scraper::CrawlSequencer;
