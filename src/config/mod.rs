//! Configuration module for marquee
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every key has a built-in default, so a run can start with no
//! config file at all.
//!
//! # Example
//!
//! ```no_run
//! use marquee::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("marquee.toml")).unwrap();
//! println!("Chart URL: {}", config.scrape.index_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{BrowserSettings, Config, OutputConfig, ScrapeConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
