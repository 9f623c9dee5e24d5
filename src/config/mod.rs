//! Configuration module for Sitelens
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use sitelens::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sitelens.toml")).unwrap();
//! println!("Per-attempt timeout: {}s", config.retrieval.timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CacheConfig, Config, CrawlerConfig, RelayEntry, RelayKind, RetrievalConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
