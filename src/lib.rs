//! Sitelens: a sitewide crawl-and-score SEO engine
//!
//! This crate retrieves pages through a chain of fallback backends, extracts
//! on-page SEO facts, scores them, discovers same-site pages breadth-first and
//! folds per-page issues into sitewide statistics and recommendations.

pub mod cache;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod retrieval;
pub mod score;
pub mod session;
pub mod sitewide;
pub mod url;

use thiserror::Error;

/// Main error type for Sitelens operations
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Retrieval failed for {url} (tried: {})", tried.join(", "))]
    RetrievalFailed { url: String, tried: Vec<String> },

    #[error("A sitewide run is already in progress")]
    BusyRunRejected,

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AuditError {
    /// Builds an `InvalidUrl` error from anything displayable
    pub fn invalid_url(url: &str, reason: impl ToString) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
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

/// Result type alias for Sitelens operations
pub type Result<T> = std::result::Result<T, AuditError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use extract::{extract, extract_response, PageFacts};
pub use retrieval::{PageResponse, Retrieve, Retriever};
pub use score::score;
pub use session::{AuditSession, PageReport};
pub use sitewide::{Issue, IssueKind, PageOutcome, SitewideResult};
pub use crate::url::canonicalize_url;
