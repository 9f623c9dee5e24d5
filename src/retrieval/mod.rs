//! Retrieval layer
//!
//! This module fetches a page's raw content, falling back across an ordered
//! list of backends:
//! - a plain GET against the target
//! - a first-party relay endpoint
//! - public relay services with their own response envelopes
//!
//! Whatever backend answers, callers receive the same [`PageResponse`].

mod backend;
#[cfg(test)]
pub(crate) mod testing;

pub use backend::{AttemptError, Backend, RawResponse};

use crate::config::{Config, UserAgentConfig};
use crate::url::parse_http_url;
use crate::AuditError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// A retrieved page in uniform shape, whichever backend served it
#[derive(Debug, Clone, Serialize)]
pub struct PageResponse {
    /// HTTP status of the target page
    pub status_code: u16,

    /// Response headers with lowercase names (empty for envelope relays)
    pub headers: HashMap<String, String>,

    /// Page body
    pub body: String,

    /// Name of the backend that produced this response
    pub served_by: String,
}

impl PageResponse {
    /// Looks up a header by (case-insensitive) name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns true for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Anything that can turn a URL into a page response
///
/// The crawler and the session only talk to this trait.
#[async_trait]
pub trait Retrieve: Send + Sync {
    /// Retrieves `url`, or fails with `InvalidUrl` / `RetrievalFailed`
    async fn retrieve(&self, url: &str) -> crate::Result<PageResponse>;
}

/// Retrieval over HTTP with an ordered fallback chain
pub struct Retriever {
    client: Client,
    backends: Vec<Backend>,
    attempt_timeout: Duration,
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use sitelens::config::UserAgentConfig;
/// use sitelens::retrieval::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL; ContactEmail)
    let user_agent = format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("nl,en;q=0.8"));

    Client::builder()
        .user_agent(user_agent)
        .default_headers(headers)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

impl Retriever {
    /// Creates a retriever from an explicit backend chain
    pub fn new(client: Client, backends: Vec<Backend>, attempt_timeout: Duration) -> Self {
        Self {
            client,
            backends,
            attempt_timeout,
        }
    }

    /// Creates a retriever from the configuration
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let client = build_http_client(&config.user_agent)?;
        let backends = Backend::chain_from_config(config)?;
        Ok(Self::new(
            client,
            backends,
            Duration::from_secs(config.retrieval.timeout_secs),
        ))
    }

    /// The backends in the order they are tried
    pub fn backends(&self) -> &[Backend] {
        &self.backends
    }

    /// Makes one attempt through one backend
    async fn attempt(&self, backend: &Backend, target: &Url) -> Result<PageResponse, AttemptError> {
        let request_url = backend.request_url(target);

        let response = self
            .client
            .get(request_url)
            .timeout(self.attempt_timeout)
            .send()
            .await?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;

        backend.normalize(RawResponse {
            status,
            headers,
            body,
        })
    }
}

#[async_trait]
impl Retrieve for Retriever {
    /// Tries every backend once, in order, returning the first usable response
    ///
    /// | Outcome of an attempt | Action |
    /// |-----------------------|--------|
    /// | timeout / network error | next backend |
    /// | backend non-2xx | next backend |
    /// | malformed or error envelope | next backend |
    /// | usable response | return it |
    ///
    /// No backend is retried and there is no backoff.
    async fn retrieve(&self, url: &str) -> crate::Result<PageResponse> {
        let target = parse_http_url(url)?;
        let mut tried = Vec::with_capacity(self.backends.len());

        for backend in &self.backends {
            tried.push(backend.name().to_string());

            match self.attempt(backend, &target).await {
                Ok(page) => {
                    tracing::debug!(
                        "Retrieved {} via {} (HTTP {})",
                        target,
                        backend.name(),
                        page.status_code
                    );
                    return Ok(page);
                }
                Err(e) => {
                    tracing::warn!("Backend {} failed for {}: {}", backend.name(), target, e);
                }
            }
        }

        Err(AuditError::RetrievalFailed {
            url: target.to_string(),
            tried,
        })
    }
}
