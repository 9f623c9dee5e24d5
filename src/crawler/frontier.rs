//! Breadth-first page discovery
//!
//! Starting from a seed URL, pages are retrieved in FIFO order and their
//! same-site anchors are canonicalized and enqueued until the page cap is
//! reached or the frontier runs dry.

use crate::crawler::links::extract_links;
use crate::retrieval::Retrieve;
use crate::url::{canonicalize_url, extract_domain, is_internal_host, parse_http_url};
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use url::Url;

/// Frontier state owned by a single discovery run
#[derive(Debug, Default)]
pub struct CrawlState {
    visited: HashSet<String>,
    queue: VecDeque<String>,
    discovered: Vec<String>,
    seen: HashSet<String>,
}

impl CrawlState {
    /// Creates a state seeded with one canonical URL
    pub fn new(seed: &Url) -> Self {
        let mut state = Self::default();
        state.enqueue(seed.as_str());
        state
    }

    /// Records a newly discovered URL; returns false if it was already known
    pub fn enqueue(&mut self, url: &str) -> bool {
        if !self.seen.insert(url.to_string()) {
            return false;
        }
        self.discovered.push(url.to_string());
        self.queue.push_back(url.to_string());
        true
    }

    /// Pops the next URL that has not been visited yet and marks it visited
    pub fn next_unvisited(&mut self) -> Option<String> {
        while let Some(url) = self.queue.pop_front() {
            if self.visited.insert(url.clone()) {
                return Some(url);
            }
        }
        None
    }

    pub fn discovered_count(&self) -> usize {
        self.discovered.len()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Consumes the state, returning URLs in discovery order
    pub fn into_discovered(self) -> Vec<String> {
        self.discovered
    }
}

/// Discovers up to `max_pages` same-site URLs starting at `base_url`
///
/// The seed is always the first URL returned. Retrieval failures on
/// individual pages are logged and skipped. The optional `stop` flag is
/// checked before every dequeue; once set, the URLs discovered so far are
/// returned.
///
/// # Errors
///
/// Returns `AuditError::InvalidUrl` if `base_url` is not an http(s) URL with
/// a host.
pub async fn discover(
    retriever: &dyn Retrieve,
    base_url: &str,
    max_pages: usize,
    include_subdomains: bool,
    stop: Option<&AtomicBool>,
) -> crate::Result<Vec<String>> {
    let seed = canonicalize_url(&parse_http_url(base_url)?);
    let base_host = extract_domain(&seed)
        .ok_or_else(|| crate::AuditError::invalid_url(base_url, "URL has no host"))?;

    let mut state = CrawlState::new(&seed);

    tracing::info!(
        "Discovering up to {} pages from {} (subdomains: {})",
        max_pages,
        seed,
        include_subdomains
    );

    while state.discovered_count() < max_pages {
        if stop.is_some_and(|flag| flag.load(Ordering::SeqCst)) {
            tracing::info!("Discovery stopped after {} pages", state.discovered_count());
            break;
        }

        let Some(current) = state.next_unvisited() else {
            break;
        };

        let response = match retriever.retrieve(&current).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Skipping links on {}: {}", current, e);
                continue;
            }
        };

        let Ok(page_url) = Url::parse(&current) else {
            continue;
        };

        for link in extract_links(&response.body, &page_url) {
            if state.discovered_count() >= max_pages {
                break;
            }

            let internal = extract_domain(&link)
                .is_some_and(|host| is_internal_host(&base_host, &host, include_subdomains));
            if !internal {
                continue;
            }

            let canonical = canonicalize_url(&link);
            if state.enqueue(canonical.as_str()) {
                tracing::debug!("Discovered {}", canonical);
            }
        }

        tracing::debug!(
            "Frontier: {} visited, {} discovered, {} queued",
            state.visited_count(),
            state.discovered_count(),
            state.queue_len()
        );
    }

    tracing::info!("Discovered {} pages", state.discovered_count());
    Ok(state.into_discovered())
}
