//! Audit session
//!
//! An [`AuditSession`] owns everything a run needs: the retriever, the
//! result cache, and the busy and stop flags. It exposes the two entry
//! points, single-page analysis and the sitewide run.

use crate::cache::ResultCache;
use crate::config::Config;
use crate::crawler::discover;
use crate::extract::{extract_response, PageFacts};
use crate::retrieval::{Retrieve, Retriever};
use crate::score::score;
use crate::sitewide::{derive_issues, Issue, PageOutcome, SitewideResult};
use crate::url::parse_http_url;
use crate::AuditError;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Analysis of a single page
#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    pub facts: PageFacts,
    pub score: u8,
    pub issues: Vec<Issue>,
}

impl PageReport {
    pub fn from_facts(facts: PageFacts) -> Self {
        Self {
            score: score(&facts),
            issues: derive_issues(&facts),
            facts,
        }
    }
}

/// Holds the busy flag for the duration of a sitewide run
struct RunGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> RunGuard<'a> {
    /// Sets the flag, or returns `None` if it was already set
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Error recorded for discovered pages skipped after a stop request
pub const STOPPED_BEFORE_ANALYSIS: &str = "stopped before analysis";

/// Entry point for page and sitewide audits
pub struct AuditSession {
    retriever: Arc<dyn Retrieve>,
    cache: Mutex<ResultCache>,
    busy: AtomicBool,
    stop: AtomicBool,
}

impl AuditSession {
    pub fn new(retriever: Arc<dyn Retrieve>, cache: ResultCache) -> Self {
        Self {
            retriever,
            cache: Mutex::new(cache),
            busy: AtomicBool::new(false),
            stop: AtomicBool::new(false),
        }
    }

    /// Creates a session with an HTTP retriever built from the configuration
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let retriever = Retriever::from_config(config)?;
        Ok(Self::new(
            Arc::new(retriever),
            ResultCache::from_config(&config.cache),
        ))
    }

    /// Returns true while a sitewide run is in progress
    pub fn is_running(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Asks the current sitewide run to stop after the page in progress
    ///
    /// The flag is cleared when the next run starts.
    pub fn request_stop(&self) {
        tracing::info!("Stop requested");
        self.stop.store(true, Ordering::SeqCst);
    }

    fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    /// Number of cached page analyses
    pub fn cached_pages(&self) -> usize {
        self.cache().len()
    }

    fn cache(&self) -> MutexGuard<'_, ResultCache> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns cached facts, or retrieves and extracts them
    ///
    /// The cache lock is never held across the retrieval.
    async fn facts_for(&self, url: &str, keyword: Option<&str>) -> crate::Result<PageFacts> {
        let keyword = keyword.map(str::trim).filter(|k| !k.is_empty());

        let cached = self.cache().get(url, keyword);
        if let Some(facts) = cached {
            tracing::debug!("Cache hit for {}", url);
            return Ok(facts);
        }

        let response = self.retriever.retrieve(url).await?;
        let facts = extract_response(&response, url, keyword);
        self.cache().put(url, keyword, facts.clone());

        Ok(facts)
    }

    /// Analyzes a single page
    ///
    /// # Errors
    ///
    /// - `InvalidUrl` if `url` is not an http(s) URL
    /// - `RetrievalFailed` if every backend failed
    pub async fn analyze_page(&self, url: &str, keyword: Option<&str>) -> crate::Result<PageReport> {
        let target = parse_http_url(url)?;
        let facts = self.facts_for(target.as_str(), keyword).await?;
        let report = PageReport::from_facts(facts);

        tracing::info!(
            "Analyzed {}: score {}, {} issues",
            target,
            report.score,
            report.issues.len()
        );
        Ok(report)
    }

    /// Crawls a site and audits every discovered page
    ///
    /// Pages are analyzed one at a time in discovery order. A page that
    /// cannot be retrieved is recorded with its error and a score of 0; it
    /// never aborts the run. After a stop request the remaining discovered
    /// pages are recorded as failures, so `total_pages` still counts every
    /// discovered page.
    ///
    /// # Errors
    ///
    /// - `BusyRunRejected` if another run is in progress
    /// - `InvalidUrl` if `base_url` is not an http(s) URL
    pub async fn run_sitewide(
        &self,
        base_url: &str,
        keyword: Option<&str>,
        max_pages: usize,
        include_subdomains: bool,
    ) -> crate::Result<SitewideResult> {
        let _guard = RunGuard::acquire(&self.busy).ok_or(AuditError::BusyRunRejected)?;
        self.stop.store(false, Ordering::SeqCst);

        let urls = discover(
            self.retriever.as_ref(),
            base_url,
            max_pages,
            include_subdomains,
            Some(&self.stop),
        )
        .await?;

        let total = urls.len();
        let mut outcomes = Vec::with_capacity(total);

        for (index, url) in urls.iter().enumerate() {
            if self.stop_requested() {
                tracing::info!("Run stopped after {} of {} pages", index, total);
                outcomes.extend(
                    urls[index..]
                        .iter()
                        .map(|url| PageOutcome::failure(url, STOPPED_BEFORE_ANALYSIS)),
                );
                break;
            }

            tracing::info!("Analyzing page {}/{}: {}", index + 1, total, url);

            match self.facts_for(url, keyword).await {
                Ok(facts) => {
                    let page_score = score(&facts);
                    outcomes.push(PageOutcome::success(url, facts, page_score));
                }
                Err(e) => {
                    tracing::warn!("Failed to analyze {}: {}", url, e);
                    outcomes.push(PageOutcome::failure(url, e));
                }
            }
        }

        let result = SitewideResult::from_outcomes(outcomes);
        tracing::info!(
            "Sitewide run complete: {}/{} pages, average score {}",
            result.successful_pages,
            result.total_pages,
            result.average_score
        );
        Ok(result)
    }
}
