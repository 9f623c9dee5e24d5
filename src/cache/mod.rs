//! Page result caching
//!
//! Analyzed pages are cached per `(url, keyword)` so a repeated request
//! within the time-to-live skips retrieval. Expired entries are dropped
//! lazily: on read, and by an occasional randomized sweep.

use crate::config::CacheConfig;
use crate::extract::PageFacts;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// Cache key: page URL plus keyword (empty when none)
pub type CacheKey = (String, String);

/// Cached facts for one page and keyword
#[derive(Debug, Clone)]
pub struct CachedPage {
    /// The extracted facts
    pub facts: PageFacts,

    /// When the facts were cached
    pub created_at: DateTime<Utc>,
}

impl CachedPage {
    pub fn new(facts: PageFacts) -> Self {
        Self {
            facts,
            created_at: Utc::now(),
        }
    }

    /// Checks whether the entry is older than `ttl`
    pub fn is_stale(&self, ttl: Duration) -> bool {
        Utc::now() - self.created_at > ttl
    }
}

/// Time-bounded map of analyzed pages
#[derive(Debug)]
pub struct ResultCache {
    entries: HashMap<CacheKey, CachedPage>,
    ttl: Duration,
    sweep_probability: f64,
}

fn cache_key(url: &str, keyword: Option<&str>) -> CacheKey {
    (url.to_string(), keyword.unwrap_or_default().to_string())
}

impl ResultCache {
    /// Creates an empty cache
    ///
    /// # Arguments
    ///
    /// * `ttl` - Maximum age of an entry that `get` will return
    /// * `sweep_probability` - Chance per call of dropping all expired entries
    pub fn new(ttl: Duration, sweep_probability: f64) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            sweep_probability,
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        let ttl = i64::try_from(config.ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or_else(Duration::max_value);
        Self::new(ttl, config.sweep_probability)
    }

    /// Returns the cached facts for `(url, keyword)` if younger than the TTL
    ///
    /// An expired entry is removed and reported as a miss.
    pub fn get(&mut self, url: &str, keyword: Option<&str>) -> Option<PageFacts> {
        self.maybe_sweep();

        let key = cache_key(url, keyword);
        match self.entries.get(&key) {
            Some(entry) if !entry.is_stale(self.ttl) => Some(entry.facts.clone()),
            Some(_) => {
                self.entries.remove(&key);
                None
            }
            None => None,
        }
    }

    /// Stores facts for `(url, keyword)`, replacing any previous entry
    pub fn put(&mut self, url: &str, keyword: Option<&str>, facts: PageFacts) {
        self.maybe_sweep();
        self.entries
            .insert(cache_key(url, keyword), CachedPage::new(facts));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drops every expired entry, returning how many were removed
    pub fn sweep_expired(&mut self) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_stale(ttl));

        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::debug!("Swept {} expired cache entries", removed);
        }
        removed
    }

    fn maybe_sweep(&mut self) {
        if fastrand::f64() < self.sweep_probability {
            self.sweep_expired();
        }
    }
}
