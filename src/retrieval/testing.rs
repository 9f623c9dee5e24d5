//! In-memory retriever for crawler and session tests

use crate::retrieval::{PageResponse, Retrieve};
use crate::AuditError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// A fixed set of pages keyed by exact URL string
#[derive(Default)]
pub struct StaticSite {
    pages: HashMap<String, PageResponse>,
    calls: Mutex<Vec<String>>,
}

impl StaticSite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a 200 page
    pub fn page(self, url: &str, html: &str) -> Self {
        self.status_page(url, 200, html)
    }

    /// Adds a page with an explicit status code
    pub fn status_page(mut self, url: &str, status_code: u16, html: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            PageResponse {
                status_code,
                headers: HashMap::new(),
                body: html.to_string(),
                served_by: "static".to_string(),
            },
        );
        self
    }

    /// Number of times `url` was requested
    pub fn call_count(&self, url: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.as_str() == url)
            .count()
    }

    /// Total number of retrievals
    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Retrieve for StaticSite {
    async fn retrieve(&self, url: &str) -> crate::Result<PageResponse> {
        self.calls.lock().unwrap().push(url.to_string());

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| AuditError::RetrievalFailed {
                url: url.to_string(),
                tried: vec!["static".to_string()],
            })
    }
}

/// Builds a small HTML page linking to `links`
pub fn html_with_links(title: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!("<a href=\"{}\">link</a>", href))
        .collect();
    format!(
        "<html><head><title>{}</title></head><body><h1>{}</h1>{}</body></html>",
        title, title, anchors
    )
}
