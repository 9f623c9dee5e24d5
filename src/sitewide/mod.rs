//! Sitewide aggregation
//!
//! This module folds per-page outcomes into a single result:
//! - issues merged by message and ranked by severity × count
//! - the average score over successful pages
//! - recommendation lines

mod issues;
mod recommendations;

pub use issues::{
    derive_issues, rank_issues, Issue, IssueKind, IssueTable, MAX_RANKED_ISSUES,
    MSG_CANONICAL_MISSING, MSG_H1_MISSING, MSG_H1_MULTIPLE, MSG_META_MISSING, MSG_TITLE_LENGTH,
    MSG_TITLE_MISSING,
};
pub use recommendations::{recommendations, MAX_ISSUE_SUGGESTIONS, MAX_RECOMMENDATIONS};

use crate::extract::PageFacts;
use serde::Serialize;

/// Result of one page in a sitewide run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageOutcome {
    pub url: String,
    /// 0 for failed pages
    pub score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facts: Option<PageFacts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PageOutcome {
    pub fn success(url: &str, facts: PageFacts, score: u8) -> Self {
        Self {
            url: url.to_string(),
            score,
            facts: Some(facts),
            error: None,
        }
    }

    pub fn failure(url: &str, error: impl ToString) -> Self {
        Self {
            url: url.to_string(),
            score: 0,
            facts: None,
            error: Some(error.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.facts.is_some()
    }
}

/// Aggregated result of a sitewide run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitewideResult {
    pub total_pages: usize,
    pub successful_pages: usize,
    pub average_score: u8,
    /// Ranked, at most ten
    pub issues: Vec<Issue>,
    /// At most five lines
    pub recommendations: Vec<String>,
    /// Every page in discovery order
    pub pages: Vec<PageOutcome>,
}

impl SitewideResult {
    /// Builds the sitewide result from per-page outcomes
    ///
    /// Failed pages count towards `total_pages` but contribute neither
    /// issues nor score.
    pub fn from_outcomes(pages: Vec<PageOutcome>) -> Self {
        let mut table = IssueTable::new();
        let mut score_sum: u32 = 0;
        let mut successful_pages = 0;

        for facts in pages.iter().filter_map(|p| p.facts.as_ref()) {
            table.record_page(facts);
        }
        for page in pages.iter().filter(|p| p.is_success()) {
            score_sum += u32::from(page.score);
            successful_pages += 1;
        }

        let average_score = average(score_sum, successful_pages);
        let issues = rank_issues(table);
        let recommendations = recommendations(average_score, &issues);

        Self {
            total_pages: pages.len(),
            successful_pages,
            average_score,
            issues,
            recommendations,
            pages,
        }
    }

    pub fn failed_pages(&self) -> usize {
        self.total_pages - self.successful_pages
    }
}

fn average(sum: u32, count: usize) -> u8 {
    if count == 0 {
        return 0;
    }
    (f64::from(sum) / count as f64).round() as u8
}
