//! Page scoring
//!
//! A score is a weighted sum of binary criteria over [`PageFacts`]. The
//! weights add up to 100, so the score is already on a 0-100 scale.

use crate::extract::PageFacts;
use serde::Serialize;

/// Minimum alt-text coverage (percent) for the image criterion
pub const MIN_ALT_COVERAGE: u32 = 80;

/// A single scoring criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Criterion {
    HttpSuccess,
    Title,
    H1,
    MetaDescription,
    ImageAlt,
    Canonical,
    LinkHealth,
    UrlShape,
}

impl Criterion {
    pub fn label(self) -> &'static str {
        match self {
            Criterion::HttpSuccess => "HTTP status",
            Criterion::Title => "Title",
            Criterion::H1 => "H1",
            Criterion::MetaDescription => "Meta description",
            Criterion::ImageAlt => "Image alt text",
            Criterion::Canonical => "Canonical",
            Criterion::LinkHealth => "Link health",
            Criterion::UrlShape => "URL structure",
        }
    }

    fn passes(self, facts: &PageFacts) -> bool {
        match self {
            Criterion::HttpSuccess => facts.status.is_success,
            Criterion::Title => facts.title.exists && facts.title.is_optimal,
            Criterion::H1 => facts.h1.count == 1,
            Criterion::MetaDescription => facts.meta.exists && facts.meta.is_optimal,
            Criterion::ImageAlt => facts.images.percentage >= MIN_ALT_COVERAGE,
            Criterion::Canonical => facts.canonical.exists,
            Criterion::LinkHealth => facts.links.broken == 0,
            Criterion::UrlShape => facts.url_shape.is_short && facts.url_shape.is_readable,
        }
    }
}

/// Criteria and their weights, in reporting order
pub const WEIGHTS: [(Criterion, u8); 8] = [
    (Criterion::HttpSuccess, 15),
    (Criterion::Title, 15),
    (Criterion::H1, 10),
    (Criterion::MetaDescription, 15),
    (Criterion::ImageAlt, 10),
    (Criterion::Canonical, 10),
    (Criterion::LinkHealth, 10),
    (Criterion::UrlShape, 15),
];

/// Outcome of one criterion for one page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CriterionResult {
    pub criterion: Criterion,
    pub weight: u8,
    pub passed: bool,
}

/// Evaluates every criterion against the facts
pub fn score_breakdown(facts: &PageFacts) -> Vec<CriterionResult> {
    WEIGHTS
        .iter()
        .map(|&(criterion, weight)| CriterionResult {
            criterion,
            weight,
            passed: criterion.passes(facts),
        })
        .collect()
}

/// Scores a page from 0 to 100
///
/// # Example
///
/// ```
/// use sitelens::{extract, score};
///
/// let facts = extract("", "https://example.com/", None);
/// // Only HTTP status, alt coverage, link health and URL shape pass
/// assert_eq!(score(&facts), 50);
/// ```
pub fn score(facts: &PageFacts) -> u8 {
    let total: u32 = WEIGHTS.iter().map(|&(_, w)| u32::from(w)).sum();
    let achieved: u32 = score_breakdown(facts)
        .iter()
        .filter(|r| r.passed)
        .map(|r| u32::from(r.weight))
        .sum();

    ((f64::from(achieved) / f64::from(total)) * 100.0).round() as u8
}
