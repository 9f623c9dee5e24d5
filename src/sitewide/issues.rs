//! Per-page issue derivation and the sitewide issue table

use crate::extract::PageFacts;
use serde::Serialize;
use std::collections::HashMap;

/// Issues kept after ranking
pub const MAX_RANKED_ISSUES: usize = 10;

pub const MSG_TITLE_MISSING: &str = "Title ontbreekt";
pub const MSG_TITLE_LENGTH: &str = "Title heeft geen optimale lengte (30-60 tekens)";
pub const MSG_H1_MISSING: &str = "H1 ontbreekt";
pub const MSG_H1_MULTIPLE: &str = "Meerdere H1 tags gevonden";
pub const MSG_META_MISSING: &str = "Meta description ontbreekt";
pub const MSG_CANONICAL_MISSING: &str = "Canonical tag ontbreekt";

/// Severity of an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Error,
    Warning,
    Notice,
}

impl IssueKind {
    /// Ranking weight: error 3, warning 2, notice 1
    pub fn severity_weight(self) -> u32 {
        match self {
            IssueKind::Error => 3,
            IssueKind::Warning => 2,
            IssueKind::Notice => 1,
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            IssueKind::Error => "error",
            IssueKind::Warning => "warning",
            IssueKind::Notice => "notice",
        };
        write!(f, "{}", label)
    }
}

/// An issue with the pages it affects
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub kind: IssueKind,
    pub message: String,
    pub count: u32,
    pub affected_urls: Vec<String>,
}

impl Issue {
    /// A single occurrence on one page
    pub fn new(kind: IssueKind, message: impl Into<String>, url: &str) -> Self {
        Self {
            kind,
            message: message.into(),
            count: 1,
            affected_urls: vec![url.to_string()],
        }
    }

    /// Ranking key: severity weight times occurrence count
    pub fn rank_weight(&self) -> u32 {
        self.kind.severity_weight() * self.count
    }
}

/// Derives the issue list for one page
///
/// | Condition | Kind |
/// |-----------|------|
/// | no title | error |
/// | title outside 30-60 characters | warning |
/// | no H1 | error |
/// | more than one H1 | warning |
/// | no meta description | error |
/// | images without alt text | warning |
/// | no canonical | notice |
pub fn derive_issues(facts: &PageFacts) -> Vec<Issue> {
    let url = facts.url.as_str();
    let mut issues = Vec::new();

    if !facts.title.exists {
        issues.push(Issue::new(IssueKind::Error, MSG_TITLE_MISSING, url));
    } else if !facts.title.is_optimal {
        issues.push(Issue::new(IssueKind::Warning, MSG_TITLE_LENGTH, url));
    }

    match facts.h1.count {
        0 => issues.push(Issue::new(IssueKind::Error, MSG_H1_MISSING, url)),
        1 => {}
        _ => issues.push(Issue::new(IssueKind::Warning, MSG_H1_MULTIPLE, url)),
    }

    if !facts.meta.exists {
        issues.push(Issue::new(IssueKind::Error, MSG_META_MISSING, url));
    }

    if facts.images.without_alt > 0 {
        issues.push(Issue::new(
            IssueKind::Warning,
            format!("{} afbeelding(en) zonder alt-tekst", facts.images.without_alt),
            url,
        ));
    }

    if !facts.canonical.exists {
        issues.push(Issue::new(IssueKind::Notice, MSG_CANONICAL_MISSING, url));
    }

    issues
}

/// Sitewide issues keyed by message
#[derive(Debug, Default)]
pub struct IssueTable {
    issues: HashMap<String, Issue>,
}

impl IssueTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one page-level issue into the table
    ///
    /// The first occurrence of a message creates the entry; later ones bump
    /// its count and append the affected URLs.
    pub fn record(&mut self, issue: Issue) {
        match self.issues.get_mut(&issue.message) {
            Some(existing) => {
                existing.count += issue.count;
                existing.affected_urls.extend(issue.affected_urls);
            }
            None => {
                self.issues.insert(issue.message.clone(), issue);
            }
        }
    }

    /// Folds every issue of one page
    pub fn record_page(&mut self, facts: &PageFacts) {
        for issue in derive_issues(facts) {
            self.record(issue);
        }
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn get(&self, message: &str) -> Option<&Issue> {
        self.issues.get(message)
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues.into_values().collect()
    }
}

/// Ranks issues by `severity weight × count`, keeping the top ten
///
/// Ties are broken by message so the ranking is deterministic.
pub fn rank_issues(table: IssueTable) -> Vec<Issue> {
    let mut issues = table.into_issues();
    issues.sort_by(|a, b| {
        b.rank_weight()
            .cmp(&a.rank_weight())
            .then_with(|| a.message.cmp(&b.message))
    });
    issues.truncate(MAX_RANKED_ISSUES);
    issues
}
