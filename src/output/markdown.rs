//! Markdown report generation
//!
//! This module renders a sitewide result as a markdown document with the
//! overview, the per-page scores, the ranked issues and the recommendations.

use crate::sitewide::SitewideResult;
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown report of a sitewide run
///
/// # Arguments
///
/// * `result` - The sitewide result
/// * `base_url` - The URL the run started from
/// * `output_path` - Path where the markdown file should be written
pub fn write_markdown_report(
    result: &SitewideResult,
    base_url: &str,
    output_path: &Path,
) -> crate::Result<()> {
    let markdown = format_markdown_report(result, base_url, Utc::now());

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a sitewide result as markdown
pub fn format_markdown_report(
    result: &SitewideResult,
    base_url: &str,
    generated_at: DateTime<Utc>,
) -> String {
    let mut md = String::new();

    md.push_str("# Sitewide SEO Report\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Site**: {}\n", base_url));
    md.push_str(&format!(
        "- **Generated**: {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    md.push_str("## Overview\n\n");
    md.push_str(&format!("- **Pages Analyzed**: {}\n", result.total_pages));
    md.push_str(&format!("- **Successful**: {}\n", result.successful_pages));
    md.push_str(&format!("- **Failed**: {}\n", result.failed_pages()));
    md.push_str(&format!(
        "- **Average Score**: {}/100\n\n",
        result.average_score
    ));

    md.push_str("## Pages\n\n");
    md.push_str("| URL | Score | Error |\n");
    md.push_str("|-----|-------|-------|\n");
    for page in &result.pages {
        md.push_str(&format!(
            "| {} | {} | {} |\n",
            escape_cell(&page.url),
            page.score,
            escape_cell(page.error.as_deref().unwrap_or(""))
        ));
    }
    md.push('\n');

    if !result.issues.is_empty() {
        md.push_str("## Top Issues\n\n");
        md.push_str("| Severity | Issue | Pages |\n");
        md.push_str("|----------|-------|-------|\n");
        for issue in &result.issues {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                issue.kind,
                escape_cell(&issue.message),
                issue.count
            ));
        }
        md.push('\n');
    }

    md.push_str("## Recommendations\n\n");
    for line in &result.recommendations {
        md.push_str(&format!("- {}\n", line));
    }

    md
}

/// Keeps a value inside one table cell
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace(['\r', '\n'], " ")
}
