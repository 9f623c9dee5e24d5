//! Console reports
//!
//! Prints page and sitewide results to stdout in a readable layout.

use crate::score::score_breakdown;
use crate::session::PageReport;
use crate::sitewide::SitewideResult;

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Prints a single page analysis to stdout
pub fn print_page_report(report: &PageReport) {
    let facts = &report.facts;

    println!("=== Page Analysis ===\n");
    println!("URL: {}", facts.url);
    if let Some(keyword) = &facts.keyword {
        println!("Keyword: {}", keyword);
    }
    println!("Score: {}/100", report.score);
    println!();

    println!("Criteria:");
    for result in score_breakdown(facts) {
        println!(
            "  [{}] {:<18} {:>3}",
            if result.passed { "x" } else { " " },
            result.criterion.label(),
            result.weight
        );
    }
    println!();

    println!("Details:");
    println!(
        "  HTTP status: {}{}",
        facts.status.code,
        if facts.status.noindex || facts.meta.noindex {
            " (noindex)"
        } else {
            ""
        }
    );
    if facts.title.exists {
        println!(
            "  Title ({} chars): {}",
            facts.title.length, facts.title.text
        );
    } else {
        println!("  Title: missing");
    }
    println!("  H1 count: {}", facts.h1.count);
    for text in &facts.h1.texts {
        println!("    - {}", text);
    }
    println!(
        "  Meta description: {} ({} chars)",
        yes_no(facts.meta.exists),
        facts.meta.length
    );
    println!(
        "  Images: {} total, {} without alt ({}% coverage)",
        facts.images.total, facts.images.without_alt, facts.images.percentage
    );
    for missing in &facts.images.missing_alt {
        println!("    - {}", missing.filename);
    }
    println!(
        "  Canonical: {}{}",
        yes_no(facts.canonical.exists),
        facts
            .canonical
            .url
            .as_deref()
            .map(|u| format!(" -> {}", u))
            .unwrap_or_default()
    );
    println!(
        "  Links: {} seen, {} internal, {} external, {} broken",
        facts.links.total_seen, facts.links.internal, facts.links.external, facts.links.broken
    );
    println!(
        "  URL: {} chars, depth {}, readable: {}",
        facts.url_shape.length,
        facts.url_shape.depth,
        yes_no(facts.url_shape.is_readable)
    );
    println!();

    if !report.issues.is_empty() {
        println!("Issues:");
        for issue in &report.issues {
            println!("  [{}] {}", issue.kind, issue.message);
        }
        println!();
    }
}

/// Prints a sitewide result to stdout
pub fn print_sitewide_report(result: &SitewideResult) {
    println!("=== Sitewide Analysis ===\n");

    println!("Overview:");
    println!("  Pages analyzed: {}", result.total_pages);
    println!("  Successful: {}", result.successful_pages);
    println!("  Failed: {}", result.failed_pages());
    println!("  Average score: {}/100", result.average_score);
    println!();

    println!("Pages:");
    for page in &result.pages {
        match &page.error {
            Some(error) => println!("  {:>3}  {}  ({})", "-", page.url, error),
            None => println!("  {:>3}  {}", page.score, page.url),
        }
    }
    println!();

    if !result.issues.is_empty() {
        println!("Top Issues:");
        for issue in &result.issues {
            println!(
                "  [{}] {} ({} page{})",
                issue.kind,
                issue.message,
                issue.count,
                if issue.count == 1 { "" } else { "s" }
            );
        }
        println!();
    }

    println!("Recommendations:");
    for line in &result.recommendations {
        println!("  - {}", line);
    }
}
