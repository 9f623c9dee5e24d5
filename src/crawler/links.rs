//! Anchor link extraction for the frontier

use scraper::{Html, Selector};
use url::Url;

/// Extracts every followable `<a href>` on a page as an absolute URL
///
/// # Exclusions
///
/// - `javascript:`, `mailto:`, `tel:` and `data:` links
/// - fragment-only links (same page anchors)
/// - hrefs that fail to resolve against `base_url`
/// - non-HTTP(S) URLs after resolution
///
/// `rel="nofollow"` links are followed.
///
/// # Example
///
/// ```
/// use sitelens::crawler::extract_links;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/page").unwrap();
/// let links = extract_links(r#"<a href="/other">x</a>"#, &base);
/// assert_eq!(links[0].as_str(), "https://example.com/other");
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

/// Resolves an href against the page URL, or `None` when it should be skipped
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
    {
        return None;
    }

    base_url
        .join(href)
        .ok()
        .filter(|url| url.scheme() == "http" || url.scheme() == "https")
}
