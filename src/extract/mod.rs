//! Fact extraction
//!
//! This module turns a page body into [`PageFacts`]. Extraction never fails:
//! missing elements are reported as "does not exist" rather than as errors.

mod facts;
mod heading;

pub use facts::{
    CanonicalFacts, HeadingFacts, ImageFacts, LinkFacts, MetaFacts, MissingAlt, PageFacts,
    StatusFacts, TitleFacts, UrlShape,
};
pub use heading::clean_heading;

use crate::retrieval::PageResponse;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Title length range (inclusive) considered optimal
pub const TITLE_OPTIMAL: (usize, usize) = (30, 60);

/// Meta description length range (inclusive) considered optimal
pub const META_OPTIMAL: (usize, usize) = (120, 160);

/// At most this many qualifying links are inspected per page
pub const MAX_CHECKED_LINKS: usize = 20;

/// URLs longer than this are not "short"
pub const MAX_SHORT_URL_LENGTH: usize = 100;

/// Extracts facts from a page body, assuming a plain 200 response
///
/// # Example
///
/// ```
/// use sitelens::extract;
///
/// let html = "<html><head><title>Hello</title></head><body><h1>Hi</h1></body></html>";
/// let facts = extract(html, "https://example.com/", None);
/// assert!(facts.title.exists);
/// assert_eq!(facts.h1.count, 1);
/// ```
pub fn extract(body: &str, url: &str, keyword: Option<&str>) -> PageFacts {
    extract_with_status(body, url, keyword, StatusFacts::default())
}

/// Extracts facts from a retrieved response
///
/// Same as [`extract`], with `status` taken from the response code and the
/// `x-robots-tag` header.
pub fn extract_response(response: &PageResponse, url: &str, keyword: Option<&str>) -> PageFacts {
    let robots_header = response
        .header("x-robots-tag")
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let status = StatusFacts {
        code: response.status_code,
        is_success: response.is_success(),
        noindex: robots_header.contains("noindex"),
        nofollow: robots_header.contains("nofollow"),
    };

    extract_with_status(&response.body, url, keyword, status)
}

fn extract_with_status(
    body: &str,
    url: &str,
    keyword: Option<&str>,
    status: StatusFacts,
) -> PageFacts {
    let document = Html::parse_document(body);
    let keyword = normalize_keyword(keyword);
    let kw = keyword.as_deref();

    PageFacts {
        url: url.to_string(),
        status,
        title: extract_title(&document, kw),
        h1: extract_h1(&document, kw),
        meta: extract_meta(&document),
        images: extract_images(&document, url),
        canonical: extract_canonical(&document, url),
        links: extract_links(&document, url),
        url_shape: url_shape(url),
        keyword,
    }
}

/// Empty or whitespace-only keywords count as no keyword
fn normalize_keyword(keyword: Option<&str>) -> Option<String> {
    keyword
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
}

fn contains_keyword(text: &str, keyword: &str) -> bool {
    text.to_lowercase().contains(&keyword.to_lowercase())
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn in_range(length: usize, (min, max): (usize, usize)) -> bool {
    (min..=max).contains(&length)
}

fn extract_title(document: &Html, keyword: Option<&str>) -> TitleFacts {
    let Ok(selector) = Selector::parse("title") else {
        return TitleFacts::default();
    };

    match document.select(&selector).next() {
        Some(element) => {
            let text = element_text(&element);
            let length = text.chars().count();
            TitleFacts {
                exists: true,
                is_optimal: in_range(length, TITLE_OPTIMAL),
                has_keyword: keyword.map(|k| contains_keyword(&text, k)),
                length,
                text,
            }
        }
        None => TitleFacts {
            has_keyword: keyword.map(|_| false),
            ..TitleFacts::default()
        },
    }
}

fn extract_h1(document: &Html, keyword: Option<&str>) -> HeadingFacts {
    let texts: Vec<String> = match Selector::parse("h1") {
        Ok(selector) => document
            .select(&selector)
            .map(|element| {
                let collapsed = element
                    .text()
                    .flat_map(str::split_whitespace)
                    .collect::<Vec<_>>()
                    .join(" ");
                clean_heading(&collapsed)
            })
            .collect(),
        Err(_) => Vec::new(),
    };

    HeadingFacts {
        count: texts.len(),
        is_optimal: texts.len() == 1,
        keyword_present: keyword.map(|k| texts.iter().any(|t| contains_keyword(t, k))),
        texts,
    }
}

fn extract_meta(document: &Html) -> MetaFacts {
    let mut facts = MetaFacts::default();

    let Ok(selector) = Selector::parse("meta[name]") else {
        return facts;
    };

    let mut description: Option<String> = None;
    let mut robots = String::new();

    for element in document.select(&selector) {
        let name = element.value().attr("name").unwrap_or_default().trim();
        let content = element.value().attr("content").unwrap_or_default().trim();

        if name.eq_ignore_ascii_case("description") && description.is_none() {
            description = Some(content.to_string());
        } else if name.eq_ignore_ascii_case("robots") {
            robots.push_str(&content.to_ascii_lowercase());
            robots.push(' ');
        }
    }

    if let Some(text) = description {
        facts.exists = true;
        facts.length = text.chars().count();
        facts.is_optimal = in_range(facts.length, META_OPTIMAL);
        facts.text = text;
    }
    facts.noindex = robots.contains("noindex");
    facts.nofollow = robots.contains("nofollow");

    facts
}

fn extract_images(document: &Html, page_url: &str) -> ImageFacts {
    let Ok(selector) = Selector::parse("img") else {
        return ImageFacts::default();
    };

    let base = Url::parse(page_url).ok();
    let mut facts = ImageFacts::default();

    for element in document.select(&selector) {
        facts.total += 1;

        let has_alt = element
            .value()
            .attr("alt")
            .is_some_and(|alt| !alt.trim().is_empty());

        if has_alt {
            facts.with_alt += 1;
            continue;
        }

        facts.without_alt += 1;
        if let Some(src) = element.value().attr("src") {
            if let Some(missing) = missing_alt_entry(src, base.as_ref()) {
                facts.missing_alt.push(missing);
            }
        }
    }

    if facts.total > 0 {
        facts.percentage =
            ((facts.with_alt as f64 / facts.total as f64) * 100.0).round() as u32;
    }

    facts
}

/// Builds a missing-alt entry, or `None` when the src has no usable filename
fn missing_alt_entry(src: &str, base: Option<&Url>) -> Option<MissingAlt> {
    let src = src.trim();
    if src.is_empty() || src.starts_with("data:") {
        return None;
    }

    let path = src.split(['?', '#']).next().unwrap_or_default();
    let filename = path.rsplit('/').next().unwrap_or_default();
    if filename.is_empty() {
        return None;
    }

    let absolute_url = base
        .and_then(|b| b.join(src).ok())
        .map(|u| u.to_string())
        .unwrap_or_else(|| src.to_string());

    Some(MissingAlt {
        filename: filename.to_string(),
        src: src.to_string(),
        absolute_url,
    })
}

fn extract_canonical(document: &Html, page_url: &str) -> CanonicalFacts {
    let Ok(selector) = Selector::parse("link[rel]") else {
        return CanonicalFacts::default();
    };

    let canonical = document.select(&selector).find(|element| {
        element
            .value()
            .attr("rel")
            .unwrap_or_default()
            .split_whitespace()
            .any(|rel| rel.eq_ignore_ascii_case("canonical"))
    });

    let Some(element) = canonical else {
        return CanonicalFacts::default();
    };

    let href = element
        .value()
        .attr("href")
        .map(str::trim)
        .map(str::to_string);

    CanonicalFacts {
        exists: true,
        is_self_referencing: href.as_deref() == Some(page_url),
        is_valid: href.as_deref().is_some_and(|h| Url::parse(h).is_ok()),
        url: href,
    }
}

fn extract_links(document: &Html, page_url: &str) -> LinkFacts {
    let Ok(selector) = Selector::parse("a[href]") else {
        return LinkFacts::default();
    };

    let base = Url::parse(page_url).ok();
    let page_host = base
        .as_ref()
        .and_then(|b| b.host_str())
        .map(str::to_ascii_lowercase);

    let hrefs: Vec<&str> = document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .collect();

    let mut facts = LinkFacts {
        total_seen: hrefs.len(),
        ..LinkFacts::default()
    };

    let qualifying = hrefs
        .iter()
        .map(|href| href.trim())
        .filter(|href| is_checkable_href(href))
        .take(MAX_CHECKED_LINKS);

    for href in qualifying {
        let resolved = match &base {
            Some(base) => base.join(href),
            None => Url::parse(href),
        };

        match resolved {
            Ok(link) => {
                let host = link.host_str().map(str::to_ascii_lowercase);
                if host.is_some() && host == page_host {
                    facts.internal += 1;
                } else {
                    facts.external += 1;
                }
            }
            Err(_) => facts.broken += 1,
        }
    }

    facts.checked_count = facts.internal + facts.external;
    facts
}

/// Fragment-only, mailto: and tel: links are not inspected
fn is_checkable_href(href: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    !(href.starts_with('#') || lower.starts_with("mailto:") || lower.starts_with("tel:"))
}

fn is_readable_path(path: &str) -> bool {
    path.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '/' | '.'))
}

fn url_shape(url: &str) -> UrlShape {
    let length = url.chars().count();
    let is_short = length <= MAX_SHORT_URL_LENGTH;

    match Url::parse(url) {
        Ok(parsed) => UrlShape {
            length,
            is_short,
            has_params: parsed.query().is_some_and(|q| !q.is_empty()),
            depth: parsed
                .path_segments()
                .map(|segments| segments.filter(|s| !s.is_empty()).count())
                .unwrap_or(0),
            is_readable: is_readable_path(parsed.path()),
            protocol: format!("{}:", parsed.scheme()),
        },
        Err(_) => UrlShape {
            length,
            is_short,
            has_params: url.contains('?'),
            ..UrlShape::default()
        },
    }
}
