use url::Url;

/// Tracking query parameters removed during canonicalization
const TRACKING_PARAMS: &[&str] = &["fbclid", "gclid", "msclkid", "mc_eid"];

/// Canonicalizes a URL for frontier deduplication
///
/// This is distinct from the page's own `<link rel="canonical">` tag: it only
/// decides whether two hrefs point at the same page.
///
/// # Canonicalization Steps
///
/// 1. Remove the fragment (everything after #)
/// 2. Remove tracking query parameters (`utm_*`, `fbclid`, `gclid`, ...)
/// 3. Remove the query string entirely if nothing is left
///
/// The order of the remaining parameters is preserved.
///
/// # Examples
///
/// ```
/// use sitelens::url::canonicalize_url;
/// use url::Url;
///
/// let url = Url::parse("https://example.com/page?utm_source=x&id=4#top").unwrap();
/// assert_eq!(canonicalize_url(&url).as_str(), "https://example.com/page?id=4");
/// ```
pub fn canonicalize_url(url: &Url) -> Url {
    let mut url = url.clone();

    url.set_fragment(None);

    if url.query().is_some() {
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| !is_tracking_param(key))
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        if kept.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(kept);
        }
    }

    url
}

/// Checks if a query parameter is a tracking parameter
fn is_tracking_param(key: &str) -> bool {
    key.starts_with("utm_") || TRACKING_PARAMS.contains(&key)
}
