use url::Url;

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitelens::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true for URLs the crawler and link checker can follow
pub fn is_http_url(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// Parses an absolute http(s) URL supplied by a caller
///
/// Used at every public entry point so malformed input fails fast.
pub fn parse_http_url(input: &str) -> crate::Result<Url> {
    let url = Url::parse(input.trim()).map_err(|e| crate::AuditError::invalid_url(input, e))?;

    if !is_http_url(&url) {
        return Err(crate::AuditError::invalid_url(
            input,
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    if url.host_str().is_none() {
        return Err(crate::AuditError::invalid_url(input, "missing host"));
    }

    Ok(url)
}
