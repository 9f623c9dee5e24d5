/// Checks whether a candidate host belongs to the site being crawled
///
/// Hosts are compared as given; callers lowercase them first.
///
/// # Examples
///
/// ```
/// use sitelens::url::is_internal_host;
///
/// assert!(is_internal_host("example.com", "example.com", false));
/// assert!(!is_internal_host("example.com", "blog.example.com", false));
/// assert!(is_internal_host("example.com", "blog.example.com", true));
/// assert!(!is_internal_host("example.com", "myexample.com", true));
/// ```
pub fn is_internal_host(base: &str, candidate: &str, include_subdomains: bool) -> bool {
    if candidate == base {
        return true;
    }

    include_subdomains
        && candidate.len() > base.len()
        && candidate.ends_with(base)
        && candidate.as_bytes()[candidate.len() - base.len() - 1] == b'.'
}
