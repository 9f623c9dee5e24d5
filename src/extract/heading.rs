//! Heading text cleanup
//!
//! Carousel and slider widgets often leak their navigation labels ("Links",
//! "Rechtsaf") into the first or last word of an H1. Only those two edge
//! tokens are removed, and only as whole words.

use regex::Regex;
use std::sync::OnceLock;

fn leading_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\s*links\b\s*").expect("valid leading-token regex"))
}

fn trailing_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\s*\brechtsaf\s*$").expect("valid trailing-token regex"))
}

/// Strips a leading `Links` and a trailing `Rechtsaf` token from a heading
///
/// # Examples
///
/// ```
/// use sitelens::extract::clean_heading;
///
/// assert_eq!(clean_heading("Links Over ons"), "Over ons");
/// assert_eq!(clean_heading("Klik hier Rechtsaf"), "Klik hier");
/// assert_eq!(clean_heading("Ga linksaf bij het kruispunt"), "Ga linksaf bij het kruispunt");
/// ```
pub fn clean_heading(text: &str) -> String {
    let without_lead = leading_token().replace(text, "");
    let without_trail = trailing_token().replace(&without_lead, "");
    without_trail.trim().to_string()
}
