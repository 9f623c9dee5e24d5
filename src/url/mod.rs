//! URL handling module for Sitelens
//!
//! This module provides frontier canonicalization, host extraction, input
//! validation and same-site host matching.

mod domain;
mod matcher;
mod normalize;

pub use domain::{extract_domain, is_http_url, parse_http_url};
pub use matcher::is_internal_host;
pub use normalize::canonicalize_url;
