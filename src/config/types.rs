use serde::Deserialize;

/// Main configuration structure for Sitelens
///
/// Every section falls back to its defaults, so an empty file (or no file at
/// all) yields a working configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub retrieval: RetrievalConfig,
    pub crawler: CrawlerConfig,
    pub cache: CacheConfig,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "Sitelens".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "admin@example.com".to_string(),
        }
    }
}

/// Retrieval layer configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Timeout for a single backend attempt (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Whether to try a plain GET before any relay
    pub direct: bool,

    /// First-party relay endpoint, queried as `?url=<target>`
    #[serde(rename = "first-party-relay")]
    pub first_party_relay: Option<String>,

    /// Public relays, tried in order after the first-party relay
    pub relays: Vec<RelayEntry>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            direct: true,
            first_party_relay: None,
            relays: RelayEntry::public_defaults(),
        }
    }
}

/// Response shape of a public relay service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelayKind {
    /// JSON envelope `{contents, status: {http_code}}`, no headers
    AllOrigins,
    /// Raw body with the target's real headers
    CorsProxy,
    /// Raw body, no usable headers
    CodeTabs,
}

/// A public relay entry
#[derive(Debug, Clone, Deserialize)]
pub struct RelayEntry {
    /// Which response shape this relay uses
    pub kind: RelayKind,

    /// Relay endpoint; the target URL is appended as a query parameter
    pub endpoint: String,
}

impl RelayEntry {
    /// The public relays used when the config names none
    pub fn public_defaults() -> Vec<RelayEntry> {
        vec![
            RelayEntry {
                kind: RelayKind::AllOrigins,
                endpoint: "https://api.allorigins.win/get".to_string(),
            },
            RelayEntry {
                kind: RelayKind::CorsProxy,
                endpoint: "https://corsproxy.io/".to_string(),
            },
            RelayEntry {
                kind: RelayKind::CodeTabs,
                endpoint: "https://api.codetabs.com/v1/proxy".to_string(),
            },
        ]
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of pages discovered in a sitewide run
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Whether subdomains of the base host count as internal
    #[serde(rename = "include-subdomains")]
    pub include_subdomains: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 20,
            include_subdomains: false,
        }
    }
}

/// Result cache configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Time-to-live of a cached page analysis (seconds)
    #[serde(rename = "ttl-secs")]
    pub ttl_secs: u64,

    /// Chance per cache call of sweeping all expired entries
    #[serde(rename = "sweep-probability")]
    pub sweep_probability: f64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 300,
            sweep_probability: 0.1,
        }
    }
}
