//! Retrieval backends and their response envelopes
//!
//! Every backend is one variant of [`Backend`]. A variant knows how to build
//! its request URL for a target and how to normalize the raw relay response
//! into the uniform [`PageResponse`] shape.

use crate::config::{Config, RelayKind};
use crate::retrieval::PageResponse;
use crate::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;
use url::Url;

/// Why a single backend attempt did not produce a page
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("malformed relay envelope: {0}")]
    Envelope(String),

    #[error("relay reported an error: {0}")]
    Relay(String),
}

impl From<reqwest::Error> for AttemptError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AttemptError::Timeout
        } else {
            AttemptError::Network(e.to_string())
        }
    }
}

/// A backend's HTTP response before normalization
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Status of the response we actually received (target or relay)
    pub status: u16,

    /// Response headers, lowercase names
    pub headers: HashMap<String, String>,

    /// Response body as text
    pub body: String,
}

/// One way of reaching a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    /// Plain GET against the target
    Direct,

    /// Our own relay: `GET endpoint?url=<target>` returning
    /// `{status, statusText, contents, headers}`
    FirstPartyRelay { endpoint: Url },

    /// `GET endpoint?url=<target>` returning `{contents, status: {http_code}}`
    AllOrigins { endpoint: Url },

    /// `GET endpoint?url=<target>` returning the raw body with real headers
    CorsProxy { endpoint: Url },

    /// `GET endpoint?quest=<target>` returning the raw body only
    CodeTabs { endpoint: Url },
}

#[derive(Debug, Deserialize)]
struct FirstPartyEnvelope {
    status: Option<u16>,
    #[serde(rename = "statusText")]
    status_text: Option<String>,
    contents: Option<String>,
    headers: Option<HashMap<String, serde_json::Value>>,
    error: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AllOriginsEnvelope {
    contents: Option<String>,
    status: Option<AllOriginsStatus>,
}

#[derive(Debug, Deserialize)]
struct AllOriginsStatus {
    http_code: Option<u16>,
}

impl Backend {
    /// Builds the ordered backend list described by the configuration
    ///
    /// Order: direct (if enabled), first-party relay (if configured), then the
    /// public relays in config order.
    pub fn chain_from_config(config: &Config) -> Result<Vec<Backend>, ConfigError> {
        let retrieval = &config.retrieval;
        let mut chain = Vec::new();

        if retrieval.direct {
            chain.push(Backend::Direct);
        }

        if let Some(relay) = &retrieval.first_party_relay {
            chain.push(Backend::FirstPartyRelay {
                endpoint: parse_endpoint(relay)?,
            });
        }

        for entry in &retrieval.relays {
            let endpoint = parse_endpoint(&entry.endpoint)?;
            chain.push(match entry.kind {
                RelayKind::AllOrigins => Backend::AllOrigins { endpoint },
                RelayKind::CorsProxy => Backend::CorsProxy { endpoint },
                RelayKind::CodeTabs => Backend::CodeTabs { endpoint },
            });
        }

        Ok(chain)
    }

    /// Short name used in logs and in `RetrievalFailed`
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Direct => "direct",
            Backend::FirstPartyRelay { .. } => "first-party-relay",
            Backend::AllOrigins { .. } => "all-origins",
            Backend::CorsProxy { .. } => "cors-proxy",
            Backend::CodeTabs { .. } => "code-tabs",
        }
    }

    /// The URL this backend requests to fetch `target`
    pub fn request_url(&self, target: &Url) -> Url {
        let (endpoint, param) = match self {
            Backend::Direct => return target.clone(),
            Backend::FirstPartyRelay { endpoint }
            | Backend::AllOrigins { endpoint }
            | Backend::CorsProxy { endpoint } => (endpoint, "url"),
            Backend::CodeTabs { endpoint } => (endpoint, "quest"),
        };

        let mut url = endpoint.clone();
        url.query_pairs_mut().append_pair(param, target.as_str());
        url
    }

    /// Normalizes a raw response into the uniform page shape
    ///
    /// Any non-2xx from the backend itself is an attempt failure. Envelope
    /// backends report the target's own status code as carried in the body.
    pub fn normalize(&self, raw: RawResponse) -> Result<PageResponse, AttemptError> {
        if !(200..300).contains(&raw.status) {
            return Err(AttemptError::Status(raw.status));
        }

        match self {
            Backend::Direct | Backend::CorsProxy { .. } => Ok(PageResponse {
                status_code: raw.status,
                headers: raw.headers,
                body: raw.body,
                served_by: self.name().to_string(),
            }),

            Backend::CodeTabs { .. } => Ok(PageResponse {
                status_code: raw.status,
                headers: HashMap::new(),
                body: raw.body,
                served_by: self.name().to_string(),
            }),

            Backend::FirstPartyRelay { .. } => {
                let envelope: FirstPartyEnvelope = serde_json::from_str(&raw.body)
                    .map_err(|e| AttemptError::Envelope(e.to_string()))?;

                if let Some(error) = envelope.error {
                    let detail = match envelope.message {
                        Some(message) => format!("{}: {}", error, message),
                        None => error,
                    };
                    return Err(AttemptError::Relay(detail));
                }

                let body = envelope
                    .contents
                    .ok_or_else(|| AttemptError::Envelope("missing contents".to_string()))?;

                let status_code = envelope.status.unwrap_or(200);
                tracing::trace!(
                    "First-party relay status {} {}",
                    status_code,
                    envelope.status_text.as_deref().unwrap_or("")
                );

                let headers = envelope
                    .headers
                    .unwrap_or_default()
                    .into_iter()
                    .map(|(name, value)| {
                        let value = match value {
                            serde_json::Value::String(s) => s,
                            other => other.to_string(),
                        };
                        (name.to_lowercase(), value)
                    })
                    .collect();

                Ok(PageResponse {
                    status_code,
                    headers,
                    body,
                    served_by: self.name().to_string(),
                })
            }

            Backend::AllOrigins { .. } => {
                let envelope: AllOriginsEnvelope = serde_json::from_str(&raw.body)
                    .map_err(|e| AttemptError::Envelope(e.to_string()))?;

                let body = envelope
                    .contents
                    .ok_or_else(|| AttemptError::Envelope("missing contents".to_string()))?;

                let status_code = envelope
                    .status
                    .and_then(|s| s.http_code)
                    .unwrap_or(200);

                Ok(PageResponse {
                    status_code,
                    headers: HashMap::new(),
                    body,
                    served_by: self.name().to_string(),
                })
            }
        }
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, ConfigError> {
    Url::parse(endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid relay endpoint '{}': {}", endpoint, e)))
}
