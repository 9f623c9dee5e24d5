use crate::config::types::{CacheConfig, Config, CrawlerConfig, RetrievalConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_user_agent_config(&config.user_agent)?;
    validate_retrieval_config(&config.retrieval)?;
    validate_crawler_config(&config.crawler)?;
    validate_cache_config(&config.cache)?;
    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates retrieval configuration
fn validate_retrieval_config(config: &RetrievalConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > 120 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be between 1 and 120, got {}",
            config.timeout_secs
        )));
    }

    if let Some(relay) = &config.first_party_relay {
        validate_endpoint(relay, "first_party_relay")?;
    }

    for entry in &config.relays {
        validate_endpoint(&entry.endpoint, "relay endpoint")?;
    }

    if !config.direct && config.first_party_relay.is_none() && config.relays.is_empty() {
        return Err(ConfigError::Validation(
            "at least one retrieval backend must be enabled".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 || config.max_pages > 500 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be between 1 and 500, got {}",
            config.max_pages
        )));
    }

    Ok(())
}

/// Validates cache configuration
fn validate_cache_config(config: &CacheConfig) -> Result<(), ConfigError> {
    if config.ttl_secs < 1 || config.ttl_secs > 86_400 {
        return Err(ConfigError::Validation(format!(
            "ttl_secs must be between 1 and 86400, got {}",
            config.ttl_secs
        )));
    }

    if !(0.0..=1.0).contains(&config.sweep_probability) {
        return Err(ConfigError::Validation(format!(
            "sweep_probability must be between 0 and 1, got {}",
            config.sweep_probability
        )));
    }

    Ok(())
}

/// Validates that a relay endpoint is an absolute http(s) URL
fn validate_endpoint(endpoint: &str, field: &str) -> Result<(), ConfigError> {
    let url = Url::parse(endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, endpoint, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "{} '{}' must use http or https",
            field, endpoint
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
