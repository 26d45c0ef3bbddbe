use crate::config::types::{Config, FetcherConfig, HarvesterConfig, OutputConfig, ParserConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Upper bound on concurrent fetch workers
const MAX_WORKERS: u32 = 64;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_harvester_config(&config.harvester)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_output_config(&config.output)?;
    validate_parser_config(&config.parser)?;
    Ok(())
}

/// Validates crawl behavior configuration
fn validate_harvester_config(config: &HarvesterConfig) -> Result<(), ConfigError> {
    validate_http_url("base-url", &config.base_url)?;

    if let Some(start_url) = &config.start_url {
        validate_http_url("start-url", start_url)?;
    }

    if config.workers < 1 || config.workers > MAX_WORKERS {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and {}, got {}",
            MAX_WORKERS, config.workers
        )));
    }

    if config.max_pages == Some(0) {
        return Err(ConfigError::Validation(
            "max-pages must be >= 1 when set".to_string(),
        ));
    }

    if config.skip_patterns.iter().any(|p| p.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "skip-patterns cannot contain empty entries".to_string(),
        ));
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.request_timeout < 100 {
        return Err(ConfigError::Validation(format!(
            "request-timeout must be >= 100ms, got {}ms",
            config.request_timeout
        )));
    }

    if config.poll_interval == 0 {
        return Err(ConfigError::Validation(
            "poll-interval must be >= 1ms".to_string(),
        ));
    }

    // An empty selector disables readiness polling
    if let Some(selector) = config.ready_selector.as_deref().filter(|s| !s.trim().is_empty()) {
        Selector::parse(selector).map_err(|e| {
            ConfigError::InvalidSelector(format!("ready-selector '{}': {}", selector, e))
        })?;
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates parser selection
fn validate_parser_config(config: &ParserConfig) -> Result<(), ConfigError> {
    if config.site.trim().is_empty() {
        return Err(ConfigError::Validation(
            "parser site cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates that a URL parses, uses HTTP(S) and has a host
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            field, value
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' has no host",
            field, value
        )));
    }

    Ok(())
}
