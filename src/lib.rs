//! Doc-Harvester: a documentation site harvester
//!
//! This crate crawls a documentation website from a base URL, extracts
//! structured sections (title, content, code examples, category) from each page,
//! and writes them out as paired JSON/HTML artifacts.

pub mod config;
pub mod crawler;
pub mod markup;
pub mod output;
pub mod parser;
pub mod section;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Doc-Harvester operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to launch page fetcher: {0}")]
    FetcherLaunch(#[source] crawler::FetchError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("Worker task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector in config: {0}")]
    InvalidSelector(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Doc-Harvester operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::Harvester;
pub use output::HarvestReport;
pub use parser::{DocumentationParser, ParserRegistry};
pub use section::DocumentationSection;
pub use state::UrlState;
pub use url::Scope;
