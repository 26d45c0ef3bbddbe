use serde::Deserialize;

/// Default skip patterns; URLs containing any of these are never fetched
pub const DEFAULT_SKIP_PATTERNS: &[&str] = &["search", "login"];

/// Main configuration structure for Doc-Harvester
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub harvester: HarvesterConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub parser: ParserConfig,
}

impl Config {
    /// Builds a configuration with defaults for everything but the two entry settings
    pub fn new(base_url: impl Into<String>, output_directory: impl Into<String>) -> Self {
        Self {
            harvester: HarvesterConfig::new(base_url),
            fetcher: FetcherConfig::default(),
            output: OutputConfig {
                directory: output_directory.into(),
            },
            parser: ParserConfig::default(),
        }
    }
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HarvesterConfig {
    /// The scope anchor; links are followed only within its host
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Where the crawl starts (defaults to the base URL)
    #[serde(rename = "start-url", default)]
    pub start_url: Option<String>,

    /// Number of concurrent fetch workers
    #[serde(default = "default_workers")]
    pub workers: u32,

    /// Maximum link depth from the start URL (unbounded when absent)
    #[serde(rename = "max-depth", default)]
    pub max_depth: Option<u32>,

    /// Maximum number of pages to visit (unbounded when absent)
    #[serde(rename = "max-pages", default)]
    pub max_pages: Option<u32>,

    /// Case-insensitive URL substrings that are never fetched
    #[serde(rename = "skip-patterns", default = "default_skip_patterns")]
    pub skip_patterns: Vec<String>,
}

impl HarvesterConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            start_url: None,
            workers: default_workers(),
            max_depth: None,
            max_pages: None,
            skip_patterns: default_skip_patterns(),
        }
    }
}

/// Page fetcher configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout (milliseconds)
    #[serde(rename = "request-timeout", default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Upper bound on waiting for a page to become ready (milliseconds)
    #[serde(rename = "settle-timeout", default = "default_settle_timeout")]
    pub settle_timeout: u64,

    /// Delay between readiness polls (milliseconds)
    #[serde(rename = "poll-interval", default = "default_poll_interval")]
    pub poll_interval: u64,

    /// CSS selector a page must match to count as ready
    ///
    /// Unset by default: a page is fetched once. When set, a page that does
    /// not match yet is fetched again until it does or `settle-timeout` runs out.
    #[serde(rename = "ready-selector", default)]
    pub ready_selector: Option<String>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            request_timeout: default_request_timeout(),
            settle_timeout: default_settle_timeout(),
            poll_interval: default_poll_interval(),
            ready_selector: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the JSON/HTML section pairs are written to
    #[serde(default = "default_output_directory")]
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}

/// Parser selection
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    /// Site identifier looked up in the parser registry
    #[serde(default = "default_site")]
    pub site: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            site: default_site(),
        }
    }
}

fn default_workers() -> u32 {
    4
}

fn default_skip_patterns() -> Vec<String> {
    DEFAULT_SKIP_PATTERNS.iter().map(|s| s.to_string()).collect()
}

fn default_user_agent() -> String {
    format!("doc-harvester/{}", env!("CARGO_PKG_VERSION"))
}

fn default_request_timeout() -> u64 {
    30_000
}

fn default_settle_timeout() -> u64 {
    2_000
}

fn default_poll_interval() -> u64 {
    250
}

fn default_output_directory() -> String {
    "output".to_string()
}

fn default_site() -> String {
    crate::parser::DEFAULT_SITE.to_string()
}
