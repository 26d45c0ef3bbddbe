//! Page fetcher implementation
//!
//! This module handles everything between a URL and its markup:
//! - The fetcher trait the harvester talks to
//! - An HTTP fetcher built on reqwest
//! - A readiness poll that replaces a fixed settle delay
//! - The session guard that guarantees the fetcher is closed exactly once

use crate::config::FetcherConfig;
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Errors a fetcher can report for a single URL, or while launching
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Empty page returned for {url}")]
    EmptyPage { url: String },

    #[error("Fetcher is closed")]
    Closed,

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Turns a URL into rendered page markup
///
/// Implementations are shared by all harvest workers. `close` releases the
/// underlying resource (a browser process, a connection pool) and is called
/// exactly once per run by [`FetcherSession`].
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;

    fn close(&self);
}

/// Launches a fetcher for one harvest run
pub trait FetcherFactory: Send + Sync {
    fn launch(&self) -> Result<Arc<dyn PageFetcher>, FetchError>;
}

/// Scoped ownership of a launched fetcher
///
/// `release` closes the fetcher; later calls and the `Drop` impl are no-ops
/// once it has run, so every exit path closes it exactly once.
pub struct FetcherSession {
    fetcher: Arc<dyn PageFetcher>,
    released: AtomicBool,
}

impl FetcherSession {
    /// Launches a fetcher from the factory
    pub fn acquire(factory: &dyn FetcherFactory) -> Result<Self, FetchError> {
        let fetcher = factory.launch()?;
        tracing::debug!("Page fetcher launched");
        Ok(Self {
            fetcher,
            released: AtomicBool::new(false),
        })
    }

    pub fn fetcher(&self) -> Arc<dyn PageFetcher> {
        Arc::clone(&self.fetcher)
    }

    /// Closes the fetcher if it has not been closed yet
    pub fn release(&self) {
        if !self.released.swap(true, Ordering::SeqCst) {
            self.fetcher.close();
            tracing::debug!("Page fetcher released");
        }
    }
}

impl Drop for FetcherSession {
    fn drop(&mut self) {
        self.release();
    }
}

/// Condition a page must meet before its markup is handed back
#[derive(Debug, Clone)]
struct Readiness {
    selector: String,
    timeout: Duration,
    poll_interval: Duration,
}

impl Readiness {
    fn from_config(config: &FetcherConfig) -> Option<Self> {
        let selector = config
            .ready_selector
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())?;

        Some(Self {
            selector: selector.to_string(),
            timeout: Duration::from_millis(config.settle_timeout),
            poll_interval: Duration::from_millis(config.poll_interval),
        })
    }

    fn is_ready(&self, markup: &str) -> bool {
        let Ok(selector) = Selector::parse(&self.selector) else {
            return true;
        };
        Html::parse_document(markup).select(&selector).next().is_some()
    }
}

/// Fetches pages over plain HTTP
///
/// Without a ready selector every page is requested exactly once. When one is
/// configured, a page that does not match it yet is requested again every poll
/// interval until it does or the settle timeout runs out; the last markup
/// received is returned either way, and a failed re-request keeps it.
pub struct HttpFetcher {
    client: Client,
    readiness: Option<Readiness>,
    closed: AtomicBool,
}

impl HttpFetcher {
    /// Builds an HTTP fetcher from the fetcher configuration
    ///
    /// # Example
    ///
    /// ```no_run
    /// use doc_harvester::config::FetcherConfig;
    /// use doc_harvester::crawler::HttpFetcher;
    ///
    /// let fetcher = HttpFetcher::new(&FetcherConfig::default()).unwrap();
    /// ```
    pub fn new(config: &FetcherConfig) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_http_client(config).map_err(FetchError::Client)?,
            readiness: Readiness::from_config(config),
            closed: AtomicBool::new(false),
        })
    }

    async fn get(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await.map_err(|e| classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| classify(url, e))?;
        if body.trim().is_empty() {
            return Err(FetchError::EmptyPage {
                url: url.to_string(),
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(FetchError::Closed);
        }

        let mut markup = self.get(url).await?;

        let Some(readiness) = &self.readiness else {
            return Ok(markup);
        };

        let deadline = Instant::now() + readiness.timeout;
        while !readiness.is_ready(&markup) {
            if Instant::now() + readiness.poll_interval > deadline {
                tracing::debug!(
                    "{} did not match '{}' within {:?}",
                    url,
                    readiness.selector,
                    readiness.timeout
                );
                break;
            }
            tokio::time::sleep(readiness.poll_interval).await;
            match self.get(url).await {
                Ok(next) => markup = next,
                Err(e) => {
                    tracing::debug!("Readiness poll of {} failed, keeping last markup: {}", url, e);
                    break;
                }
            }
        }

        Ok(markup)
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// Launches [`HttpFetcher`]s from a fetcher configuration
#[derive(Debug, Clone)]
pub struct HttpFetcherFactory {
    config: FetcherConfig,
}

impl HttpFetcherFactory {
    pub fn new(config: FetcherConfig) -> Self {
        Self { config }
    }
}

impl FetcherFactory for HttpFetcherFactory {
    fn launch(&self) -> Result<Arc<dyn PageFetcher>, FetchError> {
        let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::new(&self.config)?);
        Ok(fetcher)
    }
}

/// Builds an HTTP client with the configured user agent and timeouts
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_millis(config.request_timeout);

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

fn classify(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
