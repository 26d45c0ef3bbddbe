//! Harvester - main crawl orchestration logic
//!
//! This module contains the crawl engine that coordinates:
//! - Launching and releasing the page fetcher
//! - Seeding the shared frontier
//! - Running a pool of workers that fetch, extract, persist and discover links
//! - Cancellation and the final run report

use crate::config::{self, Config};
use crate::crawler::extractor::SectionExtractor;
use crate::crawler::fetcher::{FetcherFactory, FetcherSession, HttpFetcherFactory, PageFetcher};
use crate::crawler::frontier::{Frontier, FrontierEntry};
use crate::markup::extract_links;
use crate::output::{FileSectionWriter, HarvestCounters, HarvestReport, SectionSink};
use crate::parser::{DocumentationParser, ParserRegistry};
use crate::state::UrlState;
use crate::url::{resolve_link, Scope};
use crate::{HarvestError, Result};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Crawl engine for one documentation site
///
/// The parser, sink and fetcher factory default to the ones named by the
/// configuration and can be swapped with the `with_*` methods.
pub struct Harvester {
    config: Arc<Config>,
    scope: Scope,
    extractor: SectionExtractor,
    sink: Arc<dyn SectionSink>,
    fetchers: Arc<dyn FetcherFactory>,
    cancel: CancellationToken,
}

impl Harvester {
    /// Creates a new harvester
    ///
    /// # Arguments
    ///
    /// * `config` - The harvester configuration; it is validated here
    ///
    /// # Returns
    ///
    /// * `Ok(Harvester)` - Ready to run
    /// * `Err(HarvestError)` - Invalid configuration or base URL
    pub fn new(config: Config) -> Result<Self> {
        config::validate(&config)?;

        let scope = Scope::new(&config.harvester.base_url, &config.harvester.skip_patterns)?;
        let parser = ParserRegistry::with_defaults().resolve(&config.parser.site);
        let sink: Arc<dyn SectionSink> = Arc::new(FileSectionWriter::new(&config.output.directory));
        let fetchers: Arc<dyn FetcherFactory> = Arc::new(HttpFetcherFactory::new(config.fetcher.clone()));

        Ok(Self {
            config: Arc::new(config),
            scope,
            extractor: SectionExtractor::new(parser),
            sink,
            fetchers,
            cancel: CancellationToken::new(),
        })
    }

    pub fn with_parser(mut self, parser: Arc<dyn DocumentationParser>) -> Self {
        self.extractor = SectionExtractor::new(parser);
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn SectionSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_fetcher_factory(mut self, fetchers: Arc<dyn FetcherFactory>) -> Self {
        self.fetchers = fetchers;
        self
    }

    /// Uses an externally owned cancellation token
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token that stops the run when cancelled
    ///
    /// Pages already being processed are finished; no new ones are claimed.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs a harvest
    ///
    /// Starts from `start_url`, falling back to the configured start URL and
    /// then the base URL. A start URL outside the scope is not fetched and
    /// yields an empty report. Per-URL failures never abort the run; only a
    /// fetcher that cannot be launched or a crashed worker does.
    pub async fn harvest(&self, start_url: Option<&str>) -> Result<HarvestReport> {
        let started = Instant::now();
        let start = start_url
            .or(self.config.harvester.start_url.as_deref())
            .unwrap_or(&self.config.harvester.base_url)
            .to_string();

        let session =
            FetcherSession::acquire(self.fetchers.as_ref()).map_err(HarvestError::FetcherLaunch)?;

        let counters = Arc::new(HarvestCounters::new());
        let run_token = self.cancel.child_token();
        let frontier = Arc::new(Frontier::new(
            self.scope.clone(),
            self.config.harvester.max_depth,
            self.config.harvester.max_pages.map(u64::from),
            run_token.clone(),
        ));

        let start = match frontier.seed(&start) {
            Some(seeded) => seeded,
            None => {
                tracing::warn!("Start URL {} is outside {}, nothing to harvest", start, self.scope.base_url());
                start
            }
        };

        let worker_count = self.config.harvester.workers.max(1);
        tracing::info!(
            "Starting harvest of {} with {} workers using the '{}' parser",
            start,
            worker_count,
            self.extractor.parser_name()
        );

        let mut workers = JoinSet::new();
        for id in 0..worker_count {
            let worker = Worker {
                id,
                frontier: Arc::clone(&frontier),
                fetcher: session.fetcher(),
                extractor: self.extractor.clone(),
                sink: Arc::clone(&self.sink),
                counters: Arc::clone(&counters),
            };
            workers.spawn(worker.run());
        }

        let mut outcome = Ok(());
        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Harvest worker failed: {}", e);
                run_token.cancel();
                if outcome.is_ok() {
                    outcome = Err(HarvestError::Worker(e));
                }
            }
        }

        session.release();
        outcome?;

        if self.cancel.is_cancelled() {
            tracing::warn!("Harvest cancelled with {} URLs still pending", frontier.pending_len());
            counters.mark_cancelled();
        }

        let report = counters.snapshot(started.elapsed());
        tracing::info!(
            "Harvest complete: {} visited, {} saved, {} skipped, {} failed in {:.2?}",
            report.visited,
            report.saved,
            report.skipped,
            report.failed,
            report.elapsed
        );

        Ok(report)
    }
}

/// One harvest worker; pulls URLs from the shared frontier until it is exhausted
struct Worker {
    id: u32,
    frontier: Arc<Frontier>,
    fetcher: Arc<dyn PageFetcher>,
    extractor: SectionExtractor,
    sink: Arc<dyn SectionSink>,
    counters: Arc<HarvestCounters>,
}

impl Worker {
    async fn run(self) {
        while let Some(entry) = self.frontier.next().await {
            let links = self.process(&entry).await;
            self.frontier.complete(&entry, links);
        }
        tracing::debug!("Worker {} finished", self.id);
    }

    /// Visits one URL and returns the absolute links found on it
    async fn process(&self, entry: &FrontierEntry) -> Vec<String> {
        tracing::info!("Processing: {}", entry.url);
        self.counters.record(UrlState::Visiting);

        let markup = match self.fetcher.fetch(&entry.url).await {
            Ok(markup) => markup,
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", entry.url, e);
                self.finish(&entry.url, UrlState::Failed);
                return Vec::new();
            }
        };

        if markup.trim().is_empty() {
            tracing::warn!("Empty page returned for {}", entry.url);
            self.finish(&entry.url, UrlState::Failed);
            return Vec::new();
        }

        let state = self.harvest_page(&markup, &entry.url);
        self.finish(&entry.url, state);

        discover_links(&markup, &entry.url)
    }

    /// Moves a URL out of `Visiting` into its terminal state
    fn finish(&self, url: &str, state: UrlState) {
        debug_assert!(
            UrlState::Visiting.can_transition_to(state),
            "illegal transition for {}: visiting -> {}",
            url,
            state
        );
        tracing::debug!("{} -> {}", url, state);
        self.counters.record(state);
    }

    fn harvest_page(&self, markup: &str, url: &str) -> UrlState {
        let Some(section) = self.extractor.extract_section(markup, url) else {
            tracing::debug!("No documentation content at {}", url);
            return UrlState::Skipped;
        };

        match self.sink.save(&section) {
            Ok(saved) => {
                tracing::debug!("Saved '{}' to {}", section.title, saved.json_path.display());
                UrlState::Saved
            }
            Err(e) => {
                tracing::warn!("Failed to save section '{}' from {}: {}", section.title, url, e);
                self.counters.record_persist_failure();
                UrlState::Failed
            }
        }
    }
}

/// Extracts the page's links and resolves them against the page URL
fn discover_links(markup: &str, page_url: &str) -> Vec<String> {
    let Ok(base) = Url::parse(page_url) else {
        return Vec::new();
    };

    extract_links(markup)
        .iter()
        .filter_map(|href| resolve_link(href, &base))
        .collect()
}
