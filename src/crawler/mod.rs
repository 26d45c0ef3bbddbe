//! Crawler module for harvesting a documentation site
//!
//! This module contains the core crawling logic, including:
//! - Page fetching behind the [`PageFetcher`] trait
//! - The shared frontier with at-most-once URL claiming
//! - Section extraction through the configured parser
//! - Overall harvest coordination with a worker pool

mod extractor;
mod fetcher;
mod frontier;
mod harvester;

pub use extractor::{extract_section, SectionExtractor};
pub use fetcher::{
    build_http_client, FetchError, FetcherFactory, FetcherSession, HttpFetcher, HttpFetcherFactory,
    PageFetcher,
};
pub use frontier::{Frontier, FrontierEntry};
pub use harvester::Harvester;

use crate::config::Config;
use crate::output::HarvestReport;

/// Runs a complete harvest with the default parser, sink and fetcher
///
/// This is the main entry point for a harvest. It will:
/// 1. Validate the configuration
/// 2. Launch the HTTP fetcher
/// 3. Crawl from the start URL within the base URL's scope
/// 4. Write every extracted section to the output directory
///
/// # Arguments
///
/// * `config` - The harvester configuration
///
/// # Returns
///
/// * `Ok(HarvestReport)` - Harvest finished (possibly with per-URL failures)
/// * `Err(HarvestError)` - Invalid configuration or the fetcher could not be launched
pub async fn harvest(config: Config) -> crate::Result<HarvestReport> {
    Harvester::new(config)?.harvest(None).await
}
