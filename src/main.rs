//! Doc-Harvester main entry point
//!
//! This is the command-line interface for the Doc-Harvester documentation crawler.

use anyhow::{bail, Context};
use clap::Parser;
use doc_harvester::config::{load_config_with_hash, validate, Config};
use doc_harvester::output::print_report;
use doc_harvester::Harvester;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Doc-Harvester: a documentation site harvester
///
/// Doc-Harvester crawls a documentation site from a base URL, stays on that
/// site, and writes every page with recognizable content as a JSON metadata
/// file plus an HTML content file.
#[derive(Parser, Debug)]
#[command(name = "doc-harvester")]
#[command(version = "1.0.0")]
#[command(about = "A documentation site harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Base URL of the documentation site (overrides the config file)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// URL to start from, if different from the base URL
    #[arg(long, value_name = "URL")]
    start_url: Option<String>,

    /// Directory the section files are written to
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<String>,

    /// Number of concurrent fetch workers
    #[arg(short, long)]
    workers: Option<u32>,

    /// Site-specific parser to use (e.g. "w3schools")
    #[arg(long)]
    site: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be harvested without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;
    validate(&config).context("Invalid configuration")?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_harvest(config, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("doc_harvester=info,warn"),
            1 => EnvFilter::new("doc_harvester=debug,info"),
            2 => EnvFilter::new("doc_harvester=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file if one was given, then applies command-line overrides
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => match &cli.base_url {
            Some(base_url) => Config::new(base_url.as_str(), "output"),
            None => bail!("Either a config file or --base-url is required"),
        },
    };

    if let Some(base_url) = &cli.base_url {
        config.harvester.base_url = base_url.clone();
    }
    if let Some(start_url) = &cli.start_url {
        config.harvester.start_url = Some(start_url.clone());
    }
    if let Some(output_dir) = &cli.output_dir {
        config.output.directory = output_dir.clone();
    }
    if let Some(workers) = cli.workers {
        config.harvester.workers = workers;
    }
    if let Some(site) = &cli.site {
        config.parser.site = site.clone();
    }

    Ok(config)
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Doc-Harvester Dry Run ===\n");

    println!("Harvester:");
    println!("  Base URL: {}", config.harvester.base_url);
    println!(
        "  Start URL: {}",
        config
            .harvester
            .start_url
            .as_deref()
            .unwrap_or(&config.harvester.base_url)
    );
    println!("  Workers: {}", config.harvester.workers);
    match config.harvester.max_depth {
        Some(depth) => println!("  Max depth: {}", depth),
        None => println!("  Max depth: unbounded"),
    }
    match config.harvester.max_pages {
        Some(pages) => println!("  Max pages: {}", pages),
        None => println!("  Max pages: unbounded"),
    }
    println!("  Skip patterns: {}", config.harvester.skip_patterns.join(", "));

    println!("\nFetcher:");
    println!("  User agent: {}", config.fetcher.user_agent);
    println!("  Request timeout: {}ms", config.fetcher.request_timeout);
    match config.fetcher.ready_selector.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(selector) => println!(
            "  Ready selector: {} (settle {}ms, poll {}ms)",
            selector, config.fetcher.settle_timeout, config.fetcher.poll_interval
        ),
        None => println!("  Ready selector: none"),
    }

    println!("\nParser: {}", config.parser.site);
    println!("Output: {}", config.output.directory);

    println!("\n✓ Configuration is valid");
}

/// Handles the main harvest operation
async fn handle_harvest(config: Config, quiet: bool) -> anyhow::Result<()> {
    let harvester = Harvester::new(config)?;

    let token = harvester.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing pages in progress");
            token.cancel();
        }
    });

    match harvester.harvest(None).await {
        Ok(report) => {
            if !quiet {
                print_report(&report);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}
