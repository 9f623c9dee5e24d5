//! Sitelens main entry point
//!
//! This is the command-line interface for the Sitelens SEO auditor.

use anyhow::Context;
use clap::Parser;
use sitelens::config::{load_config_with_hash, Config};
use sitelens::output::{
    print_page_report, print_sitewide_report, write_json, write_markdown_report,
};
use sitelens::retrieval::Backend;
use sitelens::AuditSession;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Sitelens: an on-page SEO auditor
///
/// Sitelens analyzes a single page, or crawls a site and aggregates the
/// findings of every discovered page into a sitewide report.
#[derive(Parser, Debug)]
#[command(name = "sitelens")]
#[command(version)]
#[command(about = "An on-page and sitewide SEO auditor", long_about = None)]
struct Cli {
    /// URL of the page (or site, with --sitewide) to audit
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Focus keyword to look for in title and headings
    #[arg(short, long)]
    keyword: Option<String>,

    /// Crawl the site and audit every discovered page
    #[arg(long)]
    sitewide: bool,

    /// Maximum number of pages to audit (overrides config)
    #[arg(long, value_name = "N", requires = "sitewide")]
    max_pages: Option<usize>,

    /// Treat subdomains of the site as internal (overrides config)
    #[arg(long, requires = "sitewide")]
    include_subdomains: bool,

    /// Write the result as JSON to this file
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Write a markdown report of a sitewide run to this file
    #[arg(long, value_name = "FILE", requires = "sitewide")]
    markdown: Option<PathBuf>,

    /// Validate config and show the retrieval chain without fetching anything
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if cli.dry_run {
        return handle_dry_run(&cli, &config);
    }

    let session = Arc::new(AuditSession::from_config(&config)?);

    if cli.sitewide {
        handle_sitewide(&cli, &config, session).await
    } else {
        handle_page(&cli, &session).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitelens=info,warn"),
            1 => EnvFilter::new("sitelens=debug,info"),
            2 => EnvFilter::new("sitelens=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows the retrieval chain
fn handle_dry_run(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    println!("=== Sitelens Dry Run ===\n");

    println!("Target: {}", cli.url);
    println!(
        "Mode: {}",
        if cli.sitewide { "sitewide" } else { "single page" }
    );

    println!("\nRetrieval:");
    println!("  Timeout per attempt: {}s", config.retrieval.timeout_secs);
    println!("  Backends:");
    for backend in Backend::chain_from_config(config)? {
        println!("    - {}", backend.name());
    }

    println!("\nCrawler:");
    println!(
        "  Max pages: {}",
        cli.max_pages.unwrap_or(config.crawler.max_pages)
    );
    println!(
        "  Include subdomains: {}",
        cli.include_subdomains || config.crawler.include_subdomains
    );

    println!("\nCache:");
    println!("  TTL: {}s", config.cache.ttl_secs);
    println!("  Sweep probability: {}", config.cache.sweep_probability);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles a single page analysis
async fn handle_page(cli: &Cli, session: &AuditSession) -> anyhow::Result<()> {
    let report = session
        .analyze_page(&cli.url, cli.keyword.as_deref())
        .await
        .with_context(|| format!("failed to analyze {}", cli.url))?;

    print_page_report(&report);

    if let Some(path) = &cli.json {
        write_json(&report, path)?;
        println!("✓ JSON written to: {}", path.display());
    }

    Ok(())
}

/// Handles a sitewide run; Ctrl-C stops it after the current page
async fn handle_sitewide(
    cli: &Cli,
    config: &Config,
    session: Arc<AuditSession>,
) -> anyhow::Result<()> {
    let max_pages = cli.max_pages.unwrap_or(config.crawler.max_pages);
    let include_subdomains = cli.include_subdomains || config.crawler.include_subdomains;

    let stopper = Arc::clone(&session);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received interrupt, finishing current page");
            stopper.request_stop();
        }
    });

    tracing::info!(
        "Starting sitewide run on {} (max {} pages)",
        cli.url,
        max_pages
    );

    let result = session
        .run_sitewide(
            &cli.url,
            cli.keyword.as_deref(),
            max_pages,
            include_subdomains,
        )
        .await
        .with_context(|| format!("sitewide run on {} failed", cli.url))?;

    print_sitewide_report(&result);

    if let Some(path) = &cli.json {
        write_json(&result, path)?;
        println!("\n✓ JSON written to: {}", path.display());
    }

    if let Some(path) = &cli.markdown {
        write_markdown_report(&result, &cli.url, path)?;
        println!("✓ Markdown report written to: {}", path.display());
    }

    Ok(())
}
