//! Shelfsweep main entry point
//!
//! Command-line interface for the shelfsweep catalog scraper.

use clap::Parser;
use shelfsweep::config::load_config;
use shelfsweep::output::print_summary;
use shelfsweep::scraper::run_scrape;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Shelfsweep: a catalog scraper for paginated book listings
///
/// Shelfsweep walks a paginated HTML catalog, enriches every item from its
/// detail page, and writes the result to a fixed-schema CSV file.
#[derive(Parser, Debug)]
#[command(name = "shelfsweep")]
#[command(version)]
#[command(about = "A catalog scraper for paginated book listings", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be scraped without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_scrape(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shelfsweep=info,warn"),
            1 => EnvFilter::new("shelfsweep=debug,info"),
            2 => EnvFilter::new("shelfsweep=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be scraped
fn handle_dry_run(config: &shelfsweep::config::Config) {
    println!("=== Shelfsweep Dry Run ===\n");

    println!("Scraper Configuration:");
    println!("  Target URL: {}", config.scraper.target_url);
    println!(
        "  Max concurrent requests: {}",
        config.scraper.max_concurrent_requests
    );
    println!(
        "  Request timeout: {}s",
        config.scraper.request_timeout_secs
    );
    println!("  Max retry attempts: {}", config.scraper.max_retry_attempts);
    println!("  User agent: {}", config.scraper.user_agent);

    println!("\nOutput:");
    println!("  CSV file: {}", config.output.csv_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main scrape operation
async fn handle_scrape(config: shelfsweep::config::Config) -> anyhow::Result<()> {
    tracing::info!("Starting scrape of {}", config.scraper.target_url);

    let start_time = Instant::now();

    match run_scrape(config).await {
        Ok(summary) => {
            print_summary(&summary);
            println!("\nTotal run time: {:.2}s", start_time.elapsed().as_secs_f64());
            Ok(())
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            Err(e.into())
        }
    }
}
