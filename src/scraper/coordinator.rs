//! Scrape run orchestration
//!
//! One `Coordinator::run()` call is one complete scrape: discover the page
//! count, fetch the listing pages, extract the item blocks, enrich them from
//! their detail pages, write the CSV. The run either reaches `Done` with a
//! summary or `Failed` with the first unrecoverable error; there is no
//! whole-pipeline retry. The coordinator is not reentrant: concurrent runs
//! would race on the output file.

use crate::config::Config;
use crate::output::{write_csv, RunSummary};
use crate::scraper::enricher::enrich_items;
use crate::scraper::fetcher::Fetcher;
use crate::scraper::paginator::{discover_total_pages, listing_page_urls};
use crate::scraper::parser::extract_item_blocks;
use crate::ScrapeError;
use futures::future::join_all;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Pause after a run, success or failure, so in-flight connection teardown
/// finishes before the HTTP client drops
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

/// Phases of a scrape run, in execution order.
///
/// `Failed` is reachable only from `DiscoverPages` and `EnrichAndParse`;
/// listing-page fetch failures drop pages instead of failing the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Init,
    DiscoverPages,
    FetchPages,
    ExtractItems,
    EnrichAndParse,
    WriteCsv,
    Done,
    Failed,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunPhase::Init => "init",
            RunPhase::DiscoverPages => "discover-pages",
            RunPhase::FetchPages => "fetch-pages",
            RunPhase::ExtractItems => "extract-items",
            RunPhase::EnrichAndParse => "enrich-and-parse",
            RunPhase::WriteCsv => "write-csv",
            RunPhase::Done => "done",
            RunPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Drives one scrape run end to end
pub struct Coordinator {
    config: Config,
    fetcher: Fetcher,
    base_url: Url,
}

impl Coordinator {
    /// Creates a coordinator from a validated configuration
    pub fn new(config: Config) -> Result<Self, ScrapeError> {
        let base_url = config.scraper.base_url()?;
        let fetcher = Fetcher::new(&config.scraper)?;

        Ok(Self {
            config,
            fetcher,
            base_url,
        })
    }

    /// Runs the whole pipeline once, then observes the shutdown grace delay
    /// whether the run succeeded or not.
    pub async fn run(&self) -> Result<RunSummary, ScrapeError> {
        let result = self.run_pipeline().await;

        match &result {
            Ok(summary) => tracing::info!(phase = %RunPhase::Done, records = summary.records_written, "Scrape complete"),
            Err(e) => tracing::error!(phase = %RunPhase::Failed, error = %e, "Scrape failed"),
        }

        tokio::time::sleep(SHUTDOWN_GRACE).await;

        result
    }

    async fn run_pipeline(&self) -> Result<RunSummary, ScrapeError> {
        tracing::debug!(phase = %RunPhase::DiscoverPages, url = %self.base_url, "Discovering page count");
        let total_pages = discover_total_pages(&self.fetcher, &self.base_url).await?;
        tracing::info!("Catalog reports {} listing pages", total_pages);

        tracing::debug!(phase = %RunPhase::FetchPages, "Fetching listing pages");
        let urls = listing_page_urls(&self.base_url, total_pages)?;
        let pages = self.fetch_listing_pages(&urls).await;
        let pages_fetched = pages.len();
        let pages_dropped = urls.len() - pages_fetched;
        if pages_dropped > 0 {
            tracing::warn!(
                "{} of {} listing pages dropped after retries; continuing with the rest",
                pages_dropped,
                urls.len()
            );
        }

        tracing::debug!(phase = %RunPhase::ExtractItems, "Extracting item blocks");
        let mut blocks = Vec::new();
        for (url, body) in &pages {
            for block in extract_item_blocks(body) {
                blocks.push((url.clone(), block));
            }
        }
        tracing::info!(
            "Extracted {} item blocks from {} pages",
            blocks.len(),
            pages_fetched
        );

        tracing::debug!(phase = %RunPhase::EnrichAndParse, "Enriching from detail pages");
        let mut records = enrich_items(&self.fetcher, &self.base_url, &blocks).await?;

        // Ids follow discovery order (page index, then in-page block index),
        // assigned in one pass over the final ordered list. No counter state
        // survives the run.
        for (idx, record) in records.iter_mut().enumerate() {
            record.id = idx as u64 + 1;
        }

        tracing::debug!(phase = %RunPhase::WriteCsv, path = %self.config.output.csv_path, "Writing CSV");
        write_csv(&records, Path::new(&self.config.output.csv_path))?;

        Ok(RunSummary {
            total_pages,
            pages_fetched,
            pages_dropped,
            records_written: records.len(),
        })
    }

    /// Fetches every listing page concurrently through the shared limiter.
    ///
    /// Pages that fail after retries are dropped from the result set and the
    /// run proceeds with whatever succeeded. Result order matches `urls`.
    async fn fetch_listing_pages(&self, urls: &[Url]) -> Vec<(Url, String)> {
        let fetches = urls.iter().map(|url| async move {
            match self.fetcher.fetch_page(url).await {
                Ok(body) => Some((url.clone(), body)),
                Err(e) => {
                    tracing::warn!("Dropping listing page: {}", e);
                    None
                }
            }
        });

        join_all(fetches).await.into_iter().flatten().collect()
    }
}

/// Runs one scrape with the given configuration
pub async fn run_scrape(config: Config) -> Result<RunSummary, ScrapeError> {
    let coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
