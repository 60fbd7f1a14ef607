//! Scraping pipeline
//!
//! The pipeline runs in fixed phases: pagination discovery, concurrent
//! listing-page fetch, item extraction, concurrent detail enrichment, CSV
//! write. `coordinator` sequences the phases; the other modules are the
//! steps.

mod coordinator;
mod enricher;
mod fetcher;
mod paginator;
mod parser;

pub use coordinator::{run_scrape, Coordinator, RunPhase};
pub use enricher::{detail_url, enrich_items, BookRecord};
pub use fetcher::{build_http_client, FetchError, Fetcher};
pub use paginator::{discover_total_pages, listing_page_urls, total_pages_from_root};
pub use parser::{
    extract_detail_fields, extract_item_blocks, parse_availability, parse_listing_block,
    parse_price, rating_from_word, DetailFields, ItemSummary,
};
