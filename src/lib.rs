//! Shelfsweep: a catalog scraper for paginated book listings
//!
//! This crate implements the scraping pipeline for books.toscrape.com-shaped
//! catalogs: discover the page count, fetch every listing page concurrently,
//! pull the item blocks out of each page, enrich every item from its detail
//! page, and persist the result as a fixed-schema CSV file.

pub mod config;
pub mod output;
pub mod scraper;

use thiserror::Error;

/// Main error type for shelfsweep operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The catalog root page could not be fetched; nothing can be scraped.
    #[error("Listing root unreachable: {url}: {cause}")]
    PageUnreachable { url: String, cause: String },

    /// The root page fetched fine but the `li.current` page-count marker
    /// is not there. The site layout has changed under us.
    #[error("Pagination marker not found on {url}")]
    PaginatorMissing { url: String },

    /// A detail page failed after the fetch layer exhausted its retries.
    /// Fatal for the whole run: no partial CSV is written.
    #[error("Detail page unreachable: {url}: {cause}")]
    DetailPageUnreachable { url: String, cause: String },

    /// A field extractor could not locate or convert expected content.
    #[error("Failed to parse {what} from {url}")]
    Parsing { url: String, what: &'static str },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
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
}

/// Result type alias for shelfsweep operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use output::RunSummary;
// self:: disambiguates the module from the scraper crate
pub use self::scraper::{BookRecord, Coordinator};
