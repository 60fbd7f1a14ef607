use crate::ConfigError;
use serde::Deserialize;
use url::Url;

/// Main configuration structure for shelfsweep
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub scraper: ScraperConfig,
    pub output: OutputConfig,
}

/// Scraper behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Root URL of the catalog to scrape
    #[serde(rename = "target-url")]
    pub target_url: String,

    /// Maximum number of concurrent in-flight requests
    #[serde(rename = "max-concurrent-requests", default = "default_max_concurrent")]
    pub max_concurrent_requests: u32,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Maximum attempts per request (first try included)
    #[serde(rename = "max-retry-attempts", default = "default_max_attempts")]
    pub max_retry_attempts: u32,

    /// Base delay for exponential backoff between retries (milliseconds)
    #[serde(rename = "retry-base-delay-ms", default = "default_retry_base_delay")]
    pub retry_base_delay_ms: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the CSV file the run writes (overwritten on every run)
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

fn default_max_concurrent() -> u32 {
    15
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_max_attempts() -> u32 {
    5
}

fn default_retry_base_delay() -> u64 {
    100
}

fn default_user_agent() -> String {
    format!("shelfsweep/{}", env!("CARGO_PKG_VERSION"))
}

impl ScraperConfig {
    /// Returns the target URL parsed and normalized to end with a slash,
    /// so relative catalog paths join under it instead of replacing the
    /// last path segment.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let mut raw = self.target_url.trim_end_matches('/').to_string();
        raw.push('/');
        Url::parse(&raw).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid target-url '{}': {}", self.target_url, e))
        })
    }
}
