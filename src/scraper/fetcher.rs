//! HTTP fetch layer
//!
//! This module handles all HTTP requests for the scraper, including:
//! - Building the shared HTTP client
//! - Bounding in-flight requests with a global counting permit
//! - Retrying transient server errors with capped exponential backoff
//! - Classifying failures so callers get the URL and the underlying cause

use crate::config::ScraperConfig;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Semaphore;
use url::Url;

/// How a fetch ultimately failed, tagged with the URL it was issued for.
///
/// Callers decide what a failure means for the run: the page-set phase drops
/// the page and continues, every other phase aborts.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The final response carried a non-success status
    #[error("{url}: HTTP {status}")]
    Status { url: String, status: u16 },

    /// The request exceeded the per-request timeout
    #[error("{url}: request timed out")]
    Timeout { url: String },

    /// Connection refused, DNS failure, body read error, ...
    #[error("{url}: {error}")]
    Transport { url: String, error: String },
}

impl FetchError {
    /// The URL the failed request was issued for
    pub fn url(&self) -> &str {
        match self {
            FetchError::Status { url, .. }
            | FetchError::Timeout { url }
            | FetchError::Transport { url, .. } => url,
        }
    }
}

/// Retry behavior for transient upstream errors
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts per request, first try included
    pub max_attempts: u32,

    /// Delay before the first retry; doubles on each subsequent one
    pub base_delay: Duration,

    /// Ceiling on the backoff delay
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Backoff delay after the given 1-based attempt number
    fn backoff(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(16);
        let delay = self.base_delay.saturating_mul(2u32.saturating_pow(exp));
        delay.min(self.max_delay)
    }
}

/// Whether a status is worth retrying.
///
/// Only upstream server errors the site is expected to recover from qualify.
/// Client errors and malformed responses fail immediately.
fn is_retryable(status: StatusCode) -> bool {
    matches!(status.as_u16(), 500 | 502 | 503 | 504)
}

/// Builds the HTTP client shared by every fetch in a run
pub fn build_http_client(config: &ScraperConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues GET requests through a shared client and concurrency permit.
///
/// At most `max_concurrent_requests` fetches are in flight at once across
/// the whole run; callers past the limit suspend until a slot frees.
pub struct Fetcher {
    client: Client,
    limiter: Arc<Semaphore>,
    retry: RetryPolicy,
}

impl Fetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self, reqwest::Error> {
        let client = build_http_client(config)?;

        Ok(Self {
            client,
            limiter: Arc::new(Semaphore::new(config.max_concurrent_requests as usize)),
            retry: RetryPolicy {
                max_attempts: config.max_retry_attempts,
                base_delay: Duration::from_millis(config.retry_base_delay_ms),
                max_delay: Duration::from_secs(10),
            },
        })
    }

    /// Fetches a URL and returns the response body.
    ///
    /// Statuses in {500, 502, 503, 504} are retried up to the configured
    /// attempt limit with exponential backoff. Anything else (4xx, timeout,
    /// transport error) fails on the spot. The permit is held across
    /// retries: a retrying fetch still occupies one concurrency slot.
    pub async fn fetch_page(&self, url: &Url) -> Result<String, FetchError> {
        let _permit = self.limiter.acquire().await.map_err(|_| {
            // acquire() fails only after close(), which this crate never calls
            FetchError::Transport {
                url: url.to_string(),
                error: "concurrency limiter closed".to_string(),
            }
        })?;

        let mut attempt: u32 = 1;

        loop {
            match self.client.get(url.clone()).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        return response.text().await.map_err(|e| FetchError::Transport {
                            url: url.to_string(),
                            error: e.to_string(),
                        });
                    }

                    if is_retryable(status) && attempt < self.retry.max_attempts {
                        let delay = self.retry.backoff(attempt);
                        tracing::debug!(
                            "HTTP {} from {}, retrying in {:?} (attempt {}/{})",
                            status.as_u16(),
                            url,
                            delay,
                            attempt,
                            self.retry.max_attempts
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    return Err(FetchError::Status {
                        url: url.to_string(),
                        status: status.as_u16(),
                    });
                }

                Err(e) if e.is_timeout() => {
                    return Err(FetchError::Timeout {
                        url: url.to_string(),
                    });
                }

                Err(e) => {
                    return Err(FetchError::Transport {
                        url: url.to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }
    }
}
