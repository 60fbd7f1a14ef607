//! Pagination discovery
//!
//! The catalog root advertises its own length in a `li.current` marker
//! ("Page 1 of 50"). The set of listing pages to fetch is derived from that
//! single number, so any failure here is fatal for the run.

use crate::scraper::fetcher::Fetcher;
use crate::ScrapeError;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

static CURRENT_PAGE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li.current").expect("hardcoded selector is valid"));

static TOTAL_PAGES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"of (\d+)").expect("hardcoded regex pattern is valid"));

/// Fetches the listing root and returns the total page count.
///
/// Fails with `PageUnreachable` when the root cannot be fetched and
/// `PaginatorMissing` when the marker element is absent.
pub async fn discover_total_pages(fetcher: &Fetcher, base: &Url) -> Result<u32, ScrapeError> {
    let body = fetcher
        .fetch_page(base)
        .await
        .map_err(|e| ScrapeError::PageUnreachable {
            url: base.to_string(),
            cause: e.to_string(),
        })?;

    total_pages_from_root(&body, base)
}

/// Extracts the total page count from the listing root document
pub fn total_pages_from_root(body: &str, url: &Url) -> Result<u32, ScrapeError> {
    let document = Html::parse_document(body);

    let marker = document
        .select(&CURRENT_PAGE_SELECTOR)
        .next()
        .ok_or_else(|| ScrapeError::PaginatorMissing {
            url: url.to_string(),
        })?;

    let text = marker.text().collect::<String>();

    let captures =
        TOTAL_PAGES_RE
            .captures(&text)
            .ok_or_else(|| ScrapeError::Parsing {
                url: url.to_string(),
                what: "total page count",
            })?;

    captures[1].parse().map_err(|_| ScrapeError::Parsing {
        url: url.to_string(),
        what: "total page count",
    })
}

/// Builds the listing page URLs `catalogue/page-{n}.html` for n in [1, total],
/// in strictly increasing page order.
pub fn listing_page_urls(base: &Url, total_pages: u32) -> Result<Vec<Url>, url::ParseError> {
    (1..=total_pages)
        .map(|n| base.join(&format!("catalogue/page-{}.html", n)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://books.example.com/").unwrap()
    }

    #[test]
    fn test_total_pages_from_marker() {
        let html = r#"<html><body><ul class="pager">
            <li class="current">Page 1 of 50</li>
        </ul></body></html>"#;

        let total = total_pages_from_root(html, &base_url()).unwrap();
        assert_eq!(total, 50);
    }

    #[test]
    fn test_total_pages_marker_with_whitespace() {
        let html = "<html><body><li class=\"current\">\n    Page 1 of 3\n</li></body></html>";

        let total = total_pages_from_root(html, &base_url()).unwrap();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_missing_marker_is_paginator_missing() {
        let html = r#"<html><body><p>no pager here</p></body></html>"#;

        let err = total_pages_from_root(html, &base_url()).unwrap_err();
        assert!(matches!(err, ScrapeError::PaginatorMissing { .. }));
    }

    #[test]
    fn test_marker_without_count_is_parse_error() {
        let html = r#"<html><body><li class="current">Page 1</li></body></html>"#;

        let err = total_pages_from_root(html, &base_url()).unwrap_err();
        assert!(matches!(err, ScrapeError::Parsing { .. }));
    }

    #[test]
    fn test_listing_page_urls_in_order() {
        let urls = listing_page_urls(&base_url(), 4).unwrap();

        assert_eq!(urls.len(), 4);
        for (idx, url) in urls.iter().enumerate() {
            assert_eq!(
                url.as_str(),
                format!("https://books.example.com/catalogue/page-{}.html", idx + 1)
            );
        }
    }

    #[test]
    fn test_listing_page_urls_zero_pages() {
        let urls = listing_page_urls(&base_url(), 0).unwrap();
        assert!(urls.is_empty());
    }
}
