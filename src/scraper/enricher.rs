//! Detail enrichment
//!
//! Takes the raw item blocks in discovery order, parses the listing-side
//! fields, fetches every detail page concurrently through the shared fetch
//! limiter, and assembles the final records. Unlike the listing-page phase,
//! any failure here (an unreachable detail page, an unparsable field)
//! aborts the whole run; no partial record set leaves this module.

use crate::scraper::fetcher::Fetcher;
use crate::scraper::parser::{extract_detail_fields, parse_listing_block};
use crate::ScrapeError;
use futures::future::join_all;
use serde::Serialize;
use url::Url;

/// The final flat record, one CSV row. Field order here is the column
/// order downstream consumers depend on.
#[derive(Debug, Clone, Serialize)]
pub struct BookRecord {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub availability: u32,
    pub rating: f64,
    pub category: String,
    pub image_url: String,
}

/// Builds the detail page URL for an item's listing href.
///
/// Hrefs come in both `catalogue/<slug>/index.html` (root page) and
/// `<slug>/index.html` (numbered pages) forms; both get rooted under
/// `{base}/catalogue/`.
pub fn detail_url(base: &Url, href: &str) -> Result<Url, url::ParseError> {
    let path = href.replace("catalogue/", "");
    base.join(&format!("catalogue/{}", path))
}

/// Enriches every raw item block into a full record, preserving discovery
/// order regardless of which detail fetch completes first.
///
/// `blocks` is (listing page URL, raw block HTML) in discovery order.
/// Record ids are left at 0; the coordinator assigns them in a final pass.
pub async fn enrich_items(
    fetcher: &Fetcher,
    base: &Url,
    blocks: &[(Url, String)],
) -> Result<Vec<BookRecord>, ScrapeError> {
    let enrichments = blocks.iter().map(|(page_url, block_html)| async move {
        // Listing-side fields first; the Html fragment never crosses an await
        let summary = parse_listing_block(block_html, page_url)?;

        let url = detail_url(base, &summary.detail_href)?;
        let body =
            fetcher
                .fetch_page(&url)
                .await
                .map_err(|e| ScrapeError::DetailPageUnreachable {
                    url: url.to_string(),
                    cause: e.to_string(),
                })?;

        let detail = extract_detail_fields(&body, base, &url)?;

        Ok::<BookRecord, ScrapeError>(BookRecord {
            id: 0,
            title: summary.title,
            price: summary.price,
            availability: detail.availability,
            rating: summary.rating,
            category: detail.category,
            image_url: detail.image_url,
        })
    });

    // join_all returns results in input order, so discovery order survives
    // the concurrent fan-out
    join_all(enrichments).await.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://books.example.com/").unwrap()
    }

    #[test]
    fn test_detail_url_from_root_page_href() {
        let url = detail_url(&base_url(), "catalogue/its-only_981/index.html").unwrap();
        assert_eq!(
            url.as_str(),
            "https://books.example.com/catalogue/its-only_981/index.html"
        );
    }

    #[test]
    fn test_detail_url_from_numbered_page_href() {
        let url = detail_url(&base_url(), "its-only_981/index.html").unwrap();
        assert_eq!(
            url.as_str(),
            "https://books.example.com/catalogue/its-only_981/index.html"
        );
    }
}
