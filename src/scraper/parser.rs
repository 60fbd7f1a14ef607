//! Listing and detail document parsing
//!
//! Field extraction is split into one accessor per field, each with its own
//! default-on-miss policy:
//!
//! | Field | Source | On miss |
//! |---|---|---|
//! | title | listing block `h3 > a[title]` | error |
//! | price | listing block `.price_color` text | error |
//! | rating | listing block `.star-rating` class token | element missing: error; unknown word: 0.0 |
//! | availability | detail page `.instock.availability` text | 0 |
//! | category | detail page last breadcrumb anchor | error |
//! | image URL | detail page `.carousel-inner img` src | error |

use crate::ScrapeError;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

static ITEM_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("article.product_pod").expect("hardcoded selector is valid"));

static TITLE_LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h3 a").expect("hardcoded selector is valid"));

static PRICE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p.price_color").expect("hardcoded selector is valid"));

static RATING_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p.star-rating").expect("hardcoded selector is valid"));

static AVAILABILITY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("p.instock.availability").expect("hardcoded selector is valid")
});

static BREADCRUMB_LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("ul.breadcrumb li a").expect("hardcoded selector is valid"));

static IMAGE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".carousel-inner img").expect("hardcoded selector is valid"));

static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(\.\d+)?").expect("hardcoded regex pattern is valid"));

static AVAILABILITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d+)\s+available\)").expect("hardcoded regex pattern is valid"));

/// An item block pulled off a listing page, with the fields the listing
/// itself carries. Availability, category and image come from the detail
/// page later.
#[derive(Debug, Clone)]
pub struct ItemSummary {
    pub title: String,
    pub price: f64,
    pub rating: f64,
    /// Relative link to the item's detail page, as found in the block
    pub detail_href: String,
}

/// Fields recovered from an item's detail page
#[derive(Debug, Clone)]
pub struct DetailFields {
    pub availability: u32,
    pub category: String,
    pub image_url: String,
}

/// Pulls the raw item blocks out of a fetched listing page, in document
/// order. A page with no blocks yields an empty vec, not an error.
pub fn extract_item_blocks(body: &str) -> Vec<String> {
    let document = Html::parse_document(body);

    document
        .select(&ITEM_SELECTOR)
        .map(|block| block.html())
        .collect()
}

/// Parses the listing-side fields out of one raw item block
pub fn parse_listing_block(block_html: &str, page_url: &Url) -> Result<ItemSummary, ScrapeError> {
    let fragment = Html::parse_fragment(block_html);

    let link = fragment
        .select(&TITLE_LINK_SELECTOR)
        .next()
        .ok_or_else(|| parse_error(page_url, "item title link"))?;

    let title = link
        .value()
        .attr("title")
        .ok_or_else(|| parse_error(page_url, "item title"))?
        .to_string();

    let detail_href = link
        .value()
        .attr("href")
        .ok_or_else(|| parse_error(page_url, "item detail link"))?
        .to_string();

    let price_text = fragment
        .select(&PRICE_SELECTOR)
        .next()
        .map(|el| el.text().collect::<String>())
        .ok_or_else(|| parse_error(page_url, "item price"))?;
    let price = parse_price(&price_text).ok_or_else(|| parse_error(page_url, "item price"))?;

    let rating = fragment
        .select(&RATING_SELECTOR)
        .next()
        .map(|el| {
            el.value()
                .classes()
                .find(|class| *class != "star-rating")
                .map(rating_from_word)
                .unwrap_or(0.0)
        })
        .ok_or_else(|| parse_error(page_url, "item rating"))?;

    Ok(ItemSummary {
        title,
        price,
        rating,
        detail_href,
    })
}

/// Parses the detail-side fields out of a fetched detail page
pub fn extract_detail_fields(
    body: &str,
    base: &Url,
    detail_url: &Url,
) -> Result<DetailFields, ScrapeError> {
    let document = Html::parse_document(body);

    let availability = document
        .select(&AVAILABILITY_SELECTOR)
        .next()
        .map(|el| parse_availability(&el.text().collect::<String>()))
        .unwrap_or(0);

    let category = document
        .select(&BREADCRUMB_LINK_SELECTOR)
        .last()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| parse_error(detail_url, "category"))?;

    let image_src = document
        .select(&IMAGE_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("src"))
        .ok_or_else(|| parse_error(detail_url, "image URL"))?;

    let image_url = absolute_image_url(base, image_src)?;

    Ok(DetailFields {
        availability,
        category,
        image_url,
    })
}

/// First numeric token (with optional decimals) in a price display string.
/// Handles currency prefixes and the mojibake ones ("Â£13") alike.
pub fn parse_price(text: &str) -> Option<f64> {
    PRICE_RE
        .find(text)
        .and_then(|token| token.as_str().parse().ok())
}

/// Stock count from an availability string, 0 when the parenthetical
/// count is absent ("In stock" with no number).
pub fn parse_availability(text: &str) -> u32 {
    AVAILABILITY_RE
        .captures(text)
        .and_then(|captures| captures[1].parse().ok())
        .unwrap_or(0)
}

/// Star-rating word to numeric value; unrecognized words map to 0.0
pub fn rating_from_word(word: &str) -> f64 {
    match word.to_ascii_lowercase().as_str() {
        "zero" => 0.0,
        "one" => 1.0,
        "two" => 2.0,
        "three" => 3.0,
        "four" => 4.0,
        "five" => 5.0,
        "six" => 6.0,
        "seven" => 7.0,
        "eight" => 8.0,
        "nine" => 9.0,
        "ten" => 10.0,
        _ => 0.0,
    }
}

/// Rebuilds an absolute image URL from the relative src on a detail page.
/// `../` prefixes are collapsed and the remainder joined onto the base,
/// so `../../media/cache/ab/cd.jpg` becomes `{base}/media/cache/ab/cd.jpg`.
pub fn absolute_image_url(base: &Url, src: &str) -> Result<String, ScrapeError> {
    let path = src.replace("../", "/");
    let path = path.trim_start_matches('/');

    Ok(base.join(path)?.to_string())
}

fn parse_error(url: &Url, what: &'static str) -> ScrapeError {
    ScrapeError::Parsing {
        url: url.to_string(),
        what,
    }
}
