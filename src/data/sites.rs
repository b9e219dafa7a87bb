//! Site listing and detail retrieval
//!
//! A state listing page carries a `list_parks` container whose `h3` headings
//! each wrap an anchor to one site's detail page. The detail page exposes the
//! five record fields through tagged elements. Detail fetches are memoized in
//! the session cache by normalized URL; the listing itself is re-fetched on
//! every call.

use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};
use scraper::{Html, Selector};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::cache::SessionCache;
use crate::data::directory::SITE_ORIGIN;
use crate::data::{ParkSite, NO_CATEGORY, NO_PHONE_NUMBER};
use crate::fetch::{FetchError, PageFetcher};

/// Detail fetches allowed in flight while a state listing loads
const DETAIL_FETCH_CONCURRENCY: usize = 4;

/// Error types for site retrieval
#[derive(Debug, Error)]
pub enum SiteError {
    /// A listing or detail page could not be fetched
    #[error("Site request failed: {0}")]
    RequestFailed(#[from] FetchError),

    /// The listing page has no `list_parks` container
    #[error("Listing page has no site list")]
    ListingMissing,

    /// A required detail-page element is absent or empty
    #[error("Detail page is missing required field `{0}`")]
    MissingField(&'static str),

    /// A listing href could not be resolved against the origin
    #[error("Invalid site link: {0}")]
    InvalidLink(#[from] url::ParseError),
}

/// Client for state listing pages and per-site detail pages
pub struct SiteClient {
    fetcher: Arc<dyn PageFetcher>,
    cache: Arc<SessionCache>,
    origin: String,
}

impl SiteClient {
    /// Creates a client resolving links against the production origin
    pub fn new(fetcher: Arc<dyn PageFetcher>, cache: Arc<SessionCache>) -> Self {
        Self {
            fetcher,
            cache,
            origin: SITE_ORIGIN.to_string(),
        }
    }

    /// Creates a client with an overridden origin for testing
    #[cfg(test)]
    pub fn with_origin(fetcher: Arc<dyn PageFetcher>, cache: Arc<SessionCache>, origin: &str) -> Self {
        Self {
            fetcher,
            cache,
            origin: origin.to_string(),
        }
    }

    /// Loads every site on a state listing page, in page order.
    ///
    /// Detail pages are fetched a bounded number at a time and the records
    /// are reassembled in listing order. The sequence itself is never
    /// cached; only the per-site fetches underneath are.
    ///
    /// # Arguments
    /// * `listing_url` - The state listing page, from the directory
    pub async fn sites_for_state(&self, listing_url: &str) -> Result<Vec<ParkSite>, SiteError> {
        let html = self.fetcher.fetch_text(listing_url).await?;
        let origin = Url::parse(&self.origin)?;
        let detail_urls = parse_listing_links(&html, &origin)?;
        debug!("{} sites listed at {}", detail_urls.len(), listing_url);

        stream::iter(detail_urls)
            .map(|url| async move { self.site_detail(&url).await })
            .buffered(DETAIL_FETCH_CONCURRENCY)
            .try_collect()
            .await
    }

    /// Loads one site's record, consulting the session cache first.
    ///
    /// The cache key is the detail URL lowercased and trimmed, applied
    /// identically on lookup and store, so the same page is fetched at most
    /// once per session no matter how callers case the URL.
    pub async fn site_detail(&self, detail_url: &str) -> Result<ParkSite, SiteError> {
        if let Some(record) = self.cache.get_site(detail_url) {
            return Ok(record);
        }

        debug!("fetching site detail from {}", detail_url);
        let html = self.fetcher.fetch_text(detail_url).await?;
        let record = parse_site_detail(&html)?;
        self.cache.put_site(detail_url, record.clone());
        Ok(record)
    }
}

/// Pulls each site's detail URL out of a listing page, preserving order
fn parse_listing_links(html: &str, origin: &Url) -> Result<Vec<String>, SiteError> {
    let document = Html::parse_document(html);
    let container_selector = Selector::parse("#list_parks").expect("invalid selector");
    let anchor_selector = Selector::parse("h3 a[href]").expect("invalid selector");

    let container = document
        .select(&container_selector)
        .next()
        .ok_or(SiteError::ListingMissing)?;

    let mut urls = Vec::new();
    for anchor in container.select(&anchor_selector) {
        if let Some(href) = anchor.value().attr("href") {
            urls.push(origin.join(href)?.to_string());
        }
    }
    Ok(urls)
}

/// Extracts the five record fields from a detail page.
///
/// Title, postal code, and the locality/region pair are required; the
/// designation and phone elements fall back to their sentinels when absent.
fn parse_site_detail(html: &str) -> Result<ParkSite, SiteError> {
    let document = Html::parse_document(html);

    let name = select_text(&document, ".Hero-title").ok_or(SiteError::MissingField("name"))?;
    let category = select_text(&document, ".Hero-designation")
        .unwrap_or_else(|| NO_CATEGORY.to_string());
    let postal_code =
        select_text(&document, ".postal-code").ok_or(SiteError::MissingField("postal code"))?;
    let locality = select_text(&document, r#"[itemprop="addressLocality"]"#)
        .ok_or(SiteError::MissingField("locality"))?;
    let region = select_text(&document, ".region").ok_or(SiteError::MissingField("region"))?;
    let phone =
        select_text(&document, ".tel").unwrap_or_else(|| NO_PHONE_NUMBER.to_string());

    Ok(ParkSite {
        category,
        name,
        address: format!("{}, {}", locality, region),
        postal_code,
        phone,
    })
}

/// First match for `selector` as trimmed text; None when the element is
/// absent or has no text
fn select_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).expect("invalid selector");
    document
        .select(&selector)
        .next()
        .map(|element| {
            element
                .text()
                .collect::<Vec<_>>()
                .join(" ")
                .trim()
                .to_string()
        })
        .filter(|text| !text.is_empty())
}
