//! State directory resolution
//!
//! The nps.gov index page links every state's listing page through anchors
//! whose href contains "state". This client fetches that page live on every
//! call (directory results are deliberately never cached; a session resolves
//! the directory exactly once at startup) and builds a case-insensitive
//! mapping from state name to listing URL.

use std::collections::HashMap;
use std::sync::Arc;

use scraper::{Html, Selector};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::fetch::{FetchError, PageFetcher};

/// Index page listing every state
pub const DIRECTORY_URL: &str = "https://www.nps.gov/index.htm";

/// Origin used to absolutize relative links
pub const SITE_ORIGIN: &str = "https://www.nps.gov";

/// Error types for directory resolution
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The index page could not be fetched
    #[error("Directory request failed: {0}")]
    RequestFailed(#[from] FetchError),

    /// The index page contained no state links at all
    #[error("No state links found on the directory page")]
    NoStateLinks,

    /// The configured origin is not a valid URL
    #[error("Invalid directory origin: {0}")]
    InvalidOrigin(#[from] url::ParseError),
}

/// Mapping from lowercased state name to its listing-page URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateDirectory {
    entries: HashMap<String, String>,
}

impl StateDirectory {
    /// Looks up a state's listing URL, case-insensitively.
    ///
    /// # Arguments
    /// * `state` - State name in any casing, e.g. "Michigan" or "michigan"
    pub fn listing_url(&self, state: &str) -> Option<&str> {
        self.entries
            .get(&state.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Number of states in the directory
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds a directory straight from entries, bypassing the fetch
    #[cfg(test)]
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, url)| (name.to_string(), url.to_string()))
                .collect(),
        }
    }
}

/// Client for the top-level state directory
pub struct DirectoryClient {
    fetcher: Arc<dyn PageFetcher>,
    directory_url: String,
    origin: String,
}

impl DirectoryClient {
    /// Creates a client pointed at the production index page
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            directory_url: DIRECTORY_URL.to_string(),
            origin: SITE_ORIGIN.to_string(),
        }
    }

    /// Creates a client with overridden fetch targets for testing
    #[cfg(test)]
    pub fn with_urls(fetcher: Arc<dyn PageFetcher>, directory_url: &str, origin: &str) -> Self {
        Self {
            fetcher,
            directory_url: directory_url.to_string(),
            origin: origin.to_string(),
        }
    }

    /// Fetches the index page and builds the state directory.
    ///
    /// # Returns
    /// * `Ok(StateDirectory)` mapping each state to its listing URL
    /// * `Err(DirectoryError)` if the fetch fails or no state links exist
    pub async fn resolve_states(&self) -> Result<StateDirectory, DirectoryError> {
        debug!("resolving state directory from {}", self.directory_url);
        let html = self.fetcher.fetch_text(&self.directory_url).await?;
        let origin = Url::parse(&self.origin)?;
        let directory = parse_state_links(&html, &origin)?;
        info!("state directory resolved with {} states", directory.len());
        Ok(directory)
    }
}

/// Extracts every anchor whose href contains "state" and maps its lowercased
/// link text to an absolute URL. Anchors without text are skipped.
fn parse_state_links(html: &str, origin: &Url) -> Result<StateDirectory, DirectoryError> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"a[href*="state"]"#).expect("invalid selector");

    let mut entries = HashMap::new();
    for anchor in document.select(&selector) {
        if let Some(href) = anchor.value().attr("href") {
            let name = anchor
                .text()
                .collect::<Vec<_>>()
                .join(" ")
                .trim()
                .to_lowercase();
            if name.is_empty() {
                continue;
            }
            if let Ok(absolute) = origin.join(href) {
                entries.insert(name, absolute.to_string());
            }
        }
    }

    if entries.is_empty() {
        return Err(DirectoryError::NoStateLinks);
    }
    Ok(StateDirectory { entries })
}
