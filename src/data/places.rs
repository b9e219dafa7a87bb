//! Nearby-places lookups via the MapQuest radius search
//!
//! Each lookup runs one GET against the radius endpoint with a fixed
//! parameter set, keyed on a site's postal code. Parsed responses are
//! memoized per postal code, so two sites sharing a code cost one request.
//! Place fields may come back blank; they are stored as-is and substituted
//! with sentinels only when rendered.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::cache::SessionCache;
use crate::data::ParkSite;
use crate::fetch::{FetchError, PageFetcher};

/// Radius search endpoint
pub const PLACES_URL: &str = "http://www.mapquestapi.com/search/v2/radius";

/// Search radius around the origin postal code, in miles
const SEARCH_RADIUS_MILES: u32 = 10;

/// Maximum number of matches requested per search
const MAX_MATCHES: u32 = 10;

/// Error types for nearby-places lookups
#[derive(Debug, Error)]
pub enum PlacesError {
    /// The API request could not be completed
    #[error("Places request failed: {0}")]
    RequestFailed(#[from] FetchError),

    /// The response body was not the expected JSON document
    #[error("Places response was not valid JSON: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    /// The configured endpoint is not a valid URL
    #[error("Invalid places endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

/// Parsed radius-search response, cached per postal code
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacesResponse {
    /// Matches in the order the API returned them
    #[serde(rename = "searchResults", default)]
    pub search_results: Vec<PlaceResult>,
}

/// One place entry from a radius search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fields: PlaceFields,
}

/// Descriptive fields of a place; any of these may be blank
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceFields {
    /// Category name, e.g. "Museums"
    #[serde(default)]
    pub group_sic_code_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
}

/// Client for the radius-search API
pub struct PlacesClient {
    fetcher: Arc<dyn PageFetcher>,
    cache: Arc<SessionCache>,
    api_key: String,
    base_url: String,
}

impl PlacesClient {
    /// Creates a client pointed at the production endpoint.
    ///
    /// # Arguments
    /// * `api_key` - MapQuest consumer key, sent as the `key` parameter
    pub fn new(fetcher: Arc<dyn PageFetcher>, cache: Arc<SessionCache>, api_key: String) -> Self {
        Self {
            fetcher,
            cache,
            api_key,
            base_url: PLACES_URL.to_string(),
        }
    }

    /// Creates a client with an overridden endpoint for testing
    #[cfg(test)]
    pub fn with_base_url(
        fetcher: Arc<dyn PageFetcher>,
        cache: Arc<SessionCache>,
        api_key: String,
        base_url: &str,
    ) -> Self {
        Self {
            fetcher,
            cache,
            api_key,
            base_url: base_url.to_string(),
        }
    }

    /// Looks up places near a site's postal code, cache-first.
    ///
    /// The cache key is the postal code exactly as it appears on the record;
    /// hyphenated 9-digit codes stay intact all the way to the query string.
    pub async fn nearby_places(&self, site: &ParkSite) -> Result<PlacesResponse, PlacesError> {
        if let Some(document) = self.cache.get_places(&site.postal_code) {
            return Ok(document);
        }

        let url = self.request_url(&site.postal_code)?;
        debug!("fetching places near {}", site.postal_code);
        let body = self.fetcher.fetch_text(url.as_str()).await?;
        let document = parse_response(&body)?;
        self.cache.put_places(&site.postal_code, document.clone());
        Ok(document)
    }

    /// Builds the radius-search URL with the fixed query parameters
    fn request_url(&self, postal_code: &str) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.base_url)?;
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair("origin", postal_code)
            .append_pair("radius", &SEARCH_RADIUS_MILES.to_string())
            .append_pair("units", "m")
            .append_pair("maxMatches", &MAX_MATCHES.to_string())
            .append_pair("ambiguities", "ignore")
            .append_pair("outFormat", "json");
        Ok(url)
    }
}

/// Parses a radius-search response body
fn parse_response(body: &str) -> Result<PlacesResponse, PlacesError> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::fakes::StaticFetcher;

    const VALID_RESPONSE: &str = r#"{
        "searchResults": [
            {
                "name": "Carnegie Museum",
                "fields": {
                    "group_sic_code_name": "Museums",
                    "address": "105 Huron St",
                    "city": "Houghton"
                }
            },
            {
                "name": "Portage Lake District Library",
                "fields": {
                    "group_sic_code_name": "",
                    "address": "",
                    "city": "Houghton"
                }
            }
        ],
        "totalPages": 1
    }"#;

    fn houghton_site() -> ParkSite {
        ParkSite {
            category: "National Park".to_string(),
            name: "Isle Royale".to_string(),
            address: "Houghton, MI".to_string(),
            postal_code: "49931".to_string(),
            phone: "(906) 482-0984".to_string(),
        }
    }

    fn test_client(fetcher: Arc<StaticFetcher>, cache: Arc<SessionCache>) -> PlacesClient {
        PlacesClient::with_base_url(
            fetcher,
            cache,
            "test-key".to_string(),
            "http://places.test/radius",
        )
    }

    // ========================================================================
    // Response parsing
    // ========================================================================

    #[test]
    fn test_parse_response_reads_search_results_in_order() {
        let document = parse_response(VALID_RESPONSE).unwrap();
        assert_eq!(document.search_results.len(), 2);
        assert_eq!(document.search_results[0].name, "Carnegie Museum");
        assert_eq!(document.search_results[0].fields.group_sic_code_name, "Museums");
        assert_eq!(document.search_results[1].name, "Portage Lake District Library");
    }

    #[test]
    fn test_parse_response_keeps_blank_fields_blank() {
        // Sentinels are a rendering concern; the stored document is raw
        let document = parse_response(VALID_RESPONSE).unwrap();
        assert_eq!(document.search_results[1].fields.address, "");
        assert_eq!(document.search_results[1].fields.group_sic_code_name, "");
    }

    #[test]
    fn test_parse_response_tolerates_absent_fields_substructure() {
        let document = parse_response(r#"{"searchResults": [{"name": "Lone"}]}"#).unwrap();
        assert_eq!(document.search_results[0].name, "Lone");
        assert_eq!(document.search_results[0].fields.city, "");
    }

    #[test]
    fn test_parse_response_rejects_malformed_json() {
        let result = parse_response("search me");
        assert!(matches!(result, Err(PlacesError::InvalidResponse(_))));
    }

    // ========================================================================
    // Cached lookups and request shape
    // ========================================================================

    #[tokio::test]
    async fn test_nearby_places_fetches_once_per_postal_code() {
        let fetcher = Arc::new(
            StaticFetcher::new().with_response("http://places.test/radius", VALID_RESPONSE),
        );
        let client = test_client(fetcher.clone(), Arc::new(SessionCache::new()));
        let site = houghton_site();

        let first = client.nearby_places(&site).await.unwrap();
        let second = client.nearby_places(&site).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn test_nearby_places_shares_cache_between_sites_with_same_code() {
        let fetcher = Arc::new(
            StaticFetcher::new().with_response("http://places.test/radius", VALID_RESPONSE),
        );
        let client = test_client(fetcher.clone(), Arc::new(SessionCache::new()));

        let mut other = houghton_site();
        other.name = "Keweenaw".to_string();
        client.nearby_places(&houghton_site()).await.unwrap();
        client.nearby_places(&other).await.unwrap();

        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn test_nearby_places_sends_fixed_query_parameters() {
        let fetcher = Arc::new(
            StaticFetcher::new().with_response("http://places.test/radius", VALID_RESPONSE),
        );
        let client = test_client(fetcher.clone(), Arc::new(SessionCache::new()));

        let mut site = houghton_site();
        site.postal_code = "82190-0168".to_string();
        client.nearby_places(&site).await.unwrap();

        let requests = fetcher.requests();
        assert_eq!(requests.len(), 1);
        let url = &requests[0];
        assert!(url.contains("key=test-key"), "missing key in {}", url);
        assert!(url.contains("origin=82190-0168"), "postal code must stay verbatim: {}", url);
        assert!(url.contains("radius=10"), "missing radius in {}", url);
        assert!(url.contains("units=m"), "missing units in {}", url);
        assert!(url.contains("maxMatches=10"), "missing maxMatches in {}", url);
        assert!(url.contains("ambiguities=ignore"), "missing ambiguities in {}", url);
        assert!(url.contains("outFormat=json"), "missing outFormat in {}", url);
    }

    #[tokio::test]
    async fn test_nearby_places_propagates_malformed_body() {
        let fetcher = Arc::new(
            StaticFetcher::new().with_response("http://places.test/radius", "<html>oops</html>"),
        );
        let client = test_client(fetcher, Arc::new(SessionCache::new()));

        let result = client.nearby_places(&houghton_site()).await;
        assert!(matches!(result, Err(PlacesError::InvalidResponse(_))));
    }
}
