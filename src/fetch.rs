//! HTTP transport for Park Scout
//!
//! Every page and API fetch goes through the [`PageFetcher`] trait so the
//! retrieval clients can be exercised against canned responses in tests.
//! [`HttpFetcher`] is the production implementation, backed by a shared
//! reqwest client.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// Timeout applied to every outbound request, in seconds
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// User agent sent with every request
const USER_AGENT: &str = concat!("parkscout/", env!("CARGO_PKG_VERSION"));

/// Error types for document fetching
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The server answered with a non-success status code
    #[error("Unexpected status {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
}

/// Fetches a remote document as text.
///
/// This is the seam between the retrieval clients and the network; tests
/// substitute a fake that serves fixture bodies and counts calls.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the document at `url` and return its body as text
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Production fetcher backed by reqwest
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Creates a fetcher with the default timeout and user agent
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }

    /// Creates a fetcher from an existing reqwest client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}
