//! HTTP page fetching.
//!
//! The pipeline talks to the network only through the [`Fetch`] trait, so
//! it can run against an in-memory page set in tests.

use crate::error::FetchError;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

/// User-Agent sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; NewsDailyAgent/1.0)";

/// Trait for downloading a page as text.
pub trait Fetch {
    /// GET `url` and return the response body.
    ///
    /// Fails on network errors, timeouts, and non-success statuses.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// [`Fetch`] implementation backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a client with the fixed user agent and the given timeout.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        debug!(bytes = body.len(), "Fetched page");
        Ok(body)
    }
}
