use crate::error::{FetchError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = "github-repo-search/0.1.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Capability to perform an HTTP GET and return the raw response body.
///
/// Both the search coordinator and the image cache issue their network work
/// through this seam, so tests can substitute a scripted implementation.
#[async_trait]
pub trait NetworkFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Bytes>;
}

/// Production fetcher backed by a shared `reqwest` client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(HttpFetcher { client })
    }
}

#[async_trait]
impl NetworkFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Bytes> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::ServerError(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(body)
    }
}
