//! URL-addressable blob reads.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use super::error::Result;

/// Fetches raw bytes by URL.
#[async_trait]
pub trait BlobFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Bytes>;
}

// == HTTP Blob Fetcher ==
/// Plain HTTP GET via reqwest. Timeouts and retries are whatever the
/// supplied client is configured with.
#[derive(Debug, Clone, Default)]
pub struct HttpBlobFetcher {
    client: reqwest::Client,
}

impl HttpBlobFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BlobFetcher for HttpBlobFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes> {
        debug!("Fetching blob {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?)
    }
}
