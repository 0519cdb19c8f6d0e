//! CDN downloads.

use async_trait::async_trait;
use cordshift_error::{CordshiftResult, HttpError};
use cordshift_interface::AssetFetcher;
use reqwest::Client;
use tracing::{debug, instrument, warn};

/// Downloads public CDN assets without credentials.
#[derive(Debug, Clone, Default)]
pub struct CdnFetcher {
    client: Client,
}

impl CdnFetcher {
    /// Create a fetcher with a fresh connection pool.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AssetFetcher for CdnFetcher {
    #[instrument(skip(self))]
    async fn fetch_asset(&self, url: &str) -> CordshiftResult<Option<Vec<u8>>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| HttpError::from_reqwest("GET", url, &e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Asset not available");
            return Ok(None);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| HttpError::from_reqwest("GET", url, &e))?;
        debug!(len = bytes.len(), "Downloaded asset");
        Ok(Some(bytes.to_vec()))
    }
}
