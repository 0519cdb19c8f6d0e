//! Binary asset download.

use async_trait::async_trait;
use cordshift_error::CordshiftResult;

/// Fetches images from a CDN.
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    /// Download `url`.
    ///
    /// Returns `Ok(None)` when the asset does not exist (any non-success
    /// status), and an error only when the transport itself failed.
    async fn fetch_asset(&self, url: &str) -> CordshiftResult<Option<Vec<u8>>>;
}
