//! Latest-binary proxy.
//!
//! Resolves the first asset of the latest release, downloads it in full and
//! re-serves the bytes as an attachment. The asset's real location is never
//! exposed to the client.

use std::sync::Arc;

use axum::http::Version;
use axum::response::Response;

use crate::error::UpdateResult;
use crate::github::ReleaseClient;
use crate::http::response::binary_attachment;

/// Streams the latest release's first asset back to the caller.
#[derive(Clone)]
pub struct BinaryProxyHandler {
    releases: Arc<ReleaseClient>,
    filename: String,
}

impl BinaryProxyHandler {
    pub fn new(releases: Arc<ReleaseClient>, filename: impl Into<String>) -> Self {
        Self {
            releases,
            filename: filename.into(),
        }
    }

    /// Fetch metadata, then the asset, then build the attachment response.
    pub async fn handle(&self, version: Version) -> UpdateResult<Response> {
        let release = self.releases.latest_release().await?;
        let url = release.first_asset_url()?;
        let payload = self.releases.download_asset(url).await?;

        tracing::info!(
            tag = release.tag_name.as_deref().unwrap_or("unknown"),
            bytes = payload.len(),
            "Proxying release asset"
        );

        Ok(binary_attachment(version, &self.filename, payload))
    }
}
