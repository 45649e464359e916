//! Release lookups against the GitHub Releases API.

use std::sync::Arc;

use axum::body::Bytes;

use crate::config::UpstreamConfig;
use crate::error::UpdateResult;
use crate::github::fetcher::Fetcher;
use crate::github::release::ReleaseMetadata;

/// Client for one repository's releases.
#[derive(Clone)]
pub struct ReleaseClient {
    fetcher: Arc<dyn Fetcher>,
    latest_url: String,
}

impl ReleaseClient {
    pub fn new(config: &UpstreamConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        let latest_url = format!(
            "{}/repos/{}/{}/releases/latest",
            config.api_base_url.trim_end_matches('/'),
            config.owner,
            config.repo
        );
        Self { fetcher, latest_url }
    }

    /// URL of the "latest release" endpoint.
    pub fn latest_release_url(&self) -> &str {
        &self.latest_url
    }

    /// Fetch and decode the latest release metadata.
    pub async fn latest_release(&self) -> UpdateResult<ReleaseMetadata> {
        let body = self.fetcher.fetch(&self.latest_url).await?;
        ReleaseMetadata::from_slice(&body)
    }

    /// Fetch an asset's bytes in full.
    pub async fn download_asset(&self, url: &str) -> UpdateResult<Bytes> {
        self.fetcher.fetch(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpdateError;
    use futures_util::future::{BoxFuture, FutureExt};

    struct Fixed(&'static [u8]);

    impl Fetcher for Fixed {
        fn fetch<'a>(&'a self, _url: &'a str) -> BoxFuture<'a, UpdateResult<Bytes>> {
            let body = Bytes::from_static(self.0);
            async move { Ok(body) }.boxed()
        }
    }

    fn config(base: &str) -> UpstreamConfig {
        UpstreamConfig {
            api_base_url: base.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_latest_release_url() {
        let client = ReleaseClient::new(&UpstreamConfig::default(), Arc::new(Fixed(b"")));
        assert_eq!(
            client.latest_release_url(),
            "https://api.github.com/repos/nullvalue0/WiRSa/releases/latest"
        );

        let client = ReleaseClient::new(&config("http://127.0.0.1:9999/"), Arc::new(Fixed(b"")));
        assert_eq!(
            client.latest_release_url(),
            "http://127.0.0.1:9999/repos/nullvalue0/WiRSa/releases/latest"
        );
    }

    #[tokio::test]
    async fn test_latest_release_decodes() {
        let client = ReleaseClient::new(
            &UpstreamConfig::default(),
            Arc::new(Fixed(br#"{"tag_name": "v3.0.0", "assets": []}"#)),
        );
        let release = client.latest_release().await.unwrap();
        assert_eq!(release.tag().unwrap(), "v3.0.0");
    }

    #[tokio::test]
    async fn test_latest_release_rejects_non_json() {
        let client = ReleaseClient::new(&UpstreamConfig::default(), Arc::new(Fixed(b"oops")));
        assert!(matches!(
            client.latest_release().await,
            Err(UpdateError::MalformedResponse(_))
        ));
    }
}
