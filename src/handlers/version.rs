//! Latest-version lookup.

use std::sync::Arc;

use crate::error::UpdateResult;
use crate::github::ReleaseClient;

/// Answers with the latest release tag as plain text.
#[derive(Clone)]
pub struct VersionCheckHandler {
    releases: Arc<ReleaseClient>,
}

impl VersionCheckHandler {
    pub fn new(releases: Arc<ReleaseClient>) -> Self {
        Self { releases }
    }

    /// The tag of the latest release, untouched.
    pub async fn handle(&self) -> UpdateResult<String> {
        let release = self.releases.latest_release().await?;
        let tag = release.tag()?;
        tracing::info!(tag = %tag, "Resolved latest release");
        Ok(tag.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpdateError;
    use crate::handlers::stub::{StubFetcher, LATEST_URL};

    fn handler(stub: &Arc<StubFetcher>) -> VersionCheckHandler {
        VersionCheckHandler::new(Arc::new(stub.release_client()))
    }

    #[tokio::test]
    async fn test_returns_tag_exactly() {
        let stub = Arc::new(StubFetcher::new().with_body(
            LATEST_URL,
            br#"{"tag_name": "v2.1.0", "assets": [{"browser_download_url": "https://example.com/wirsa.bin"}]}"#,
        ));
        assert_eq!(handler(&stub).handle().await.unwrap(), "v2.1.0");
        assert_eq!(stub.calls(), vec![LATEST_URL.to_string()]);
    }

    #[tokio::test]
    async fn test_does_not_need_assets() {
        let stub = Arc::new(
            StubFetcher::new().with_body(LATEST_URL, br#"{"tag_name": "3.0.2 ", "assets": []}"#),
        );
        assert_eq!(handler(&stub).handle().await.unwrap(), "3.0.2 ");
    }

    #[tokio::test]
    async fn test_missing_tag_is_error() {
        let stub = Arc::new(StubFetcher::new().with_body(LATEST_URL, br#"{"message": "Not Found"}"#));
        assert!(matches!(
            handler(&stub).handle().await,
            Err(UpdateError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let stub = Arc::new(StubFetcher::new());
        assert!(matches!(
            handler(&stub).handle().await,
            Err(UpdateError::Transport { .. })
        ));
    }

    #[tokio::test]
    async fn test_repeated_calls_are_identical() {
        let stub = Arc::new(StubFetcher::new().with_body(LATEST_URL, br#"{"tag_name": "v2.1.0"}"#));
        let handler = handler(&stub);
        let first = handler.handle().await.unwrap();
        let second = handler.handle().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(stub.calls().len(), 2);
    }
}
