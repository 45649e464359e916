//! Typed schema for the GitHub "latest release" payload.
//!
//! Only the fields the service reads are modelled, and each one is optional so
//! that a missing field becomes a typed error instead of a decode panic.
//! See <https://docs.github.com/en/rest/releases/releases#get-the-latest-release>.

use serde::Deserialize;

use crate::error::{UpdateError, UpdateResult};

/// A release's asset. Does not contain all fields.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReleaseAsset {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub browser_download_url: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

/// A github release. Does not contain all fields.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReleaseMetadata {
    #[serde(default)]
    pub tag_name: Option<String>,
    #[serde(default)]
    pub assets: Option<Vec<ReleaseAsset>>,
}

impl ReleaseMetadata {
    /// Decode the raw API response body.
    pub fn from_slice(body: &[u8]) -> UpdateResult<Self> {
        serde_json::from_slice(body).map_err(|e| UpdateError::MalformedResponse(e.to_string()))
    }

    /// The release tag, exactly as published.
    pub fn tag(&self) -> UpdateResult<&str> {
        match self.tag_name.as_deref() {
            Some(tag) if !tag.is_empty() => Ok(tag),
            Some(_) => Err(UpdateError::MalformedResponse("tag_name is empty".into())),
            None => Err(UpdateError::MalformedResponse("missing tag_name".into())),
        }
    }

    /// Download URL of the first asset.
    pub fn first_asset_url(&self) -> UpdateResult<&str> {
        let assets = self
            .assets
            .as_ref()
            .ok_or_else(|| UpdateError::MalformedResponse("missing assets".into()))?;
        let first = assets.first().ok_or(UpdateError::EmptyAssetList)?;

        match first.browser_download_url.as_deref() {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(UpdateError::MalformedResponse(
                "assets[0] has no browser_download_url".into(),
            )),
        }
    }
}
