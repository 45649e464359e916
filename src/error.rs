//! Error taxonomy for release lookups and asset proxying.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors surfaced by the upstream client and the request handlers.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// The GET itself failed (DNS, connect, TLS, body read, timeout).
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The upstream answered, but not with a success status.
    #[error("{url} returned status {status}")]
    UpstreamStatus { url: String, status: u16 },

    /// JSON decode failure or a missing/empty expected field.
    #[error("malformed release metadata: {0}")]
    MalformedResponse(String),

    /// The latest release carries no assets.
    #[error("latest release has no assets")]
    EmptyAssetList,
}

impl UpdateError {
    /// HTTP status returned to the client for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            UpdateError::Transport { .. }
            | UpdateError::UpstreamStatus { .. }
            | UpdateError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            UpdateError::EmptyAssetList => StatusCode::NOT_FOUND,
        }
    }

    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            UpdateError::Transport { .. } => "transport",
            UpdateError::UpstreamStatus { .. } => "upstream_status",
            UpdateError::MalformedResponse(_) => "malformed",
            UpdateError::EmptyAssetList => "empty_assets",
        }
    }
}

pub type UpdateResult<T> = Result<T, UpdateError>;
