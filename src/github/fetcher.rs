//! Upstream HTTP GET.
//!
//! # Responsibilities
//! - Issue a GET, following redirects
//! - Identify with the configured User-Agent
//! - Return the complete body as bytes
//!
//! # Design Decisions
//! - No retry; a failure is reported once
//! - Timeouts only when configured
//! - Non-2xx final status is an error, not a body

use std::time::Duration;

use axum::body::Bytes;
use futures_util::future::{BoxFuture, FutureExt};
use reqwest::{redirect::Policy, Client};

use crate::config::{TimeoutConfig, UpstreamConfig};
use crate::error::{UpdateError, UpdateResult};
use crate::observability::metrics;

/// Maximum redirect hops followed for a single fetch.
pub const MAX_REDIRECTS: usize = 10;

/// Source of upstream bytes, swappable in tests.
pub trait Fetcher: Send + Sync {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, UpdateResult<Bytes>>;
}

/// Reqwest-backed fetcher shared by all requests.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(upstream: &UpstreamConfig, timeouts: &TimeoutConfig) -> UpdateResult<Self> {
        let mut builder = Client::builder()
            .user_agent(upstream.user_agent.clone())
            .redirect(Policy::limited(MAX_REDIRECTS));

        if let Some(secs) = timeouts.connect_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = timeouts.upstream_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if !upstream.use_system_proxy {
            builder = builder.no_proxy();
        }

        let client = builder.build().map_err(|e| UpdateError::Transport {
            url: upstream.api_base_url.clone(),
            message: format!("failed to build HTTP client: {}", e),
        })?;

        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> UpdateResult<Bytes> {
        let transport = |e: reqwest::Error| UpdateError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpdateError::UpstreamStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if response.url().as_str() != url {
            tracing::debug!(url = %url, final_url = %response.url(), "Followed redirect");
        }

        response.bytes().await.map_err(transport)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, UpdateResult<Bytes>> {
        async move {
            let result = self.get(url).await;
            match &result {
                Ok(body) => {
                    tracing::debug!(url = %url, bytes = body.len(), "Upstream fetch complete");
                    metrics::record_upstream_fetch("ok", body.len());
                }
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "Upstream fetch failed");
                    metrics::record_upstream_fetch(e.kind(), 0);
                }
            }
            result
        }
        .boxed()
    }
}
