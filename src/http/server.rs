//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the version, binary and status handlers
//! - Wire up middleware (request ID, tracing, optional timeout)
//! - Bind server to listener and serve until shutdown
//! - Translate handler errors into responses and metrics

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, Version},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::validation::STATUS_PATH;
use crate::config::UpdateConfig;
use crate::error::{UpdateError, UpdateResult};
use crate::github::{Fetcher, HttpFetcher, ReleaseClient};
use crate::handlers::{BinaryProxyHandler, VersionCheckHandler};
use crate::http::request::{MakeRequestUuid, RequestIdExt, X_REQUEST_ID};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub version: Arc<VersionCheckHandler>,
    pub binary: Arc<BinaryProxyHandler>,
    pub releases: Arc<ReleaseClient>,
}

/// HTTP server for the update service.
pub struct HttpServer {
    router: Router,
    config: UpdateConfig,
}

impl HttpServer {
    /// Create a new HTTP server backed by the real upstream client.
    pub fn new(config: UpdateConfig) -> UpdateResult<Self> {
        let fetcher = HttpFetcher::new(&config.upstream, &config.timeouts)?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    /// Create a server that pulls upstream bytes through `fetcher`.
    pub fn with_fetcher(config: UpdateConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        let releases = Arc::new(ReleaseClient::new(&config.upstream, fetcher));

        let state = AppState {
            version: Arc::new(VersionCheckHandler::new(releases.clone())),
            binary: Arc::new(BinaryProxyHandler::new(
                releases.clone(),
                config.asset.filename.clone(),
            )),
            releases,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &UpdateConfig, state: AppState) -> Router {
        let router = Router::new()
            .route(&config.routes.version_path, get(version_check))
            .route(&config.routes.binary_path, get(binary_proxy))
            .route(STATUS_PATH, get(status))
            .with_state(state);

        let router = match config.timeouts.request_secs {
            Some(secs) => router.layer(TimeoutLayer::new(Duration::from_secs(secs))),
            None => router,
        };

        router.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                        tracing::info_span!(
                            "request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = %request.headers().request_id(),
                        )
                    }),
                )
                .layer(PropagateRequestIdLayer::new(X_REQUEST_ID)),
        )
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            version_path = %self.config.routes.version_path,
            binary_path = %self.config.routes.binary_path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The router, for driving the service without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &UpdateConfig {
        &self.config
    }
}

/// Plain-text latest release tag.
async fn version_check(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let start_time = Instant::now();
    let response = match state.version.handle().await {
        Ok(tag) => tag.into_response(),
        Err(e) => failure(&headers, "version", e),
    };
    metrics::record_request("version", response.status().as_u16(), start_time);
    response
}

/// Latest release asset as an attachment.
async fn binary_proxy(
    State(state): State<AppState>,
    version: Version,
    headers: HeaderMap,
) -> Response {
    let start_time = Instant::now();
    let response = match state.binary.handle(version).await {
        Ok(response) => response,
        Err(e) => failure(&headers, "binary", e),
    };
    metrics::record_request("binary", response.status().as_u16(), start_time);
    response
}

fn failure(headers: &HeaderMap, endpoint: &'static str, error: UpdateError) -> Response {
    tracing::error!(
        request_id = %headers.request_id(),
        endpoint,
        kind = error.kind(),
        error = %error,
        "Request failed"
    );
    error.into_response()
}

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub upstream: String,
}

async fn status(State(state): State<AppState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        upstream: state.releases.latest_release_url().to_string(),
    })
}
