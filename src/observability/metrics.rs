//! Metrics collection and exposition.
//!
//! # Metrics
//! - `wirsa_requests_total` (counter): client requests by endpoint, status
//! - `wirsa_request_duration_seconds` (histogram): latency per endpoint
//! - `wirsa_upstream_fetches_total` (counter): upstream GETs by outcome
//! - `wirsa_upstream_bytes_total` (counter): bytes received from upstream

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a served client request.
pub fn record_request(endpoint: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "wirsa_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("wirsa_request_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}

/// Record the outcome of one upstream GET.
pub fn record_upstream_fetch(outcome: &'static str, bytes: usize) {
    metrics::counter!("wirsa_upstream_fetches_total", "outcome" => outcome).increment(1);
    if bytes > 0 {
        metrics::counter!("wirsa_upstream_bytes_total").increment(bytes as u64);
    }
}
