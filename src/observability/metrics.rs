//! Metrics collection and exposition.
//!
//! # Metrics
//! - `nodegate_requests_total` (counter): bridged calls by route, outcome
//! - `nodegate_request_duration_seconds` (histogram): latency distribution
//!
//! # Design Decisions
//! - Outcome labels are the stable fault kinds plus "ok" and "no_route"
//! - The Prometheus exporter is optional and bound from config

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::time::Instant;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one bridged call.
pub fn record_bridge_call(route: &str, outcome: &'static str, start_time: Instant) {
    metrics::counter!(
        "nodegate_requests_total",
        "route" => route.to_string(),
        "outcome" => outcome
    )
    .increment(1);

    metrics::histogram!(
        "nodegate_request_duration_seconds",
        "route" => route.to_string()
    )
    .record(start_time.elapsed().as_secs_f64());
}
