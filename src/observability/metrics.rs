//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define request metrics (request count, latency)
//! - Expose a Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `demo_requests_total` (counter): total requests by method, status
//! - `demo_request_duration_seconds` (histogram): latency distribution
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - Labels for method and status code; route cardinality is bounded by
//!   the fixed demo route table

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter, serving scrapes on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics exporter");
        }
    }
}

/// Record one completed request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("demo_requests_total", &labels).increment(1);
    metrics::histogram!("demo_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}
