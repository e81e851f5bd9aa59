//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by resource, route, status
//! - `gateway_request_duration_seconds` (histogram): latency by resource, route
//! - `gateway_stream_bytes_total` (counter): bytes moved by resource, direction
//! - `gateway_stream_errors_total` (counter): stream failures by resource, direction, kind
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with an HTTP scrape listener on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed request.
pub fn record_request(resource: &str, route: &'static str, status: u16, start: Instant) {
    let labels = [
        ("resource", resource.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];
    counter!("gateway_requests_total", &labels).increment(1);

    let labels = [("resource", resource.to_string()), ("route", route.to_string())];
    histogram!("gateway_request_duration_seconds", &labels).record(start.elapsed().as_secs_f64());
}

/// Record bytes read from or written to a stream.
pub fn record_stream_bytes(resource: &str, direction: &'static str, bytes: usize) {
    let labels = [("resource", resource.to_string()), ("direction", direction.to_string())];
    counter!("gateway_stream_bytes_total", &labels).increment(bytes as u64);
}

/// Record a failed stream operation.
pub fn record_stream_error(resource: &str, direction: &'static str, kind: &'static str) {
    let labels = [
        ("resource", resource.to_string()),
        ("direction", direction.to_string()),
        ("kind", kind.to_string()),
    ];
    counter!("gateway_stream_errors_total", &labels).increment(1);
}
