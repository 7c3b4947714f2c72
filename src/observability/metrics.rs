//! Metrics collection and exposition.
//!
//! # Metrics
//! - `git_gateway_requests_total` (counter): requests by route, method;
//!   `route="none"` for requests answered 403
//! - `git_gateway_auth_requests_total` (counter): backend calls by status
//! - `git_gateway_auth_duration_seconds` (histogram): backend latency

use std::net::SocketAddr;
use std::time::Instant;

use axum::http::{Method, StatusCode};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(route: &'static str, method: &Method) {
    counter!(
        "git_gateway_requests_total",
        "route" => route,
        "method" => method.to_string()
    )
    .increment(1);
}

pub fn record_authorization(status: StatusCode, started: Instant) {
    counter!(
        "git_gateway_auth_requests_total",
        "status" => status.as_u16().to_string()
    )
    .increment(1);
    histogram!("git_gateway_auth_duration_seconds").record(started.elapsed().as_secs_f64());
}
