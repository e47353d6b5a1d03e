//! Metrics collection and exposition.
//!
//! # Metrics
//! - `resolver_redirects_total` (counter): responses by endpoint and outcome
//! - `resolver_lookup_duration_seconds` (histogram): store latency by key kind
//! - `resolver_lookup_failures_total` (counter): timeouts vs store errors
//! - `resolver_integrity_anomalies_total` (counter): duplicate rows for a unique key

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_redirect(endpoint: &'static str, outcome: &'static str) {
    counter!("resolver_redirects_total", "endpoint" => endpoint, "outcome" => outcome).increment(1);
}

pub fn record_lookup(key_kind: &'static str, start: Instant) {
    histogram!("resolver_lookup_duration_seconds", "key" => key_kind)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_lookup_failure(kind: &'static str) {
    counter!("resolver_lookup_failures_total", "kind" => kind).increment(1);
}

pub fn record_integrity_anomaly() {
    counter!("resolver_integrity_anomalies_total").increment(1);
}
