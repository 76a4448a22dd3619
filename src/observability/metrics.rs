//! Metrics collection and exposition.
//!
//! # Metrics
//! - `completion_attempts_total` (counter): remote call attempts by operation
//! - `completion_retries_total` (counter): backoff retries by operation, kind
//! - `completion_timeouts_total` (counter): attempts abandoned by the executor
//! - `completion_embedded_errors_total` (counter): error payloads in 2xx responses
//!
//! Recording is a no-op until a recorder is installed, so library users that
//! never call [`init_metrics`] pay nothing.

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_attempt(operation: &'static str) {
    counter!("completion_attempts_total", "operation" => operation).increment(1);
}

pub fn record_retry(operation: &'static str, kind: &'static str) {
    counter!("completion_retries_total", "operation" => operation, "kind" => kind).increment(1);
}

pub fn record_timeout() {
    counter!("completion_timeouts_total").increment(1);
}

pub fn record_embedded_error(operation: &'static str) {
    counter!("completion_embedded_errors_total", "operation" => operation).increment(1);
}
