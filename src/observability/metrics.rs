//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_calls_total` (counter): relay calls by outcome
//! - `relay_outbound_duration_seconds` (histogram): outbound call latency
//! - `relay_journal_entries` (gauge): entries held per store
//!
//! Recording goes through the `metrics` facade and is a no-op until an
//! exporter is installed.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter on its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Prometheus exporter listening");
    Ok(())
}

/// Count one finished relay call. `outcome` is "ok" or a `RelayError::kind`.
pub fn record_call(outcome: &'static str) {
    ::metrics::counter!("relay_calls_total", "outcome" => outcome).increment(1);
}

/// Record the latency of one outbound call.
pub fn record_outbound(start: Instant, success: bool) {
    let result = if success { "ok" } else { "error" };
    ::metrics::histogram!("relay_outbound_duration_seconds", "result" => result)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_journal_size(store: &'static str, size: usize) {
    ::metrics::gauge!("relay_journal_entries", "store" => store).set(size as f64);
}
