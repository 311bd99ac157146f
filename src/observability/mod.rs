//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! http, relay and store code produce:
//!     → tracing events (logging.rs installs the subscriber)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stdout log lines
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID (`x-request-id`) is attached to every relay log line
//! - Metrics are cheap facade calls; no exporter means no cost beyond a lookup

pub mod logging;
pub mod metrics;
