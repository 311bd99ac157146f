//! Configuration schema definitions.
//!
//! Every section is `#[serde(default)]`, so an empty file yields the same
//! relay as running without a config file at all.

use serde::{Deserialize, Serialize};

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Relay endpoint settings.
    pub relay: RelayEndpointConfig,

    /// Inbound request limits.
    pub limits: LimitsConfig,

    /// Outbound HTTP client settings.
    pub outbound: OutboundConfig,

    /// Journal lookup surface.
    pub admin: AdminConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Relay endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RelayEndpointConfig {
    /// Path the relay endpoint is mounted on. Only POST is accepted there.
    pub path: String,
}

impl Default for RelayEndpointConfig {
    fn default() -> Self {
        Self {
            path: "/curl".to_string(),
        }
    }
}

/// Inbound request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Largest accepted request description body, in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Outbound client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutboundConfig {
    /// Whole-call timeout. Unset means the client default (none).
    pub timeout_secs: Option<u64>,

    /// Honour HTTP_PROXY / HTTPS_PROXY / NO_PROXY from the environment.
    pub use_system_proxy: bool,
}

impl Default for OutboundConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            use_system_proxy: true,
        }
    }
}

/// Admin (journal lookup) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Mount the `/admin` routes on the relay listener.
    pub enabled: bool,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default `EnvFilter` directive, used when `RUST_LOG` is not set.
    pub log_filter: String,

    /// Start the Prometheus exporter.
    pub metrics_enabled: bool,

    /// Prometheus exporter listen address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "curl_relay=info,tower_http=info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
