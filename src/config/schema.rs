//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! gateway. All types derive Serde traits for deserialization from config
//! files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BridgeConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Routing scopes mapping request paths to cluster targets.
    pub routes: Vec<RouteConfig>,

    /// Local cluster participation settings.
    pub cluster: ClusterConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// HTTP response mapping settings.
    pub http: HttpConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// One routing scope: a path prefix plus the three directives a bridged
/// call needs.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier for logging/metrics.
    pub name: String,

    /// Path prefix to match.
    #[serde(default = "default_path_prefix")]
    pub path_prefix: String,

    /// Route priority (higher = checked first).
    #[serde(default)]
    pub priority: u32,

    /// Dialable address of the remote node.
    pub node_address: String,

    /// Cluster-join credential for that node.
    pub shared_secret: String,

    /// Name the worker process is registered under.
    pub registered_process: String,
}

fn default_path_prefix() -> String {
    "/".to_string()
}

/// Local cluster participation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Prefix for the ephemeral local participant names minted per call.
    pub local_name_prefix: String,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            local_name_prefix: "nodegate".to_string(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment + handshake timeout in seconds.
    pub connect_secs: u64,

    /// Reply wait timeout in seconds, measured from after the send.
    pub reply_secs: u64,

    /// Outer HTTP request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            reply_secs: 30,
            request_secs: 60,
        }
    }
}

/// HTTP response mapping settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HttpConfig {
    /// Pass worker status codes through as-is instead of collapsing every
    /// non-200 status to a generic server error.
    pub status_passthrough: bool,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
