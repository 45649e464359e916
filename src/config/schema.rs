//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the update service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the update service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct UpdateConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream release API settings.
    pub upstream: UpstreamConfig,

    /// Proxied asset settings.
    pub asset: AssetConfig,

    /// Exposed endpoint paths.
    pub routes: RoutesConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

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

/// GitHub Releases API location and client identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// API root, without trailing path (e.g., "https://api.github.com").
    pub api_base_url: String,

    /// Repository owner.
    pub owner: String,

    /// Repository name.
    pub repo: String,

    /// User-Agent sent on every upstream request.
    pub user_agent: String,

    /// Honour HTTP(S)_PROXY environment settings.
    pub use_system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
            owner: "nullvalue0".to_string(),
            repo: "WiRSa".to_string(),
            user_agent: "WiRSa Version Check".to_string(),
            use_system_proxy: true,
        }
    }
}

/// Proxied asset settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Filename advertised in Content-Disposition.
    pub filename: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            filename: "wirsa.bin".to_string(),
        }
    }
}

/// Paths the two endpoints are mounted on.
///
/// Defaults match the URLs deployed firmware already polls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutesConfig {
    pub version_path: String,
    pub binary_path: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            version_path: "/wirsa-v3.php".to_string(),
            binary_path: "/wirsa-bin-v3.php".to_string(),
        }
    }
}

/// Timeout configuration. Every timeout is disabled unless set.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Upstream connection establishment timeout in seconds.
    pub connect_secs: Option<u64>,

    /// Total time allowed for a single upstream fetch in seconds.
    pub upstream_secs: Option<u64>,

    /// Total time allowed for serving one client request in seconds.
    pub request_secs: Option<u64>,
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
