//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.

use serde::{Deserialize, Serialize};

use crate::table::DEFAULT_PAGE_SIZE;

/// Root configuration for a bentoapp server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Application identity and page shell settings.
    pub app: AppSection,

    /// Table defaults.
    pub tables: TablesConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Response hardening.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8000".to_string(),
        }
    }
}

/// Application identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppSection {
    /// Document title used by the page shell.
    pub title: String,

    /// URL of the htmx script loaded by the page shell.
    pub htmx_src: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            title: "bentoapp".to_string(),
            htmx_src: "https://unpkg.com/htmx.org@1.9.12".to_string(),
        }
    }
}

/// Table defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TablesConfig {
    /// Rows per page for tables that do not set their own.
    pub default_page_size: usize,
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Add conservative security headers to every response.
    pub enable_headers: bool,
    /// Maximum request body size in bytes (form posts and uploads).
    pub max_body_size: usize,
    /// Gzip responses larger than 512 bytes.
    pub compression: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
            max_body_size: 2 * 1024 * 1024, // 2MB
            compression: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
