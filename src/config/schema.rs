//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

/// Root configuration for the resolver service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ResolverConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Public site settings used to build redirect targets.
    pub site: SiteConfig,

    /// Listing store connection.
    pub store: StoreConfig,

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

/// Public site settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Absolute origin prepended to redirect targets (e.g., "https://baltland.ru").
    /// When unset, `Location` headers carry bare paths.
    pub base_url: Option<String>,

    /// Catalog page used as the fallback target.
    pub catalog_path: String,
}

impl SiteConfig {
    /// Parsed `base_url`. Validation guarantees it parses when set.
    pub fn base(&self) -> Option<Url> {
        self.base_url.as_deref().and_then(|raw| Url::parse(raw).ok())
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            catalog_path: "/catalog".to_string(),
        }
    }
}

/// Which listing store implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Hosted database REST API.
    #[default]
    Postgrest,
    /// Process-local map, optionally seeded from a JSON file.
    Memory,
}

/// Listing store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,

    /// Base URL of the REST API (e.g., "https://abc.supabase.co").
    pub url: String,

    /// Path between the base URL and the table name.
    pub rest_path: String,

    /// Service API key. Overridden by `PLOT_RESOLVER_STORE_API_KEY`.
    pub api_key: Option<String>,

    /// Table holding the listings.
    pub table: String,

    /// Upper bound for one lookup, in milliseconds.
    pub timeout_ms: u64,

    /// JSON array of rows for the memory backend.
    pub seed_path: Option<PathBuf>,
}

impl StoreConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Postgrest,
            url: String::new(),
            rest_path: "rest/v1".to_string(),
            api_key: None,
            table: "land_plots".to_string(),
            timeout_ms: 3000,
            seed_path: None,
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
        Self { request_secs: 10 }
    }
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
