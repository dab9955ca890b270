//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the shim.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway shim.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ShimConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Which gateway factory to load and how to reach it.
    pub gateway: GatewayConfig,

    /// Cross-origin policy for the loaded gateway.
    pub cors: CorsConfig,

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

/// Gateway factory configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Registry name of the factory to resolve (e.g., "upstream").
    pub factory: String,

    /// Base URL of the externally running gateway process.
    pub upstream_url: String,

    /// URL prefixes under which the gateway API is exposed.
    pub mount_paths: Vec<String>,

    /// Upper bound for a single forwarded request, in seconds.
    pub request_timeout_secs: u64,

    /// Emit debug-level logs for the gateway module.
    pub debug: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            factory: "upstream".to_string(),
            upstream_url: "http://127.0.0.1:1337".to_string(),
            mount_paths: vec!["/v1".to_string()],
            request_timeout_secs: 120,
            debug: false,
        }
    }
}

/// Cross-origin configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Front-end origins that are always allowed.
    pub allowed_origins: Vec<String>,

    /// Environment variable holding the current deployment's hostname.
    pub deployment_host_env: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "https://www.chloe.16-b.it".to_string(),
                "http://localhost:3000".to_string(),
            ],
            deployment_host_env: "VERCEL_URL".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: ShimConfig = toml::from_str("").unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:8000");
        assert_eq!(config.gateway.factory, "upstream");
        assert_eq!(config.gateway.mount_paths, vec!["/v1".to_string()]);
        assert_eq!(config.cors.allowed_origins.len(), 2);
        assert_eq!(config.cors.deployment_host_env, "VERCEL_URL");
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config: ShimConfig = toml::from_str(
            r#"
            [gateway]
            upstream_url = "http://10.0.0.5:1337"
            debug = true

            [cors]
            allowed_origins = ["https://app.example.com"]
            "#,
        )
        .unwrap();

        assert_eq!(config.gateway.upstream_url, "http://10.0.0.5:1337");
        assert!(config.gateway.debug);
        assert_eq!(config.gateway.request_timeout_secs, 120);
        assert_eq!(config.cors.allowed_origins, vec!["https://app.example.com".to_string()]);
        assert_eq!(config.cors.deployment_host_env, "VERCEL_URL");
    }
}
