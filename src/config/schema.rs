//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Authorization backend that every routed request is delegated to.
    pub auth_backend: AuthBackendConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8181").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8181".to_string(),
        }
    }
}

/// Authorization backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthBackendConfig {
    /// Base address the original request URI is appended to,
    /// e.g. "http://localhost:8080". No trailing path is stripped.
    pub url: String,

    /// Upper bound on a single authorization round trip, in seconds.
    pub timeout_secs: u64,

    /// Value sent in the proxy-identifying header on every delegated request.
    pub version: String,
}

impl Default for AuthBackendConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8080".to_string(),
            timeout_secs: 30,
            version: env!("CARGO_PKG_VERSION").to_string(),
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
            metrics_address: "127.0.0.1:9229".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: ProxyConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8181");
        assert_eq!(config.auth_backend.url, "http://localhost:8080");
        assert_eq!(config.auth_backend.timeout_secs, 30);
        assert_eq!(config.auth_backend.version, env!("CARGO_PKG_VERSION"));
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: ProxyConfig = toml::from_str(
            r#"
            [auth_backend]
            url = "http://auth.internal"
            "#,
        )
        .unwrap();
        assert_eq!(config.auth_backend.url, "http://auth.internal");
        assert_eq!(config.auth_backend.timeout_secs, 30);
        assert_eq!(config.listener.bind_address, "127.0.0.1:8181");
    }
}
