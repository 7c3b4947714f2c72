//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Reject backend addresses that cannot prefix a request URI
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("auth_backend.url {0:?} is not a valid URL")]
    BackendUrl(String),

    #[error("auth_backend.url must use http, got {0:?}")]
    BackendScheme(String),

    #[error("auth_backend.url must not carry a query or fragment")]
    BackendSuffix,

    #[error("auth_backend.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("auth_backend.version must be a non-empty header value")]
    Version,

    #[error("observability.metrics_address {0:?} is not a socket address")]
    MetricsAddress(String),
}

pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let backend = &config.auth_backend;
    match Url::parse(&backend.url) {
        Ok(url) => {
            // The outbound client speaks plain HTTP only.
            if url.scheme() != "http" {
                errors.push(ValidationError::BackendScheme(url.scheme().to_string()));
            }
            // The inbound request URI is appended verbatim.
            if url.query().is_some() || url.fragment().is_some() {
                errors.push(ValidationError::BackendSuffix);
            }
        }
        Err(_) => errors.push(ValidationError::BackendUrl(backend.url.clone())),
    }

    if backend.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if backend.version.is_empty() || HeaderValue::from_str(&backend.version).is_err() {
        errors.push(ValidationError::Version);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
