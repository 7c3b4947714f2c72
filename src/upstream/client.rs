//! Shared client for the authorization backend.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::auth::{DelegatedRequestBuilder, RequestConstructionError};
use crate::config::AuthBackendConfig;
use crate::http::ProxyError;

/// Proxy-wide handle on the authorization backend.
pub struct Upstream {
    client: Client<HttpConnector, Body>,
    builder: DelegatedRequestBuilder,
    timeout: Duration,
}

impl Upstream {
    pub fn new(builder: DelegatedRequestBuilder, timeout: Duration) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self {
            client,
            builder,
            timeout,
        }
    }

    pub fn from_config(config: &AuthBackendConfig) -> Result<Self, RequestConstructionError> {
        let builder = DelegatedRequestBuilder::new(config.url.clone(), &config.version)?;
        Ok(Self::new(builder, Duration::from_secs(config.timeout_secs)))
    }

    pub fn builder(&self) -> &DelegatedRequestBuilder {
        &self.builder
    }

    /// Send a delegated request, waiting at most the configured timeout
    /// for the response head.
    pub async fn send(&self, request: Request<Body>) -> Result<Response<Body>, ProxyError> {
        match tokio::time::timeout(self.timeout, self.client.request(request)).await {
            Ok(Ok(response)) => Ok(response.map(Body::new)),
            Ok(Err(e)) => Err(ProxyError::Upstream(e)),
            Err(_) => Err(ProxyError::Timeout(self.timeout)),
        }
    }
}

impl std::fmt::Debug for Upstream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Upstream")
            .field("backend", &self.builder.backend())
            .field("timeout", &self.timeout)
            .finish()
    }
}
