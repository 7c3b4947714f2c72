//! Construction of the request sent to the authorization backend.
//!
//! # Responsibilities
//! - Address the backend at `base + request URI + suffix`
//! - Forward every inbound header, credentials included
//! - Strip body-describing headers when no body is forwarded
//! - Carry the client's Host and the proxy version header
//!
//! # Design Decisions
//! - A fresh request per call; nothing is cached or reused
//! - No I/O and no retries; failures go straight back to the caller
//! - The version string is injected at construction, not read from a global

use axum::body::Body;
use axum::http::header::{
    ACCEPT_ENCODING, CONTENT_DISPOSITION, CONTENT_ENCODING, CONTENT_LENGTH, CONTENT_TYPE, HOST,
    TRANSFER_ENCODING,
};
use axum::http::uri::InvalidUri;
use axum::http::{HeaderName, HeaderValue, Request, Uri};
use thiserror::Error;

/// Header identifying the gateway to the backend.
pub const PROXY_VERSION_HEADER: HeaderName = HeaderName::from_static("gitlab-workhorse");

/// Headers describing a request body. Dropped when the delegated request
/// carries none, so the backend never sees a size or encoding for a body
/// that does not exist.
const BODY_HEADERS: [HeaderName; 6] = [
    CONTENT_TYPE,
    CONTENT_ENCODING,
    CONTENT_LENGTH,
    CONTENT_DISPOSITION,
    ACCEPT_ENCODING,
    TRANSFER_ENCODING,
];

#[derive(Debug, Error)]
pub enum RequestConstructionError {
    #[error("invalid delegated request URI {uri:?}: {source}")]
    InvalidUri {
        uri: String,
        #[source]
        source: InvalidUri,
    },

    #[error("delegated request URI {0:?} has no scheme or authority")]
    MissingAuthority(String),

    #[error("proxy version {0:?} is not a valid header value")]
    InvalidVersion(String),

    #[error("failed to build delegated request: {0}")]
    Build(#[from] axum::http::Error),
}

/// Builds delegated requests against one authorization backend.
#[derive(Debug, Clone)]
pub struct DelegatedRequestBuilder {
    backend: String,
    version: HeaderValue,
}

impl DelegatedRequestBuilder {
    /// `backend` is used verbatim as the prefix of every delegated URI.
    pub fn new(backend: impl Into<String>, version: &str) -> Result<Self, RequestConstructionError> {
        if version.is_empty() {
            return Err(RequestConstructionError::InvalidVersion(version.to_string()));
        }
        let version = HeaderValue::from_str(version)
            .map_err(|_| RequestConstructionError::InvalidVersion(version.to_string()))?;
        Ok(Self {
            backend: backend.into(),
            version,
        })
    }

    pub fn backend(&self) -> &str {
        &self.backend
    }

    pub fn version(&self) -> &HeaderValue {
        &self.version
    }

    /// Build the outbound request for `inbound`.
    ///
    /// `body` is `None` for authorization pre-checks and `Some` when the
    /// inbound payload is forwarded. The method is always the inbound one.
    pub fn build<B>(
        &self,
        inbound: &Request<B>,
        body: Option<Body>,
        suffix: &str,
    ) -> Result<Request<Body>, RequestConstructionError> {
        let request_uri = inbound
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        let target = format!("{}{}{}", self.backend, request_uri, suffix);
        let uri: Uri = target
            .parse()
            .map_err(|source| RequestConstructionError::InvalidUri {
                uri: target.clone(),
                source,
            })?;
        if uri.scheme().is_none() || uri.authority().is_none() {
            return Err(RequestConstructionError::MissingAuthority(target));
        }

        let mut headers = inbound.headers().clone();
        if body.is_none() {
            for name in &BODY_HEADERS {
                headers.remove(name);
            }
        }
        // HTTP/2 clients send :authority instead of a Host header.
        if let Some(host) = inbound_host(inbound) {
            headers.insert(HOST, host);
        }
        headers.insert(PROXY_VERSION_HEADER, self.version.clone());

        let mut request = Request::builder()
            .method(inbound.method().clone())
            .uri(uri)
            .body(body.unwrap_or_else(Body::empty))?;
        *request.headers_mut() = headers;
        Ok(request)
    }
}

fn inbound_host<B>(inbound: &Request<B>) -> Option<HeaderValue> {
    inbound.headers().get(HOST).cloned().or_else(|| {
        inbound
            .uri()
            .authority()
            .and_then(|authority| HeaderValue::from_str(authority.as_str()).ok())
    })
}
