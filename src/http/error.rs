use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::auth::RequestConstructionError;

/// Failures raised by handler stages.
///
/// Only the status line and a generic reason reach the client; the
/// detailed message is logged by the chain that ran the failing stage.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("failed to construct delegated request: {0}")]
    RequestConstruction(#[from] RequestConstructionError),

    #[error("upstream request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),

    #[error("upstream request timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to read upstream response: {0}")]
    Body(#[source] axum::Error),

    #[error("invalid authorization response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("authorization response is missing {0}")]
    MissingField(&'static str),

    #[error("repository not found")]
    RepositoryNotFound,

    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),

    #[error("handler chain produced no response")]
    EmptyChain,
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::RepositoryNotFound => StatusCode::NOT_FOUND,
            ProxyError::Upstream(_) | ProxyError::Body(_) => StatusCode::BAD_GATEWAY,
            ProxyError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::RequestConstruction(_)
            | ProxyError::Decode(_)
            | ProxyError::MissingField(_)
            | ProxyError::Io(_)
            | ProxyError::EmptyChain => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let reason = status.canonical_reason().unwrap_or("Error");
        (status, reason).into_response()
    }
}
