//! Per-request context threaded through a handler chain.

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;

use crate::auth::AuthorizationDecision;
use crate::upstream::Upstream;

/// An inbound request decorated with what the authorization backend
/// returned for it.
///
/// Created by the dispatcher right before the matched chain runs and
/// dropped with the response. Never shared between requests.
pub struct GitRequest {
    /// The original inbound request.
    pub request: Request<Body>,

    /// Empty until an authorization stage fills it in.
    pub decision: AuthorizationDecision,

    /// Backend address and the shared outbound client.
    pub upstream: Arc<Upstream>,
}

impl GitRequest {
    pub fn new(request: Request<Body>, upstream: Arc<Upstream>) -> Self {
        Self {
            request,
            decision: AuthorizationDecision::default(),
            upstream,
        }
    }

    /// Take the inbound body, leaving an empty one behind.
    pub fn take_body(&mut self) -> Body {
        std::mem::take(self.request.body_mut())
    }
}

impl std::fmt::Debug for GitRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRequest")
            .field("method", self.request.method())
            .field("uri", self.request.uri())
            .field("decision", &self.decision)
            .finish()
    }
}
