//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create Axum Router with the dispatcher as the only handler
//! - Wire up middleware (tracing, request ID)
//! - Bind server to listener, stop on shutdown signal
//! - Dispatch requests through the route table
//!
//! # Design Decisions
//! - Unknown endpoints get 403, never 404 or 405: the smart HTTP
//!   protocol requires Forbidden for unrecognized services
//! - Every request is logged before matching

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::auth::RequestConstructionError;
use crate::config::ProxyConfig;
use crate::http::context::GitRequest;
use crate::observability::metrics;
use crate::routing::{git_routes, Capabilities, RouteTable};
use crate::upstream::Upstream;

/// Application state injected into the dispatcher.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub upstream: Arc<Upstream>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a server with the Git route table and pass-through capabilities.
    pub fn new(config: ProxyConfig) -> Result<Self, RequestConstructionError> {
        let upstream = Arc::new(Upstream::from_config(&config.auth_backend)?);
        let routes = Arc::new(git_routes(&Capabilities::pass_through()));
        Ok(Self::with_routes(config, routes, upstream))
    }

    /// Create a server around a caller-supplied route table.
    pub fn with_routes(config: ProxyConfig, routes: Arc<RouteTable>, upstream: Arc<Upstream>) -> Self {
        let router = Self::build_router(AppState { routes, upstream });
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Serve connections until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            auth_backend = %self.config.auth_backend.url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Match the request against the route table and run the route's chain.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let method = request.method().clone();
    tracing::info!(method = %method, uri = %request.uri(), "Request");

    let Some(route) = state.routes.match_route(&method, request.uri().path()) else {
        metrics::record_request("none", &method);
        return (StatusCode::FORBIDDEN, "Forbidden").into_response();
    };
    metrics::record_request(route.name(), &method);
    tracing::debug!(route = route.name(), "Route matched");

    let mut ctx = GitRequest::new(request, state.upstream.clone());
    route.chain().run(&mut ctx).await
}
