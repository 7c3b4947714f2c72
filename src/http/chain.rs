//! Ordered handler chains.
//!
//! # Responsibilities
//! - Define the contract every authorization and capability stage meets
//! - Run stages in declaration order until one responds
//!
//! # Design Decisions
//! - Chains are plain lists built at startup and inspectable by name
//! - A stage failure ends the chain and becomes a client response here

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use axum::response::{IntoResponse, Response};

use crate::http::context::GitRequest;
use crate::http::error::ProxyError;

/// What a stage wants to happen next.
pub enum Flow {
    /// Pass the context on to the following stage.
    Next,
    /// Stop here and send this response.
    Respond(Response),
}

/// One step of a handler chain.
#[async_trait]
pub trait Stage: Send + Sync {
    /// Name used in logs and chain inspection.
    fn name(&self) -> &'static str;

    async fn call(&self, ctx: &mut GitRequest) -> Result<Flow, ProxyError>;
}

#[derive(Clone, Default)]
pub struct Chain {
    stages: Vec<Arc<dyn Stage>>,
}

impl Chain {
    pub fn new(stages: Vec<Arc<dyn Stage>>) -> Self {
        Self { stages }
    }

    pub fn then(mut self, stage: Arc<dyn Stage>) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run every stage in order and return the first response produced.
    pub async fn run(&self, ctx: &mut GitRequest) -> Response {
        for stage in &self.stages {
            match stage.call(ctx).await {
                Ok(Flow::Next) => continue,
                Ok(Flow::Respond(response)) => return response,
                Err(err) => {
                    tracing::error!(stage = stage.name(), error = %err, "Handler stage failed");
                    return err.into_response();
                }
            }
        }
        tracing::error!(stages = ?self.stage_names(), "Handler chain ended without a response");
        ProxyError::EmptyChain.into_response()
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.stage_names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::DelegatedRequestBuilder;
    use crate::upstream::Upstream;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct Count(Arc<AtomicUsize>);

    #[async_trait]
    impl Stage for Count {
        fn name(&self) -> &'static str {
            "count"
        }

        async fn call(&self, _ctx: &mut GitRequest) -> Result<Flow, ProxyError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(Flow::Next)
        }
    }

    struct Reply(StatusCode);

    #[async_trait]
    impl Stage for Reply {
        fn name(&self) -> &'static str {
            "reply"
        }

        async fn call(&self, _ctx: &mut GitRequest) -> Result<Flow, ProxyError> {
            Ok(Flow::Respond(self.0.into_response()))
        }
    }

    struct Fail;

    #[async_trait]
    impl Stage for Fail {
        fn name(&self) -> &'static str {
            "fail"
        }

        async fn call(&self, _ctx: &mut GitRequest) -> Result<Flow, ProxyError> {
            Err(ProxyError::RepositoryNotFound)
        }
    }

    fn context() -> GitRequest {
        let builder = DelegatedRequestBuilder::new("http://127.0.0.1:9", "test").unwrap();
        let upstream = Arc::new(Upstream::new(builder, Duration::from_secs(1)));
        GitRequest::new(
            Request::builder().uri("/foo.git/info/refs").body(Body::empty()).unwrap(),
            upstream,
        )
    }

    #[tokio::test]
    async fn test_stages_run_in_order_until_response() {
        let before = Arc::new(AtomicUsize::new(0));
        let after = Arc::new(AtomicUsize::new(0));
        let chain = Chain::default()
            .then(Arc::new(Count(before.clone())))
            .then(Arc::new(Reply(StatusCode::ACCEPTED)))
            .then(Arc::new(Count(after.clone())));

        let response = chain.run(&mut context()).await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(before.load(Ordering::SeqCst), 1);
        assert_eq!(after.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_error_stops_chain() {
        let after = Arc::new(AtomicUsize::new(0));
        let chain = Chain::new(vec![
            Arc::new(Fail) as Arc<dyn Stage>,
            Arc::new(Count(after.clone())),
        ]);

        let response = chain.run(&mut context()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(after.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_exhausted_chain_is_internal_error() {
        let stage: Arc<dyn Stage> = Arc::new(Count(Arc::new(AtomicUsize::new(0))));
        let chain = Chain::new(vec![stage]);
        let response = chain.run(&mut context()).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_stage_names() {
        let chain = Chain::default()
            .then(Arc::new(Fail))
            .then(Arc::new(Reply(StatusCode::OK)));
        assert_eq!(chain.stage_names(), vec!["fail", "reply"]);
        assert_eq!(format!("{chain:?}"), r#"["fail", "reply"]"#);
    }
}
