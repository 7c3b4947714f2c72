//! Raw pass-through to the backend.

use async_trait::async_trait;

use crate::http::{Flow, GitRequest, ProxyError, Stage};

/// Forwards the inbound request, body included, to the backend and
/// relays whatever it answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProxyRequest;

#[async_trait]
impl Stage for ProxyRequest {
    fn name(&self) -> &'static str {
        "proxy_request"
    }

    async fn call(&self, ctx: &mut GitRequest) -> Result<Flow, ProxyError> {
        let body = ctx.take_body();
        let request = ctx.upstream.builder().build(&ctx.request, Some(body), "")?;
        let response = ctx.upstream.send(request).await?;
        tracing::debug!(status = %response.status(), "Relaying backend response");
        Ok(Flow::Respond(response))
    }
}
