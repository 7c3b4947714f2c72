//! Authorization strategies.
//!
//! Each strategy asks the backend about the inbound request, stores the
//! decision on the context, and checks that the fields its capability
//! depends on are present before letting the chain continue.

use std::path::Path;
use std::time::Instant;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::Response;

use crate::auth::repo::looks_like_repo;
use crate::http::{Flow, GitRequest, ProxyError, Stage};
use crate::observability::metrics;

/// Largest authorization response body that will be decoded.
const MAX_DECISION_BYTES: usize = 1024 * 1024;

/// Ask the backend whether `ctx` may proceed.
///
/// Returns the backend's response when it is anything other than 200, so
/// the caller can relay it (challenges, redirects, denials) untouched.
/// On 200 the JSON body is decoded into `ctx.decision`.
pub async fn pre_authorize(
    ctx: &mut GitRequest,
    suffix: &str,
) -> Result<Option<Response>, ProxyError> {
    let request = ctx.upstream.builder().build(&ctx.request, None, suffix)?;
    let started = Instant::now();
    let response = ctx.upstream.send(request).await?;
    metrics::record_authorization(response.status(), started);

    if response.status() != StatusCode::OK {
        tracing::info!(
            status = %response.status(),
            uri = %ctx.request.uri(),
            "Authorization backend did not approve request"
        );
        return Ok(Some(response));
    }

    let body = axum::body::to_bytes(response.into_body(), MAX_DECISION_BYTES)
        .await
        .map_err(ProxyError::Body)?;
    ctx.decision = serde_json::from_slice(&body)?;
    Ok(None)
}

/// Authorization for repository access: ref advertisement, RPCs, archives.
#[derive(Debug, Clone, Copy, Default)]
pub struct RepoPreAuthorize;

#[async_trait]
impl Stage for RepoPreAuthorize {
    fn name(&self) -> &'static str {
        "repo_pre_authorize"
    }

    async fn call(&self, ctx: &mut GitRequest) -> Result<Flow, ProxyError> {
        if let Some(response) = pre_authorize(ctx, "").await? {
            return Ok(Flow::Respond(response));
        }
        let repo_path = ctx
            .decision
            .repo_path
            .as_deref()
            .ok_or(ProxyError::MissingField("RepoPath"))?;
        if !looks_like_repo(repo_path) {
            return Err(ProxyError::RepositoryNotFound);
        }
        Ok(Flow::Next)
    }
}

/// Authorization for LFS object uploads.
#[derive(Debug, Clone, Copy, Default)]
pub struct LfsAuthorize;

#[async_trait]
impl Stage for LfsAuthorize {
    fn name(&self) -> &'static str {
        "lfs_authorize"
    }

    async fn call(&self, ctx: &mut GitRequest) -> Result<Flow, ProxyError> {
        if let Some(response) = pre_authorize(ctx, "/authorize").await? {
            return Ok(Flow::Respond(response));
        }
        let store = ctx
            .decision
            .store_lfs_path
            .as_deref()
            .ok_or(ProxyError::MissingField("StoreLFSPath"))?;
        if ctx.decision.lfs_oid.is_none() {
            return Err(ProxyError::MissingField("LfsOid"));
        }
        create_private_dir(store).await?;
        Ok(Flow::Next)
    }
}

/// Authorization for CI artifact uploads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactsAuthorize;

#[async_trait]
impl Stage for ArtifactsAuthorize {
    fn name(&self) -> &'static str {
        "artifacts_authorize"
    }

    async fn call(&self, ctx: &mut GitRequest) -> Result<Flow, ProxyError> {
        if let Some(response) = pre_authorize(ctx, "/authorize").await? {
            return Ok(Flow::Respond(response));
        }
        let temp = ctx
            .decision
            .temp_path
            .as_deref()
            .ok_or(ProxyError::MissingField("TempPath"))?;
        create_private_dir(temp).await?;
        Ok(Flow::Next)
    }
}

async fn create_private_dir(path: &Path) -> std::io::Result<()> {
    let mut builder = tokio::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(0o700);
    builder.create(path).await
}
