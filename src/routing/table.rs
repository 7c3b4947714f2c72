//! The Git-over-HTTP route table.
//!
//! Order matters: routes are scanned top to bottom and the first match
//! wins. Anything that matches no entry is answered 403, as the smart
//! HTTP protocol requires for unknown service endpoints.

use std::sync::Arc;

use axum::http::Method;

use crate::auth::{ArtifactsAuthorize, LfsAuthorize, RepoPreAuthorize};
use crate::http::{Chain, Stage};
use crate::routing::matcher::{Contains, SegmentSuffix};
use crate::routing::router::{Route, RouteTable};
use crate::upstream::ProxyRequest;

/// Terminal handlers for each capability family.
///
/// The gateway only routes and authorizes; the application embedding it
/// decides what actually serves each family.
#[derive(Clone)]
pub struct Capabilities {
    /// Smart HTTP ref advertisement.
    pub info_refs: Arc<dyn Stage>,
    /// upload-pack and receive-pack RPC streams.
    pub post_rpc: Arc<dyn Stage>,
    pub archive: Arc<dyn Stage>,
    /// Stored uploads, LFS downloads and artifact downloads.
    pub send_file: Arc<dyn Stage>,
    pub store_lfs_object: Arc<dyn Stage>,
    /// Multipart CI artifact uploads.
    pub file_uploads: Arc<dyn Stage>,
    /// Unauthorized raw forwarding (artifact deletion).
    pub proxy: Arc<dyn Stage>,
}

impl Capabilities {
    /// Every family served by relaying to the backend once authorized.
    pub fn pass_through() -> Self {
        Self::uniform(Arc::new(ProxyRequest))
    }

    pub fn uniform(stage: Arc<dyn Stage>) -> Self {
        Self {
            info_refs: stage.clone(),
            post_rpc: stage.clone(),
            archive: stage.clone(),
            send_file: stage.clone(),
            store_lfs_object: stage.clone(),
            file_uploads: stage.clone(),
            proxy: stage,
        }
    }
}

/// Build the route table in protocol order.
pub fn git_routes(caps: &Capabilities) -> RouteTable {
    let repo: Arc<dyn Stage> = Arc::new(RepoPreAuthorize);
    let lfs: Arc<dyn Stage> = Arc::new(LfsAuthorize);
    let artifacts: Arc<dyn Stage> = Arc::new(ArtifactsAuthorize);

    let authorized = |auth: &Arc<dyn Stage>, capability: &Arc<dyn Stage>| {
        Chain::new(vec![auth.clone(), capability.clone()])
    };
    let bare = |capability: &Arc<dyn Stage>| Chain::new(vec![capability.clone()]);

    let mut routes = vec![
        Route::new(
            "info_refs",
            Method::GET,
            SegmentSuffix::parse("/info/refs"),
            authorized(&repo, &caps.info_refs),
        ),
        Route::new(
            "upload_pack",
            Method::POST,
            SegmentSuffix::parse("/git-upload-pack"),
            authorized(&repo, &caps.post_rpc),
        ),
        Route::new(
            "receive_pack",
            Method::POST,
            SegmentSuffix::parse("/git-receive-pack"),
            authorized(&repo, &caps.post_rpc),
        ),
    ];

    for (name, template) in [
        ("archive", "/repository/archive"),
        ("archive_zip", "/repository/archive.zip"),
        ("archive_tar", "/repository/archive.tar"),
        ("archive_tar_gz", "/repository/archive.tar.gz"),
        ("archive_tar_bz2", "/repository/archive.tar.bz2"),
    ] {
        routes.push(Route::new(
            name,
            Method::GET,
            SegmentSuffix::parse(template),
            authorized(&repo, &caps.archive),
        ));
    }

    routes.extend([
        Route::new(
            "uploads",
            Method::GET,
            Contains::new("/uploads/"),
            bare(&caps.send_file),
        ),
        // Git LFS
        Route::new(
            "lfs_store",
            Method::PUT,
            SegmentSuffix::parse("/gitlab-lfs/objects/{hex64}/{digits}"),
            authorized(&lfs, &caps.store_lfs_object),
        ),
        Route::new(
            "lfs_fetch",
            Method::GET,
            SegmentSuffix::parse("/gitlab-lfs/objects/{hex64}"),
            bare(&caps.send_file),
        ),
        // CI artifacts
        Route::new(
            "builds_download",
            Method::GET,
            SegmentSuffix::parse("/builds/download"),
            bare(&caps.send_file),
        ),
        Route::new(
            "artifacts_fetch",
            Method::GET,
            SegmentSuffix::parse("/ci/api/v1/builds/{digits}/artifacts"),
            bare(&caps.send_file),
        ),
        Route::new(
            "artifacts_upload",
            Method::POST,
            SegmentSuffix::parse("/ci/api/v1/builds/{digits}/artifacts"),
            authorized(&artifacts, &caps.file_uploads),
        ),
        Route::new(
            "artifacts_delete",
            Method::DELETE,
            SegmentSuffix::parse("/ci/api/v1/builds/{digits}/artifacts"),
            bare(&caps.proxy),
        ),
    ]);

    RouteTable::new(routes)
}
