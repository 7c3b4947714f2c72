//! Front door for Git-over-HTTP traffic.
//!
//! Routes smart HTTP, LFS, archive, upload and CI artifact requests
//! through an ordered route table and delegates every access decision to
//! an external authorization backend.

pub mod auth;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod upstream;

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
