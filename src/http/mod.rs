//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace layer)
//!     → server.rs dispatch (log, match route table)
//!         → no match: 403 Forbidden
//!     → context.rs (GitRequest: inbound request + empty decision)
//!     → chain.rs (authorization stage, capability stage)
//!     → error.rs (map stage failures to status codes)
//!     → Send to client
//! ```

pub mod chain;
pub mod context;
pub mod error;
pub mod server;

pub use chain::{Chain, Flow, Stage};
pub use context::GitRequest;
pub use error::ProxyError;
pub use server::{AppState, HttpServer};
