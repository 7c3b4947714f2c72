//! Authorization delegation subsystem.
//!
//! # Data Flow
//! ```text
//! GitRequest (inbound request, empty decision)
//!     → strategy.rs (pick suffix, call backend)
//!         → delegate.rs (build outbound request, sanitize headers)
//!         → upstream (shared client, bounded by auth timeout)
//!     → non-200: relay backend response to client
//!     → 200: decision.rs (decode JSON into AuthorizationDecision)
//!     → strategy-specific checks (repo.rs probe, scratch directories)
//!     → next stage in the chain
//! ```
//!
//! # Design Decisions
//! - The gateway never decides access itself; the backend does
//! - Decision fields are `None` or valid, never empty strings
//! - Building a delegated request performs no I/O

pub mod decision;
pub mod delegate;
pub mod repo;
pub mod strategy;

pub use decision::AuthorizationDecision;
pub use delegate::{DelegatedRequestBuilder, RequestConstructionError, PROXY_VERSION_HEADER};
pub use repo::looks_like_repo;
pub use strategy::{ArtifactsAuthorize, LfsAuthorize, RepoPreAuthorize};
