//! Outbound side of the gateway.
//!
//! # Data Flow
//! ```text
//! Stage needs the backend
//!     → DelegatedRequestBuilder (crate::auth::delegate)
//!     → client.rs (shared pooled client, auth timeout)
//!     → backend response
//!         → authorization strategy decodes it, or
//!         → proxy.rs relays it to the client unchanged
//! ```
//!
//! # Design Decisions
//! - One connection-pooling client per process, shared by every request
//! - Dropping the inbound request future drops the outbound call with it

pub mod client;
pub mod proxy;

pub use client::Upstream;
pub use proxy::ProxyRequest;
