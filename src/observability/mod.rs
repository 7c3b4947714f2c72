//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatcher and authorization strategies produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout log stream
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Every inbound request is logged with method and URI, matched or not
//! - Request ID flows through the tower-http layers
//! - Metrics are cheap (atomic increments) and recorded even when no
//!   exporter is installed

pub mod logging;
pub mod metrics;
