//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (ordered scan of the route table)
//!     → matcher.rs (evaluate path pattern)
//!     → Return: first matching Route, or None (dispatcher answers 403)
//!
//! Route Compilation (at startup):
//!     table.rs declares the Git routes in order
//!     → Compile matchers (segment suffixes, fragments)
//!     → Attach handler chains
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path
//! - First match wins, by declaration order only; no specificity ranking
//! - A method mismatch is a miss, never a 405

pub mod matcher;
pub mod router;
pub mod table;

pub use matcher::{Contains, PathMatcher, Segment, SegmentSuffix};
pub use router::{Route, RouteTable};
pub use table::{git_routes, Capabilities};
