//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → command-line overrides (main.rs)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc to the dispatcher and authorization strategies
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the route table depends on it
//! - All fields have defaults to allow an empty or missing config file
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{AuthBackendConfig, ListenerConfig, ObservabilityConfig, ProxyConfig};
pub use validation::{validate_config, ValidationError};
