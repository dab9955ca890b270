//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, apply CLI overrides)
//!     → validation.rs (semantic checks)
//!     → ShimConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; there is no reload
//! - All fields have defaults so the shim runs with no file at all
//! - Gateway reachability is a bootstrap concern, not a validation one

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, resolve_config, ConfigError, Overrides};
pub use schema::{CorsConfig, GatewayConfig, ListenerConfig, ObservabilityConfig, ShimConfig};
