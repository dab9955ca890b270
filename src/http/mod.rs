//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum serve, trace layer, graceful shutdown)
//!     → gateway app: middleware/audit.rs → middleware/cors.rs → forwarder
//!       or
//!     → fallback.rs (500 with the load diagnostic)
//! ```

pub mod fallback;
pub mod middleware;
pub mod server;

pub use fallback::{fallback_router, GENERIC_FAILURE_MESSAGE};
pub use middleware::{attach_middleware, AllowedOrigins, AttachError};
pub use server::HttpServer;
