//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     bootstrap.rs (call factory once) → attach middleware | fallback
//!     → Application → HttpServer
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain connections → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Bootstrap completes before the listener is bound
//! - The chosen application is never replaced for the process lifetime

pub mod bootstrap;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use bootstrap::{bootstrap, bootstrap_from_config, BootstrapCell, LoadFault, LoadOutcome};
pub use shutdown::Shutdown;
pub use startup::{assemble, start, AppMode, Application};
