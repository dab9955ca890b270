//! Observability subsystem.
//!
//! All subsystems emit `tracing` events; `logging.rs` installs the
//! subscriber that writes them to stdout.

pub mod logging;
