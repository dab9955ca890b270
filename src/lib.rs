//! Gateway deployment shim library.
//!
//! Loads a conversational-AI gateway through a factory, decorates it with
//! CORS and request-audit logging, and falls back to an error responder
//! when the gateway cannot be loaded.

pub mod config;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::ShimConfig;
pub use gateway::{AppFactory, FactoryError, GatewayApp};
pub use http::HttpServer;
pub use lifecycle::{BootstrapCell, LoadFault, LoadOutcome, Shutdown};
