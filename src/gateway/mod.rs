//! Gateway factory seam.
//!
//! # Data Flow
//! ```text
//! GatewayConfig
//!     → registry.rs (resolve factory by name)
//!     → AppFactory::create_app()
//!     → GatewayApp (router + route table)
//!     → lifecycle::bootstrap classifies the result
//! ```
//!
//! # Design Decisions
//! - The gateway is opaque: the shim only sees a router and the route
//!   patterns the factory registered
//! - One operation on the trait so tests can substitute stub factories
//! - Factories are synchronous; nothing is served until bootstrap ends

pub mod registry;
pub mod upstream;

use std::fmt;

use axum::routing::MethodRouter;
use axum::Router;
use thiserror::Error;

pub use registry::{resolve_factory, KNOWN_FACTORIES};
pub use upstream::UpstreamFactory;

/// Errors a factory can report instead of an application.
#[derive(Debug, Clone, Error)]
pub enum FactoryError {
    /// The gateway could not be located or is not usable from here.
    #[error("{0}")]
    Unavailable(String),

    /// The gateway was found but building the application failed.
    #[error("{0}")]
    Construction(String),
}

/// Builds a ready-to-serve gateway application.
pub trait AppFactory: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Construct the application. Called at most once per process.
    fn create_app(&self) -> Result<GatewayApp, FactoryError>;
}

/// A gateway application: the router to serve and the route patterns it
/// was built with.
#[derive(Clone, Default)]
pub struct GatewayApp {
    router: Router,
    routes: Vec<String>,
}

impl GatewayApp {
    /// Create an application with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route and record its pattern in the route table.
    pub fn route(mut self, path: &str, method_router: MethodRouter) -> Self {
        self.router = self.router.route(path, method_router);
        self.routes.push(path.to_string());
        self
    }

    /// Wrap a router built elsewhere, along with its route patterns.
    pub fn from_parts(router: Router, routes: Vec<String>) -> Self {
        Self { router, routes }
    }

    /// Route patterns registered by the factory.
    pub fn routes(&self) -> &[String] {
        &self.routes
    }

    pub fn has_routes(&self) -> bool {
        !self.routes.is_empty()
    }

    /// Transform the router (e.g. to add layers) keeping the route table.
    pub fn map_router(self, f: impl FnOnce(Router) -> Router) -> Self {
        Self {
            router: f(self.router),
            routes: self.routes,
        }
    }

    pub fn into_router(self) -> Router {
        self.router
    }
}

impl fmt::Debug for GatewayApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayApp")
            .field("routes", &self.routes)
            .finish_non_exhaustive()
    }
}
