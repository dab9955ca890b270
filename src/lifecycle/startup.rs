//! Startup orchestration.
//!
//! # Responsibilities
//! - Run the one-time bootstrap
//! - Decorate a loaded gateway, or substitute the fallback responder
//! - Hand a single immutable application to the server
//!
//! # Design Decisions
//! - Load faults never stop the process; the fallback reports them
//! - Attachment faults do stop it: the gateway loaded but could not be
//!   decorated, which is a configuration bug on our side

use axum::Router;

use crate::config::ShimConfig;
use crate::http::fallback::fallback_router;
use crate::http::middleware::{attach_middleware, AllowedOrigins, AttachError};
use crate::lifecycle::bootstrap::{BootstrapCell, LoadOutcome};

/// Which application ended up being served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Gateway,
    Fallback,
}

/// The application chosen at startup.
pub struct Application {
    router: Router,
    mode: AppMode,
}

impl Application {
    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Turn a bootstrap outcome into the application to serve.
pub fn assemble(outcome: &LoadOutcome, origins: &AllowedOrigins) -> Result<Application, AttachError> {
    match outcome {
        LoadOutcome::Loaded(app) => {
            let decorated = attach_middleware(app.clone(), origins)?;
            tracing::info!(
                routes = ?decorated.routes(),
                "Gateway application ready with CORS and audit logging"
            );
            Ok(Application {
                router: decorated.into_router(),
                mode: AppMode::Gateway,
            })
        }
        LoadOutcome::Failed(fault) => {
            tracing::warn!(diagnostic = %fault, "Serving fallback responder");
            Ok(Application {
                router: fallback_router(&fault.diagnostic()),
                mode: AppMode::Fallback,
            })
        }
    }
}

/// Bootstrap the configured gateway and assemble the application.
pub fn start(config: &ShimConfig, cell: &BootstrapCell) -> Result<Application, AttachError> {
    let origins = AllowedOrigins::from_env(&config.cors);
    assemble(cell.load_from_config(&config.gateway), &origins)
}
