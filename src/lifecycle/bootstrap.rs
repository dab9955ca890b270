//! One-shot gateway bootstrap.
//!
//! Calls the factory exactly once and classifies the result. Every
//! failure, including a panic inside the factory, becomes a
//! [`LoadFault`] whose text is what the fallback responder serves.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::OnceLock;

use thiserror::Error;

use crate::config::GatewayConfig;
use crate::gateway::{resolve_factory, AppFactory, FactoryError, GatewayApp};

/// Diagnostic used when a factory returns an application without routes.
pub const INVALID_INSTANCE_MESSAGE: &str = "create_app did not return a valid application instance.";

/// Why the gateway application could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadFault {
    /// The factory could not be located or resolved.
    #[error("Could not load gateway factory: {0}")]
    Unresolved(String),

    /// The factory returned an error or panicked.
    #[error("{0}")]
    FactoryFailed(String),

    /// The factory returned an application with an empty route table.
    #[error("create_app did not return a valid application instance.")]
    InvalidInstance,
}

impl LoadFault {
    fn unresolved(detail: String) -> Self {
        Self::Unresolved(non_empty(detail, "gateway factory is unavailable"))
    }

    fn factory_failed(detail: String) -> Self {
        Self::FactoryFailed(non_empty(detail, "create_app failed without detail"))
    }

    /// Text served by the fallback responder. Never empty.
    pub fn diagnostic(&self) -> String {
        self.to_string()
    }
}

impl From<FactoryError> for LoadFault {
    fn from(err: FactoryError) -> Self {
        match err {
            FactoryError::Unavailable(detail) => Self::unresolved(detail),
            FactoryError::Construction(detail) => Self::factory_failed(detail),
        }
    }
}

fn non_empty(detail: String, placeholder: &str) -> String {
    if detail.trim().is_empty() {
        placeholder.to_string()
    } else {
        detail
    }
}

/// Result of the one-time bootstrap attempt.
#[derive(Clone)]
pub enum LoadOutcome {
    Loaded(GatewayApp),
    Failed(LoadFault),
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// The fault diagnostic, `None` when loaded.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            Self::Loaded(_) => None,
            Self::Failed(fault) => Some(fault.diagnostic()),
        }
    }
}

impl fmt::Debug for LoadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded(app) => f.debug_tuple("Loaded").field(app).finish(),
            Self::Failed(fault) => f.debug_tuple("Failed").field(fault).finish(),
        }
    }
}

/// Call the factory once and classify the result.
pub fn bootstrap(factory: &dyn AppFactory) -> LoadOutcome {
    let result = panic::catch_unwind(AssertUnwindSafe(|| factory.create_app()));

    let outcome = match result {
        Ok(Ok(app)) if app.has_routes() => LoadOutcome::Loaded(app),
        Ok(Ok(_)) => LoadOutcome::Failed(LoadFault::InvalidInstance),
        Ok(Err(err)) => LoadOutcome::Failed(err.into()),
        Err(payload) => LoadOutcome::Failed(LoadFault::factory_failed(panic_message(payload.as_ref()))),
    };

    log_outcome(factory.name(), &outcome);
    outcome
}

/// Resolve the configured factory, then bootstrap it.
pub fn bootstrap_from_config(config: &GatewayConfig) -> LoadOutcome {
    match resolve_factory(config) {
        Ok(factory) => bootstrap(factory.as_ref()),
        Err(err) => {
            let outcome = LoadOutcome::Failed(err.into());
            log_outcome(config.factory.trim(), &outcome);
            outcome
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "create_app panicked".to_string()
    }
}

fn log_outcome(factory: &str, outcome: &LoadOutcome) {
    match outcome {
        LoadOutcome::Loaded(app) => {
            tracing::info!(
                factory,
                routes = app.routes().len(),
                "Successfully called create_app()"
            );
        }
        LoadOutcome::Failed(fault) => {
            tracing::error!(
                factory,
                diagnostic = %fault,
                "Critical error: gateway application could not be loaded"
            );
        }
    }
}

/// Holds the process-wide bootstrap outcome.
///
/// The first call runs the factory; every later call returns the same
/// outcome without calling it again.
#[derive(Debug, Default)]
pub struct BootstrapCell {
    outcome: OnceLock<LoadOutcome>,
}

impl BootstrapCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&self, factory: &dyn AppFactory) -> &LoadOutcome {
        self.outcome.get_or_init(|| bootstrap(factory))
    }

    pub fn load_from_config(&self, config: &GatewayConfig) -> &LoadOutcome {
        self.outcome.get_or_init(|| bootstrap_from_config(config))
    }

    /// The stored outcome, if bootstrap has run.
    pub fn get(&self) -> Option<&LoadOutcome> {
        self.outcome.get()
    }
}
