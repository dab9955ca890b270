//! Factory lookup by name.

use crate::config::GatewayConfig;
use crate::gateway::upstream::UpstreamFactory;
use crate::gateway::{AppFactory, FactoryError};

/// Factory names this build knows how to construct.
pub const KNOWN_FACTORIES: &[&str] = &["upstream"];

/// Resolve the configured factory.
///
/// An unknown name is reported as [`FactoryError::Unavailable`], the same
/// category as a gateway that cannot be located at all.
pub fn resolve_factory(config: &GatewayConfig) -> Result<Box<dyn AppFactory>, FactoryError> {
    match config.factory.trim() {
        "upstream" => Ok(Box::new(UpstreamFactory::new(config.clone()))),
        other => Err(FactoryError::Unavailable(format!(
            "no gateway factory named '{}' (known: {})",
            other,
            KNOWN_FACTORIES.join(", ")
        ))),
    }
}
