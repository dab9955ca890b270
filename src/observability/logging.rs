//! Structured logging.
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the configured level when set
//! - Gateway debug logging raises only the gateway module to `debug`

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ShimConfig;

/// Filter directives derived from configuration.
pub fn default_directives(config: &ShimConfig) -> String {
    let level = config.observability.log_level.trim();
    let level = if level.is_empty() { "info" } else { level };

    let mut directives = format!("gateway_shim={level},tower_http={level}");
    if config.gateway.debug {
        directives.push_str(",gateway_shim::gateway=debug");
    }
    directives
}

/// Install the global subscriber.
pub fn init(config: &ShimConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}
