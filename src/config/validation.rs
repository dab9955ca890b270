//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. All errors are
//! collected rather than stopping at the first one.
//!
//! Gateway reachability (upstream URL, factory name resolution) is not
//! checked here: those surface as bootstrap faults so the fallback
//! responder can report them.

use std::net::SocketAddr;

use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::config::schema::ShimConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address is empty")]
    EmptyBindAddress,

    #[error("listener.bind_address '{0}' is not a socket address")]
    InvalidBindAddress(String),

    #[error("gateway.factory is empty")]
    EmptyFactoryName,

    #[error("gateway.request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("gateway.mount_paths entry '{0}' must start with '/'")]
    InvalidMountPath(String),

    #[error("cors.deployment_host_env is empty")]
    EmptyDeploymentHostEnv,

    #[error("observability.log_level '{0}' is not a log level")]
    InvalidLogLevel(String),
}

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &ShimConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let bind = config.listener.bind_address.trim();
    if bind.is_empty() {
        errors.push(ValidationError::EmptyBindAddress);
    } else if bind.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(bind.to_string()));
    }

    if config.gateway.factory.trim().is_empty() {
        errors.push(ValidationError::EmptyFactoryName);
    }

    if config.gateway.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    for mount in &config.gateway.mount_paths {
        if !mount.starts_with('/') {
            errors.push(ValidationError::InvalidMountPath(mount.clone()));
        }
    }

    if config.cors.deployment_host_env.trim().is_empty() {
        errors.push(ValidationError::EmptyDeploymentHostEnv);
    }

    // Blank means the default level.
    let level = config.observability.log_level.trim();
    if !level.is_empty() && level.parse::<LevelFilter>().is_err() {
        errors.push(ValidationError::InvalidLogLevel(level.to_string()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
