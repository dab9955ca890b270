//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ShimConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ShimConfig, ConfigError> {
    validated(read_config(path)?)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ShimConfig, ConfigError> {
    validated(toml::from_str(content)?)
}

/// Read and deserialize a file without semantic checks.
fn read_config(path: &Path) -> Result<ShimConfig, ConfigError> {
    Ok(toml::from_str(&fs::read_to_string(path)?)?)
}

fn validated(config: ShimConfig) -> Result<ShimConfig, ConfigError> {
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind_address: Option<String>,
    pub upstream_url: Option<String>,
}

impl Overrides {
    fn apply(self, config: &mut ShimConfig) {
        if let Some(bind) = self.bind_address {
            config.listener.bind_address = bind;
        }
        if let Some(upstream) = self.upstream_url {
            config.gateway.upstream_url = upstream;
        }
    }
}

/// Load the file if one is given, apply overrides, then validate.
///
/// Validation runs after the overrides, so a command-line value can
/// replace a bad value from the file.
pub fn resolve_config(path: Option<&Path>, overrides: Overrides) -> Result<ShimConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => ShimConfig::default(),
    };
    overrides.apply(&mut config);
    validated(config)
}
