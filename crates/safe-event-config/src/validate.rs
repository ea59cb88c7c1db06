//! Post-merge configuration validation.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_FORMATS: [&str; 3] = ["pretty", "compact", "json"];
const VALID_TARGETS: [&str; 2] = ["stdout", "stderr"];

/// Validate a fully merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_dispatcher(config)?;
    validate_logging(config)?;
    Ok(())
}

fn validate_dispatcher(config: &Config) -> ConfigResult<()> {
    if config.dispatcher.name.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "dispatcher.name".to_owned(),
            message: "dispatcher name must not be empty".to_owned(),
        });
    }
    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    one_of("logging.level", &config.logging.level, &VALID_LEVELS)?;
    one_of("logging.format", &config.logging.format, &VALID_FORMATS)?;
    one_of("logging.target", &config.logging.target, &VALID_TARGETS)?;
    Ok(())
}

fn one_of(field: &str, value: &str, allowed: &[&str]) -> ConfigResult<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        field: field.to_owned(),
        message: format!(
            "unsupported value '{value}'; expected one of: {}",
            allowed.join(", ")
        ),
    })
}
