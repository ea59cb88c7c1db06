//! Config file loading.
//!
//! 1. Parse the embedded `defaults.toml` into a base tree
//! 2. Deep-merge the config file, if one is given and exists
//! 3. Apply `SAFE_EVENT_*` env fallbacks for fields the file left unset
//! 4. Deserialize into [`Config`] and validate

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::path::Path;

use tracing::{debug, info};

use crate::env::apply_env_fallbacks;
use crate::error::{ConfigError, ConfigResult};
use crate::merge::{FieldSources, deep_merge_tracking};
use crate::types::Config;
use crate::validate;

/// Embedded default configuration.
const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// Load configuration from embedded defaults, an optional file, and the
/// given environment.
///
/// A `path` that does not exist is skipped, so callers can always pass the
/// conventional location.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read or parsed, or if the
/// merged configuration fails validation.
pub fn load<S: BuildHasher>(
    path: Option<&Path>,
    env_vars: &HashMap<String, String, S>,
) -> ConfigResult<Config> {
    let mut merged = parse_toml(DEFAULTS_TOML, "<embedded defaults>")?;
    let mut sources = FieldSources::new();

    if let Some(path) = path {
        if let Some(overlay) = try_load_file(path)? {
            deep_merge_tracking(&mut merged, &overlay, "", &mut sources);
            info!(path = %path.display(), "loaded config file");
        } else {
            debug!(path = %path.display(), "config file not found, using defaults");
        }
    }

    let applied = apply_env_fallbacks(&mut merged, &sources, env_vars);
    if applied > 0 {
        debug!(count = applied, "applied env var fallbacks");
    }

    finish(merged, "<merged config>")
}

/// Parse a complete configuration from TOML text, without env fallbacks.
///
/// Missing keys take their default values.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the text is not valid TOML or the result
/// fails validation.
pub fn from_toml_str(input: &str) -> ConfigResult<Config> {
    let mut merged = parse_toml(DEFAULTS_TOML, "<embedded defaults>")?;
    let overlay = parse_toml(input, "<string>")?;
    deep_merge_tracking(&mut merged, &overlay, "", &mut FieldSources::new());
    finish(merged, "<string>")
}

fn finish(merged: toml::Value, origin: &str) -> ConfigResult<Config> {
    let config: Config = merged.try_into().map_err(|e| ConfigError::ParseError {
        path: origin.to_owned(),
        source: e,
    })?;
    validate::validate(&config)?;
    Ok(config)
}

fn parse_toml(input: &str, origin: &str) -> ConfigResult<toml::Value> {
    toml::from_str(input).map_err(|e| ConfigError::ParseError {
        path: origin.to_owned(),
        source: e,
    })
}

fn try_load_file(path: &Path) -> ConfigResult<Option<toml::Value>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.display().to_string(),
                source: e,
            });
        },
    };

    parse_toml(&content, &path.display().to_string()).map(Some)
}
