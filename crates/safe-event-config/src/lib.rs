#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
//! Layered configuration for the safe-event dispatcher.
//!
//! # Usage
//!
//! ```rust,no_run
//! use safe_event_config::Config;
//!
//! // Defaults → optional file → SAFE_EVENT_* env fallbacks.
//! let config = Config::load(Some(std::path::Path::new("safe-event.toml"))).unwrap();
//! println!("dispatcher name: {}", config.dispatcher.name);
//! ```
//!
//! # Precedence
//!
//! From highest to lowest priority:
//!
//! 1. **Config file** passed to [`Config::load`]
//! 2. **Environment variables** (`SAFE_EVENT_*`), fallback only
//! 3. **Embedded defaults** (`defaults.toml` compiled into the binary)
//!
//! This crate has no dependencies on the other safe-event crates; conversion
//! into runtime types happens in those crates behind their `config` feature.

/// Environment variable fallback resolution.
pub mod env;
/// Configuration error types.
pub mod error;
/// Configuration file loading.
pub mod loader;
/// Layered configuration merging.
pub mod merge;
/// Configuration struct definitions.
pub mod types;
/// Configuration validation rules.
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use types::*;

impl Config {
    /// Load configuration from defaults, the optional file at `path`, and
    /// the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file is unreadable or malformed, or
    /// if the merged configuration fails validation.
    pub fn load(path: Option<&std::path::Path>) -> ConfigResult<Self> {
        loader::load(path, &env::collect_env_vars())
    }

    /// Parse configuration from TOML text. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the text is malformed or invalid.
    pub fn from_toml_str(input: &str) -> ConfigResult<Self> {
        loader::from_toml_str(input)
    }
}
