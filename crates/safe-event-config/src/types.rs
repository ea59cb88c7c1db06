//! Configuration struct definitions.
//!
//! Every struct implements [`Default`] with the same values as the embedded
//! `defaults.toml`, so a bare `[section]` header produces a working config.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dispatcher behaviour.
    pub dispatcher: DispatcherSection,
    /// Logging level, format, and per-crate directives.
    pub logging: LoggingSection,
}

/// Dispatcher settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherSection {
    /// Name attached to the dispatcher's log records.
    pub name: String,
    /// Catch and log listener panics instead of unwinding into `publish`.
    pub isolate_panics: bool,
}

impl Default for DispatcherSection {
    fn default() -> Self {
        Self {
            name: "dispatcher".to_owned(),
            isolate_panics: true,
        }
    }
}

/// Logging and tracing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global log level filter (`"trace"`, `"debug"`, `"info"`, `"warn"`,
    /// `"error"`).
    pub level: String,
    /// Output format: `"pretty"`, `"compact"`, or `"json"`.
    pub format: String,
    /// Output stream: `"stdout"` or `"stderr"`.
    pub target: String,
    /// Per-crate tracing directives (e.g. `["safe_event=trace"]`).
    pub directives: Vec<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "compact".to_owned(),
            target: "stderr".to_owned(),
            directives: Vec::new(),
        }
    }
}
