//! Dispatcher settings.

use serde::{Deserialize, Serialize};

/// Default dispatcher name used in log fields.
pub const DEFAULT_DISPATCHER_NAME: &str = "dispatcher";

/// Runtime settings for a [`Dispatcher`](crate::Dispatcher).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Name attached to every log record the dispatcher emits.
    pub name: String,
    /// Catch listener panics, log them, and keep notifying the remaining
    /// listeners. When `false` a panic unwinds out of `publish`.
    pub isolate_panics: bool,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_DISPATCHER_NAME.to_string(),
            isolate_panics: true,
        }
    }
}

impl DispatcherConfig {
    /// Create a config with the given dispatcher name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Let listener panics propagate to the publisher.
    #[must_use]
    pub fn propagate_panics(mut self) -> Self {
        self.isolate_panics = false;
        self
    }

    /// Set whether listener panics are caught.
    #[must_use]
    pub fn with_isolate_panics(mut self, isolate: bool) -> Self {
        self.isolate_panics = isolate;
        self
    }
}

#[cfg(feature = "config")]
impl From<&safe_event_config::DispatcherSection> for DispatcherConfig {
    fn from(section: &safe_event_config::DispatcherSection) -> Self {
        Self {
            name: section.name.clone(),
            isolate_panics: section.isolate_panics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DispatcherConfig::default();
        assert_eq!(config.name, DEFAULT_DISPATCHER_NAME);
        assert!(config.isolate_panics);
    }

    #[test]
    fn test_builder() {
        let config = DispatcherConfig::new("ui").propagate_panics();
        assert_eq!(config.name, "ui");
        assert!(!config.isolate_panics);

        let config = config.with_isolate_panics(true);
        assert!(config.isolate_panics);
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: DispatcherConfig = serde_json::from_str(r#"{"name":"net"}"#).unwrap();
        assert_eq!(config.name, "net");
        assert!(config.isolate_panics);
    }
}
