//! Environment variable fallbacks.
//!
//! Env vars are a **fallback**, not an override: they only apply to fields
//! that no config file set.

use std::collections::HashMap;
use std::hash::BuildHasher;

use tracing::debug;

use crate::merge::FieldSources;

/// Mapping from environment variable name to config field path.
struct EnvMapping {
    var_name: &'static str,
    field_path: &'static str,
}

const ENV_MAPPINGS: &[EnvMapping] = &[
    EnvMapping {
        var_name: "SAFE_EVENT_DISPATCHER_NAME",
        field_path: "dispatcher.name",
    },
    EnvMapping {
        var_name: "SAFE_EVENT_ISOLATE_PANICS",
        field_path: "dispatcher.isolate_panics",
    },
    EnvMapping {
        var_name: "SAFE_EVENT_LOG_LEVEL",
        field_path: "logging.level",
    },
    EnvMapping {
        var_name: "SAFE_EVENT_LOG_FORMAT",
        field_path: "logging.format",
    },
    EnvMapping {
        var_name: "SAFE_EVENT_LOG_TARGET",
        field_path: "logging.target",
    },
];

/// Snapshot the process environment.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars().collect()
}

/// Apply environment fallbacks to fields no config file set.
///
/// Returns the number of env vars applied.
pub fn apply_env_fallbacks<S: BuildHasher>(
    merged: &mut toml::Value,
    sources: &FieldSources,
    env_vars: &HashMap<String, String, S>,
) -> usize {
    let mut count: usize = 0;

    for mapping in ENV_MAPPINGS {
        if sources.contains(mapping.field_path) {
            continue;
        }

        if let Some(val) = env_vars.get(mapping.var_name) {
            debug!(
                var = mapping.var_name,
                field = mapping.field_path,
                "applying env var fallback"
            );
            set_field_from_string(merged, mapping.field_path, val);
            count = count.saturating_add(1);
        }
    }

    count
}

/// Set a dotted `path` in `root`, creating intermediate tables. Boolean
/// literals are stored as booleans, everything else as strings.
fn set_field_from_string(root: &mut toml::Value, path: &str, raw: &str) {
    let value = match raw.trim() {
        "true" => toml::Value::Boolean(true),
        "false" => toml::Value::Boolean(false),
        _ => toml::Value::String(raw.to_owned()),
    };

    let mut current = root;
    let mut segments = path.split('.').peekable();
    while let Some(segment) = segments.next() {
        let toml::Value::Table(table) = current else {
            return;
        };
        if segments.peek().is_none() {
            table.insert(segment.to_owned(), value);
            return;
        }
        current = table
            .entry(segment.to_owned())
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_fallback_applies_to_unset_fields() {
        let mut merged: toml::Value = toml::from_str("[logging]\nlevel = \"info\"\n").unwrap();
        let sources = FieldSources::new();

        let applied = apply_env_fallbacks(
            &mut merged,
            &sources,
            &env(&[("SAFE_EVENT_LOG_LEVEL", "debug"), ("SAFE_EVENT_ISOLATE_PANICS", "false")]),
        );

        assert_eq!(applied, 2);
        assert_eq!(merged["logging"]["level"].as_str(), Some("debug"));
        assert_eq!(merged["dispatcher"]["isolate_panics"].as_bool(), Some(false));
    }

    #[test]
    fn test_fallback_never_overrides_file_values() {
        let mut merged: toml::Value = toml::from_str("[logging]\nlevel = \"warn\"\n").unwrap();
        let mut sources = FieldSources::new();
        sources.insert("logging.level".to_owned());

        let applied =
            apply_env_fallbacks(&mut merged, &sources, &env(&[("SAFE_EVENT_LOG_LEVEL", "trace")]));

        assert_eq!(applied, 0);
        assert_eq!(merged["logging"]["level"].as_str(), Some("warn"));
    }
}
