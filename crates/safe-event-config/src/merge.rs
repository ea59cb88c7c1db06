//! Deep merge of TOML trees with per-field provenance.

use std::collections::HashSet;

/// Dotted paths of every leaf field set by a config file.
pub type FieldSources = HashSet<String>;

/// Deep-merge `overlay` into `base`, recording every leaf path the overlay
/// sets. Tables merge key by key; any other value replaces the base value.
pub fn deep_merge_tracking(
    base: &mut toml::Value,
    overlay: &toml::Value,
    prefix: &str,
    sources: &mut FieldSources,
) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };

                if let Some(base_val) = base_table.get_mut(key) {
                    deep_merge_tracking(base_val, overlay_val, &path, sources);
                } else {
                    base_table.insert(key.clone(), overlay_val.clone());
                    record_leaves(overlay_val, &path, sources);
                }
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
            sources.insert(prefix.to_owned());
        },
    }
}

fn record_leaves(val: &toml::Value, path: &str, sources: &mut FieldSources) {
    if let toml::Value::Table(table) = val {
        for (key, child) in table {
            record_leaves(child, &format!("{path}.{key}"), sources);
        }
    } else {
        sources.insert(path.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> toml::Value {
        toml::from_str(s).unwrap()
    }

    #[test]
    fn test_merge_overrides_leaves_only() {
        let mut base = parse("[logging]\nlevel = \"info\"\nformat = \"compact\"\n");
        let overlay = parse("[logging]\nlevel = \"debug\"\n");
        let mut sources = FieldSources::new();

        deep_merge_tracking(&mut base, &overlay, "", &mut sources);

        assert_eq!(base["logging"]["level"].as_str(), Some("debug"));
        assert_eq!(base["logging"]["format"].as_str(), Some("compact"));
        assert!(sources.contains("logging.level"));
        assert!(!sources.contains("logging.format"));
    }

    #[test]
    fn test_merge_records_new_tables() {
        let mut base = parse("[logging]\nlevel = \"info\"\n");
        let overlay = parse("[dispatcher]\nname = \"bus\"\n");
        let mut sources = FieldSources::new();

        deep_merge_tracking(&mut base, &overlay, "", &mut sources);

        assert_eq!(base["dispatcher"]["name"].as_str(), Some("bus"));
        assert!(sources.contains("dispatcher.name"));
    }
}
