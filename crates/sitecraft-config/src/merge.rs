//! Recovering a configuration from persisted JSON.
//!
//! Persisted state is overlaid on the default configuration key by key, so
//! fields added since the state was written pick up their defaults. A
//! section that still fails to decode falls back to its default section;
//! unparseable input falls back to the full default. None of this is ever
//! reported as an error to the caller.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::model::AppConfig;

/// Decode persisted JSON text, recovering to defaults where needed.
pub fn parse_persisted(raw: &str) -> AppConfig {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => merge_over_defaults(&value),
        Err(error) => {
            warn!(%error, "persisted configuration is not valid JSON, using defaults");
            AppConfig::default()
        }
    }
}

/// Overlay `persisted` on the default configuration.
pub fn merge_over_defaults(persisted: &Value) -> AppConfig {
    if !persisted.is_object() {
        warn!("persisted configuration is not an object, using defaults");
        return AppConfig::default();
    }

    let mut merged = match serde_json::to_value(AppConfig::default()) {
        Ok(value) => value,
        Err(error) => {
            warn!(%error, "failed to encode default configuration");
            return AppConfig::default();
        }
    };
    deep_merge(&mut merged, persisted);

    match serde_json::from_value(merged.clone()) {
        Ok(config) => config,
        Err(error) => {
            warn!(%error, "persisted configuration partially invalid, recovering per section");
            recover_sections(&merged)
        }
    }
}

/// Recursively overlay `overlay` onto `base`. Objects merge key by key;
/// every other value replaces the base value.
pub fn deep_merge(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base, overlay) => *base = overlay.clone(),
    }
}

fn recover_sections(merged: &Value) -> AppConfig {
    let defaults = AppConfig::default();
    AppConfig {
        layout: section(merged, "layout").unwrap_or(defaults.layout),
        theme: section(merged, "theme").unwrap_or(defaults.theme),
        features: section(merged, "features").unwrap_or(defaults.features),
        header: section(merged, "header").unwrap_or(defaults.header),
        hero: section(merged, "hero").unwrap_or(defaults.hero),
        headings: section(merged, "headings").unwrap_or(defaults.headings),
        style: section(merged, "style").unwrap_or(defaults.style),
        system: section(merged, "system").unwrap_or(defaults.system),
    }
}

fn section<T: DeserializeOwned>(merged: &Value, key: &str) -> Option<T> {
    let value = merged.get(key)?.clone();
    match serde_json::from_value(value) {
        Ok(section) => Some(section),
        Err(error) => {
            warn!(section = key, %error, "discarding malformed persisted section");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColorScheme, DesignPackage, HeroType, SiteMode};
    use serde_json::json;

    #[test]
    fn test_garbage_falls_back_to_defaults() {
        assert_eq!(parse_persisted("{not json"), AppConfig::default());
        assert_eq!(parse_persisted("[1, 2, 3]"), AppConfig::default());
        assert_eq!(parse_persisted("null"), AppConfig::default());
    }

    #[test]
    fn test_partial_state_fills_in_defaults() {
        let config = parse_persisted(r#"{"layout":{"mode":"multipage"}}"#);
        assert_eq!(config.layout.mode, SiteMode::Multipage);
        assert_eq!(config.layout.design, AppConfig::default().layout.design);
        assert_eq!(config.features, AppConfig::default().features);
    }

    #[test]
    fn test_bad_section_recovers_alone() {
        let persisted = json!({
            "theme": { "colorScheme": "neon" },
            "style": { "package": "modern" },
            "hero": { "type": "video" }
        });
        let config = merge_over_defaults(&persisted);
        assert_eq!(config.theme.color_scheme, ColorScheme::Ocean);
        assert_eq!(config.style.package, DesignPackage::Modern);
        assert_eq!(config.hero.hero_type, HeroType::Video);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config = merge_over_defaults(&json!({ "legacy": true, "theme": { "old": 1 } }));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_deep_merge_replaces_scalars_and_nulls() {
        let mut base = json!({ "a": { "b": 1, "c": 2 }, "d": "x" });
        deep_merge(&mut base, &json!({ "a": { "c": null }, "d": "y" }));
        assert_eq!(base, json!({ "a": { "b": 1, "c": null }, "d": "y" }));
    }
}
