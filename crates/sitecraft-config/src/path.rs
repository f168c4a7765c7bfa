//! Leaf-addressed reads and writes.
//!
//! Paths are sequences of camelCase JSON keys, e.g. `["style", "package"]`.
//! A write replaces exactly the addressed value and keeps its siblings.

use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::model::AppConfig;

/// Split a dotted path (`style.package`) into segments.
pub fn parse_path(dotted: &str) -> Vec<&str> {
    dotted
        .split('.')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Read the JSON value at `path`.
pub fn get_path(config: &AppConfig, path: &[&str]) -> Result<Value> {
    let root = serde_json::to_value(config).map_err(ConfigError::Serialization)?;
    let mut cursor = &root;
    for segment in path {
        cursor = cursor
            .as_object()
            .and_then(|object| object.get(*segment))
            .ok_or_else(|| unknown(path))?;
    }
    Ok(cursor.clone())
}

/// Return a copy of `config` with the value at `path` replaced.
///
/// Fails without side effects when the path does not name an existing field
/// or the value does not decode into that field's type.
pub fn set_path(config: &AppConfig, path: &[&str], value: Value) -> Result<AppConfig> {
    if path.is_empty() {
        return Err(ConfigError::EmptyPath);
    }
    let mut root = serde_json::to_value(config).map_err(ConfigError::Serialization)?;
    let mut cursor = &mut root;
    for segment in path {
        cursor = cursor
            .as_object_mut()
            .and_then(|object| object.get_mut(*segment))
            .ok_or_else(|| unknown(path))?;
    }
    *cursor = value;
    serde_json::from_value(root).map_err(|source| ConfigError::InvalidValue {
        path: path.join("."),
        source,
    })
}

fn unknown(path: &[&str]) -> ConfigError {
    ConfigError::UnknownPath {
        path: path.join("."),
    }
}
