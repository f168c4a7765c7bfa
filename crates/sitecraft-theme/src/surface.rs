//! The style surface: the string registry presentation code reads.
//!
//! A surface holds two namespaces. Properties are the `--*` style variables.
//! Markers are body-level attributes such as `data-design-style`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body-level marker carrying the active design package.
pub const DESIGN_STYLE_MARKER: &str = "data-design-style";

/// Body-level marker carrying `light` or `dark`.
pub const THEME_MARKER: &str = "data-theme";

/// A writable style registry.
pub trait StyleSurface {
    fn set_property(&mut self, name: &str, value: &str);

    fn property(&self, name: &str) -> Option<&str>;

    fn set_marker(&mut self, name: &str, value: &str);

    fn marker(&self, name: &str) -> Option<&str>;

    /// Copy the current contents into a value.
    fn snapshot(&self) -> StyleSnapshot;
}

/// In-memory surface that also counts writes.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    properties: BTreeMap<String, String>,
    markers: BTreeMap<String, String>,
    property_writes: usize,
    marker_writes: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Property writes since creation or the last [`MemorySurface::reset_counters`].
    pub fn property_writes(&self) -> usize {
        self.property_writes
    }

    pub fn marker_writes(&self) -> usize {
        self.marker_writes
    }

    pub fn reset_counters(&mut self) {
        self.property_writes = 0;
        self.marker_writes = 0;
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl StyleSurface for MemorySurface {
    fn set_property(&mut self, name: &str, value: &str) {
        self.property_writes += 1;
        self.properties.insert(name.to_owned(), value.to_owned());
    }

    fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    fn set_marker(&mut self, name: &str, value: &str) {
        self.marker_writes += 1;
        self.markers.insert(name.to_owned(), value.to_owned());
    }

    fn marker(&self, name: &str) -> Option<&str> {
        self.markers.get(name).map(String::as_str)
    }

    fn snapshot(&self) -> StyleSnapshot {
        StyleSnapshot {
            properties: self.properties.clone(),
            markers: self.markers.clone(),
        }
    }
}

/// A point-in-time copy of a style surface.
///
/// Snapshots can be handed down to renderers instead of letting them read
/// the live surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSnapshot {
    pub properties: BTreeMap<String, String>,
    pub markers: BTreeMap<String, String>,
}

impl StyleSnapshot {
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn marker(&self, name: &str) -> Option<&str> {
        self.markers.get(name).map(String::as_str)
    }

    /// Properties whose name starts with `prefix`, in name order.
    pub fn with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.properties
            .range(prefix.to_owned()..)
            .take_while(move |(name, _)| name.starts_with(prefix))
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Names whose value differs from `other`, or that only one side has.
    pub fn changed_properties(&self, other: &StyleSnapshot) -> Vec<String> {
        let mut changed: Vec<String> = self
            .properties
            .iter()
            .filter(|(name, value)| other.properties.get(*name) != Some(*value))
            .map(|(name, _)| name.clone())
            .collect();
        changed.extend(
            other
                .properties
                .keys()
                .filter(|name| !self.properties.contains_key(*name))
                .cloned(),
        );
        changed.sort();
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_every_write() {
        let mut surface = MemorySurface::new();
        surface.set_property("--a", "1");
        surface.set_property("--a", "1");
        surface.set_marker(DESIGN_STYLE_MARKER, "modern");
        assert_eq!(surface.property_writes(), 2);
        assert_eq!(surface.marker_writes(), 1);
        assert_eq!(surface.len(), 1);
        surface.reset_counters();
        assert_eq!(surface.property_writes(), 0);
    }

    #[test]
    fn test_snapshot_prefix_and_diff() {
        let mut surface = MemorySurface::new();
        surface.set_property("--radius-card", "1rem");
        surface.set_property("--radius-button", "0.5rem");
        surface.set_property("--color-primary", "#000000");
        let before = surface.snapshot();

        let radii: Vec<_> = before.with_prefix("--radius-").map(|(name, _)| name).collect();
        assert_eq!(radii, ["--radius-button", "--radius-card"]);

        surface.set_property("--radius-card", "2rem");
        surface.set_property("--border-width", "1px");
        let after = surface.snapshot();
        assert_eq!(
            before.changed_properties(&after),
            ["--border-width", "--radius-card"]
        );
    }
}
