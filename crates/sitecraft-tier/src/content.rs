//! Site content consumed by navigation.
//!
//! The engine does not own site copy. It only needs the service and project
//! lists to build navigation dropdowns, read through [`ContentProvider`].

use serde::{Deserialize, Serialize};

use crate::error::{Result, TierError};

/// One service or project entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentEntry {
    pub title: String,
    /// URL segment of the detail page. Entries without one have no page.
    pub slug: Option<String>,
    pub summary: Option<String>,
}

impl ContentEntry {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// The slug, when present and non-blank.
    pub fn linkable_slug(&self) -> Option<&str> {
        self.slug.as_deref().map(str::trim).filter(|slug| !slug.is_empty())
    }
}

/// Source of the content lists navigation reads.
pub trait ContentProvider {
    fn services(&self) -> &[ContentEntry];
    fn projects(&self) -> &[ContentEntry];
}

/// Content lists held in memory, loadable from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentCatalog {
    pub services: Vec<ContentEntry>,
    pub projects: Vec<ContentEntry>,
}

impl ContentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(TierError::Catalog)
    }
}

impl ContentProvider for ContentCatalog {
    fn services(&self) -> &[ContentEntry] {
        &self.services
    }

    fn projects(&self) -> &[ContentEntry] {
        &self.projects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let catalog = ContentCatalog::from_json(
            r#"{
                "services": [
                    {"title": "Roofing", "slug": "roofing"},
                    {"title": "Gutters"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(catalog.services.len(), 2);
        assert_eq!(catalog.services[0].linkable_slug(), Some("roofing"));
        assert_eq!(catalog.services[1].linkable_slug(), None);
        assert!(catalog.projects.is_empty());
    }

    #[test]
    fn test_blank_slug_is_not_linkable() {
        assert_eq!(ContentEntry::new("x").with_slug("  ").linkable_slug(), None);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            ContentCatalog::from_json("{\"services\": 3}"),
            Err(TierError::Catalog(_))
        ));
    }
}
