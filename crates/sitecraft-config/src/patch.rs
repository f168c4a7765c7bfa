//! Shallow section patches.
//!
//! A [`ConfigPatch`] replaces whole top-level sections. It never merges
//! inside a section: a supplied `style` section replaces the current one
//! wholesale, and any field the caller left out takes its default value
//! rather than the current one. To change a single field, copy the current
//! section first:
//!
//! ```
//! use sitecraft_config::{AppConfig, ConfigPatch, DesignPackage, StyleConfig};
//!
//! let current = AppConfig::default();
//! let patch = ConfigPatch::new().style(StyleConfig {
//!     package: DesignPackage::Modern,
//!     ..current.style.clone()
//! });
//! assert!(!patch.is_empty());
//! ```
//!
//! For single-leaf edits that keep their siblings, use
//! [`crate::ConfigStore::update_path`] or [`crate::ConfigStore::update_with`].

use serde::{Deserialize, Serialize};

use crate::model::{
    AppConfig, FeatureToggles, HeaderConfig, HeadingsConfig, HeroConfig, LayoutConfig,
    StyleConfig, SystemConfig, ThemeConfig,
};

/// A set of whole sections to replace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureToggles>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<HeaderConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero: Option<HeroConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headings: Option<HeadingsConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<SystemConfig>,
}

impl ConfigPatch {
    /// An empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = Some(layout);
        self
    }

    #[must_use]
    pub fn theme(mut self, theme: ThemeConfig) -> Self {
        self.theme = Some(theme);
        self
    }

    #[must_use]
    pub fn features(mut self, features: FeatureToggles) -> Self {
        self.features = Some(features);
        self
    }

    #[must_use]
    pub fn header(mut self, header: HeaderConfig) -> Self {
        self.header = Some(header);
        self
    }

    #[must_use]
    pub fn hero(mut self, hero: HeroConfig) -> Self {
        self.hero = Some(hero);
        self
    }

    #[must_use]
    pub fn headings(mut self, headings: HeadingsConfig) -> Self {
        self.headings = Some(headings);
        self
    }

    #[must_use]
    pub fn style(mut self, style: StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    #[must_use]
    pub fn system(mut self, system: SystemConfig) -> Self {
        self.system = Some(system);
        self
    }

    /// Names of the sections this patch replaces.
    pub fn sections(&self) -> Vec<&'static str> {
        let present = [
            self.layout.is_some(),
            self.theme.is_some(),
            self.features.is_some(),
            self.header.is_some(),
            self.hero.is_some(),
            self.headings.is_some(),
            self.style.is_some(),
            self.system.is_some(),
        ];
        AppConfig::SECTIONS
            .iter()
            .zip(present)
            .filter_map(|(name, present)| present.then_some(*name))
            .collect()
    }

    /// Whether the patch replaces nothing.
    pub fn is_empty(&self) -> bool {
        self.sections().is_empty()
    }
}

impl AppConfig {
    /// Replace every section present in `patch`.
    pub fn apply_patch(&mut self, patch: ConfigPatch) {
        let ConfigPatch {
            layout,
            theme,
            features,
            header,
            hero,
            headings,
            style,
            system,
        } = patch;

        if let Some(layout) = layout {
            self.layout = layout;
        }
        if let Some(theme) = theme {
            self.theme = theme;
        }
        if let Some(features) = features {
            self.features = features;
        }
        if let Some(header) = header {
            self.header = header;
        }
        if let Some(hero) = hero {
            self.hero = hero;
        }
        if let Some(headings) = headings {
            self.headings = headings;
        }
        if let Some(style) = style {
            self.style = style;
        }
        if let Some(system) = system {
            self.system = system;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BadgeStyle, ColorScheme, DesignPackage, SiteMode};

    #[test]
    fn test_patch_replaces_whole_section() {
        let mut config = AppConfig::default();
        config.style.badge_style = Some(BadgeStyle::Pill);

        // The caller did not re-spread the current style, so the override is lost.
        config.apply_patch(ConfigPatch::new().style(StyleConfig {
            package: DesignPackage::Modern,
            ..StyleConfig::default()
        }));

        assert_eq!(config.style.package, DesignPackage::Modern);
        assert_eq!(config.style.badge_style, None);
    }

    #[test]
    fn test_patch_with_respread_keeps_siblings() {
        let mut config = AppConfig::default();
        config.style.badge_style = Some(BadgeStyle::Pill);

        let style = StyleConfig {
            package: DesignPackage::Modern,
            ..config.style.clone()
        };
        config.apply_patch(ConfigPatch::new().style(style));

        assert_eq!(config.style.badge_style, Some(BadgeStyle::Pill));
    }

    #[test]
    fn test_untouched_sections_survive() {
        let mut config = AppConfig::default();
        config.theme.color_scheme = ColorScheme::Berry;
        config.apply_patch(ConfigPatch::new().layout(LayoutConfig {
            mode: SiteMode::Multipage,
            ..LayoutConfig::default()
        }));
        assert_eq!(config.theme.color_scheme, ColorScheme::Berry);
        assert_eq!(config.layout.mode, SiteMode::Multipage);
    }

    #[test]
    fn test_sections_lists_present_keys() {
        let patch = ConfigPatch::new()
            .hero(HeroConfig::default())
            .theme(ThemeConfig::default());
        assert_eq!(patch.sections(), ["theme", "hero"]);
        assert!(ConfigPatch::new().is_empty());
    }

    #[test]
    fn test_patch_from_partial_json() {
        let patch: ConfigPatch =
            serde_json::from_str(r#"{"theme":{"colorScheme":"forest"}}"#).unwrap();
        let theme = patch.theme.unwrap();
        assert_eq!(theme.color_scheme, ColorScheme::Forest);
        assert!(!theme.dark_mode);
        assert!(serde_json::from_str::<ConfigPatch>(r#"{"colour":{}}"#).is_err());
    }
}
