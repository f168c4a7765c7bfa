//! The site configuration model.
//!
//! `AppConfig` is a fixed-shape record: every section is always present and
//! every field populated. It serializes to camelCase JSON, which is also the
//! persisted format and the vocabulary of path-based updates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseEnumError;

/// Declares a configuration enum together with its wire name, `ALL`,
/// `as_str`, `Display`, `FromStr` and `Default`.
macro_rules! config_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
        default = $default:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire name, as persisted and written to the style surface.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|variant| variant.as_str() == value)
                    .ok_or_else(|| ParseEnumError {
                        kind: stringify!($name),
                        value: value.to_owned(),
                    })
            }
        }
    };
}

// =============================================================================
// ENUMS
// =============================================================================

config_enum! {
    /// Whether the site is a single scrolling page or separate pages.
    pub enum SiteMode {
        Onepage => "onepage",
        Multipage => "multipage",
    }
    default = Onepage;
}

config_enum! {
    /// Page container width.
    pub enum LayoutDesign {
        Boxed => "boxed",
        FullWidth => "fullWidth",
    }
    default = FullWidth;
}

config_enum! {
    /// Section arrangement.
    pub enum LayoutVariant {
        Standard => "standard",
        Centered => "centered",
        Asymmetric => "asymmetric",
    }
    default = Standard;
}

config_enum! {
    /// Named color palettes.
    pub enum ColorScheme {
        Ocean => "ocean",
        Forest => "forest",
        Sunset => "sunset",
        Slate => "slate",
        Berry => "berry",
    }
    default = Ocean;
}

config_enum! {
    pub enum HeaderVariant {
        Classic => "classic",
        Centered => "centered",
        Minimal => "minimal",
        Split => "split",
    }
    default = Classic;
}

config_enum! {
    /// Header scroll behavior.
    pub enum HeaderBehavior {
        Static => "static",
        Sticky => "sticky",
        HideOnScroll => "hideOnScroll",
    }
    default = Sticky;
}

config_enum! {
    pub enum NavigationStyle {
        Inline => "inline",
        Dropdown => "dropdown",
        Hamburger => "hamburger",
    }
    default = Inline;
}

config_enum! {
    /// Hero section presentation. Also modifies the navigation item list.
    pub enum HeroType {
        Fullscreen => "fullscreen",
        Split => "split",
        Slider => "slider",
        Video => "video",
        Gallery => "gallery",
        Minimal => "minimal",
    }
    default = Fullscreen;
}

config_enum! {
    /// Heading underline pattern.
    pub enum HeadingStyle {
        Solid => "solid",
        Dotted => "dotted",
        Gradient => "gradient",
        None => "none",
    }
    default = Solid;
}

config_enum! {
    /// Heading underline color source.
    pub enum HeadingColor {
        Primary => "primary",
        Secondary => "secondary",
        Accent => "accent",
        /// Uses `HeadingsConfig::custom_color`.
        Custom => "custom",
    }
    default = Primary;
}

config_enum! {
    /// Design package: a bundle of style defaults.
    pub enum DesignPackage {
        Classic => "classic",
        Modern => "modern",
        Minimal => "minimal",
        Elegant => "elegant",
    }
    default = Classic;
}

config_enum! {
    pub enum FontFamily {
        Inter => "inter",
        Playfair => "playfair",
        Poppins => "poppins",
        System => "system",
    }
    default = System;
}

config_enum! {
    pub enum BadgeStyle {
        None => "none",
        Pill => "pill",
        Outline => "outline",
        Solid => "solid",
    }
    default = None;
}

config_enum! {
    /// Vertical rhythm.
    pub enum Spacing {
        Compact => "compact",
        Normal => "normal",
        Relaxed => "relaxed",
    }
    default = Normal;
}

config_enum! {
    /// Corner rounding level.
    pub enum BorderRadius {
        None => "none",
        Subtle => "subtle",
        Pronounced => "pronounced",
    }
    default = Subtle;
}

config_enum! {
    /// Outline thickness level.
    pub enum BorderWeight {
        None => "none",
        Subtle => "subtle",
        Bold => "bold",
    }
    default = Subtle;
}

config_enum! {
    /// Tab shown in the quick-edit panel.
    pub enum ConfigTab {
        Layout => "layout",
        Theme => "theme",
        Style => "style",
        Content => "content",
        Features => "features",
    }
    default = Layout;
}

// =============================================================================
// SECTIONS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub mode: SiteMode,
    pub design: LayoutDesign,
    pub variant: LayoutVariant,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeConfig {
    pub color_scheme: ColorScheme,
    pub dark_mode: bool,
}

/// Content sections the site owner switched on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureToggles {
    pub testimonials: bool,
    pub gallery: bool,
    pub team: bool,
    pub blog: bool,
    pub faq: bool,
    pub newsletter: bool,
    pub booking: bool,
    pub map: bool,
    pub social_links: bool,
    pub cookie_banner: bool,
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self {
            testimonials: true,
            gallery: true,
            team: false,
            blog: false,
            faq: true,
            newsletter: false,
            booking: false,
            map: true,
            social_links: true,
            cookie_banner: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderConfig {
    pub variant: HeaderVariant,
    pub behavior: HeaderBehavior,
    pub navigation: NavigationStyle,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroConfig {
    #[serde(rename = "type")]
    pub hero_type: HeroType,
}

/// Heading decoration settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeadingsConfig {
    pub underline: bool,
    pub style: HeadingStyle,
    pub color: HeadingColor,
    /// Hex color used when `color` is `custom`.
    pub custom_color: Option<String>,
}

impl Default for HeadingsConfig {
    fn default() -> Self {
        Self {
            underline: true,
            style: HeadingStyle::Solid,
            color: HeadingColor::Primary,
            custom_color: None,
        }
    }
}

/// Visual style selection.
///
/// `font_family`, `badge_style`, `border_radius` and `borders` are explicit
/// overrides. `None` means the value follows the design package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleConfig {
    pub package: DesignPackage,
    pub font_family: Option<FontFamily>,
    pub badge_style: Option<BadgeStyle>,
    pub spacing: Spacing,
    pub border_radius: Option<BorderRadius>,
    pub borders: Option<BorderWeight>,
}

/// Editor session flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemConfig {
    pub is_first_visit: bool,
    pub quick_edit_mode: bool,
    pub active_tab: ConfigTab,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            is_first_visit: true,
            quick_edit_mode: false,
            active_tab: ConfigTab::Layout,
        }
    }
}

// =============================================================================
// ROOT
// =============================================================================

/// The canonical site configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub layout: LayoutConfig,
    pub theme: ThemeConfig,
    pub features: FeatureToggles,
    pub header: HeaderConfig,
    pub hero: HeroConfig,
    pub headings: HeadingsConfig,
    pub style: StyleConfig,
    pub system: SystemConfig,
}

impl AppConfig {
    /// Top-level section names, as they appear in JSON.
    pub const SECTIONS: [&'static str; 8] = [
        "layout", "theme", "features", "header", "hero", "headings", "style", "system",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_names_round_trip_through_from_str() {
        for scheme in ColorScheme::ALL {
            assert_eq!(scheme.as_str().parse::<ColorScheme>(), Ok(*scheme));
        }
        assert_eq!("hideOnScroll".parse(), Ok(HeaderBehavior::HideOnScroll));
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "neon".parse::<ColorScheme>().unwrap_err();
        assert_eq!(err.kind, "ColorScheme");
        assert_eq!(err.to_string(), "unknown ColorScheme value: neon");
    }

    #[test]
    fn test_default_json_shape() {
        let value = serde_json::to_value(AppConfig::default()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), AppConfig::SECTIONS.len());
        for section in AppConfig::SECTIONS {
            assert!(object.contains_key(section), "missing {section}");
        }
        assert_eq!(value["layout"]["mode"], "onepage");
        assert_eq!(value["theme"]["colorScheme"], "ocean");
        assert_eq!(value["hero"]["type"], "fullscreen");
        assert_eq!(value["features"]["cookieBanner"], true);
        // Overrides are persisted as explicit nulls so paths can address them.
        assert!(value["style"]["badgeStyle"].is_null());
        assert!(value["headings"]["customColor"].is_null());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"style":{"package":"modern"}}"#).unwrap();
        assert_eq!(config.style.package, DesignPackage::Modern);
        assert_eq!(config.style.spacing, Spacing::Normal);
        assert_eq!(config.layout, LayoutConfig::default());
    }
}
