//! Design packages and the tables derived from them.
//!
//! This module is the only place that knows what a design package implies.
//! The variable writer's convenience setters and the style computers both
//! read from here.

use sitecraft_config::{
    BadgeStyle, BorderRadius, BorderWeight, DesignPackage, FontFamily, Spacing, StyleConfig,
};

use crate::values::ValueTable;

// =============================================================================
// PACKAGE DEFAULTS
// =============================================================================

/// Style choices a package makes when the user has not overridden them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageDefaults {
    pub font_family: FontFamily,
    pub badge_style: BadgeStyle,
    pub border_radius: BorderRadius,
    pub borders: BorderWeight,
}

pub const fn package_defaults(package: DesignPackage) -> PackageDefaults {
    match package {
        DesignPackage::Classic => PackageDefaults {
            font_family: FontFamily::System,
            badge_style: BadgeStyle::Outline,
            border_radius: BorderRadius::Subtle,
            borders: BorderWeight::Subtle,
        },
        DesignPackage::Modern => PackageDefaults {
            font_family: FontFamily::Inter,
            badge_style: BadgeStyle::None,
            border_radius: BorderRadius::Pronounced,
            borders: BorderWeight::None,
        },
        DesignPackage::Minimal => PackageDefaults {
            font_family: FontFamily::Inter,
            badge_style: BadgeStyle::None,
            border_radius: BorderRadius::None,
            borders: BorderWeight::Subtle,
        },
        DesignPackage::Elegant => PackageDefaults {
            font_family: FontFamily::Playfair,
            badge_style: BadgeStyle::Pill,
            border_radius: BorderRadius::Subtle,
            borders: BorderWeight::None,
        },
    }
}

/// Style values in effect: explicit overrides, else package defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedStyle {
    pub package: DesignPackage,
    pub font_family: FontFamily,
    pub badge_style: BadgeStyle,
    pub border_radius: BorderRadius,
    pub borders: BorderWeight,
    pub spacing: Spacing,
}

impl ResolvedStyle {
    pub fn from_config(style: &StyleConfig) -> Self {
        let defaults = package_defaults(style.package);
        Self {
            package: style.package,
            font_family: style.font_family.unwrap_or(defaults.font_family),
            badge_style: style.badge_style.unwrap_or(defaults.badge_style),
            border_radius: style.border_radius.unwrap_or(defaults.border_radius),
            borders: style.borders.unwrap_or(defaults.borders),
            spacing: style.spacing,
        }
    }
}

// =============================================================================
// DESIGN-STYLE VARIABLES
// =============================================================================

/// Variables that follow the package directly, with no override.
pub fn design_style_variables(package: DesignPackage) -> ValueTable {
    let (shadow_card, shadow_elevated, heading_weight, letter_spacing, button_transform) =
        match package {
            DesignPackage::Classic => (
                "0 1px 3px rgba(0, 0, 0, 0.12)",
                "0 4px 12px rgba(0, 0, 0, 0.15)",
                "700",
                "0",
                "none",
            ),
            DesignPackage::Modern => (
                "0 10px 30px rgba(15, 23, 42, 0.08)",
                "0 20px 50px rgba(15, 23, 42, 0.14)",
                "800",
                "-0.02em",
                "none",
            ),
            DesignPackage::Minimal => ("none", "0 1px 2px rgba(0, 0, 0, 0.06)", "500", "0", "none"),
            DesignPackage::Elegant => (
                "0 2px 8px rgba(0, 0, 0, 0.06)",
                "0 12px 32px rgba(0, 0, 0, 0.10)",
                "400",
                "0.04em",
                "uppercase",
            ),
        };

    ValueTable::with_capacity(6)
        .with("--shadow-card", shadow_card)
        .with("--shadow-elevated", shadow_elevated)
        .with("--heading-font-weight", heading_weight)
        .with("--heading-letter-spacing", letter_spacing)
        .with("--button-text-transform", button_transform)
        .with("--current-design-style", package.as_str())
}

/// Vertical rhythm variables.
pub fn spacing_variables(spacing: Spacing) -> ValueTable {
    let (section, block, gap) = match spacing {
        Spacing::Compact => ("3rem", "1.5rem", "0.75rem"),
        Spacing::Normal => ("5rem", "2rem", "1rem"),
        Spacing::Relaxed => ("7rem", "3rem", "1.5rem"),
    };
    ValueTable::with_capacity(4)
        .with("--spacing-section", section)
        .with("--spacing-block", block)
        .with("--spacing-gap", gap)
        .with("--current-spacing", spacing.as_str())
}

// =============================================================================
// FONTS
// =============================================================================

/// Body and heading font stacks.
pub fn font_variables(font: FontFamily) -> ValueTable {
    const SYSTEM: &str =
        "system-ui, -apple-system, \"Segoe UI\", Roboto, \"Helvetica Neue\", Arial, sans-serif";
    let (body, heading) = match font {
        FontFamily::Inter => ("\"Inter\", sans-serif", "\"Inter\", sans-serif"),
        FontFamily::Playfair => ("\"Lato\", sans-serif", "\"Playfair Display\", Georgia, serif"),
        FontFamily::Poppins => ("\"Poppins\", sans-serif", "\"Poppins\", sans-serif"),
        FontFamily::System => (SYSTEM, SYSTEM),
    };
    ValueTable::with_capacity(3)
        .with("--font-family-base", body)
        .with("--font-family-heading", heading)
        .with("--current-font-family", font.as_str())
}
