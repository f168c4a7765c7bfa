use sitecraft_config::{HeadingColor, HeadingStyle, HeadingsConfig};

use super::{StyleComputer, StyleFamily};
use crate::error::{Result, StyleError};
use crate::palette::Rgb;
use crate::values::ValueTable;

/// Heading underline decoration.
///
/// Disabled underlines and the `none` style collapse to the same "no
/// decoration" table whatever the color setting, so an invalid custom color
/// is only an error when it would actually be drawn.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingDecorationComputer;

impl HeadingDecorationComputer {
    fn color(config: &HeadingsConfig) -> Result<String> {
        let color = match config.color {
            HeadingColor::Primary => "var(--color-primary)".to_owned(),
            HeadingColor::Secondary => "var(--color-secondary)".to_owned(),
            HeadingColor::Accent => "var(--color-accent)".to_owned(),
            HeadingColor::Custom => config
                .custom_color
                .as_deref()
                .and_then(Rgb::parse_hex)
                .map(|rgb| rgb.to_string())
                .ok_or_else(|| StyleError::InvalidCustomColor {
                    value: config.custom_color.clone(),
                })?,
        };
        Ok(color)
    }
}

impl StyleComputer for HeadingDecorationComputer {
    type Input = HeadingsConfig;

    const FAMILY: StyleFamily = StyleFamily::Heading;

    fn compute(input: &HeadingsConfig) -> Result<ValueTable> {
        if !input.underline || input.style == HeadingStyle::None {
            return Ok(table("none", "transparent", "0px", "none", "none"));
        }

        let color = Self::color(input)?;
        let decoration = match input.style {
            HeadingStyle::Solid => table("block", &color, "3px", "solid", "none"),
            HeadingStyle::Dotted => table("block", &color, "3px", "dotted", "none"),
            HeadingStyle::Gradient => {
                let gradient = format!("linear-gradient(90deg, {color}, transparent)");
                table("block", &color, "4px", "solid", &gradient)
            }
            HeadingStyle::None => table("none", "transparent", "0px", "none", "none"),
        };
        Ok(decoration)
    }
}

fn table(display: &str, color: &str, thickness: &str, style: &str, background: &str) -> ValueTable {
    ValueTable::with_capacity(5)
        .with("--heading-underline-display", display)
        .with("--heading-underline-color", color)
        .with("--heading-underline-thickness", thickness)
        .with("--heading-underline-style", style)
        .with("--heading-underline-background", background)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headings(underline: bool, style: HeadingStyle, color: HeadingColor) -> HeadingsConfig {
        HeadingsConfig {
            underline,
            style,
            color,
            custom_color: None,
        }
    }

    #[test]
    fn test_disabled_collapses() {
        let off = HeadingDecorationComputer::compute(&headings(
            false,
            HeadingStyle::Gradient,
            HeadingColor::Accent,
        ))
        .unwrap();
        let none = HeadingDecorationComputer::compute(&headings(
            true,
            HeadingStyle::None,
            HeadingColor::Primary,
        ))
        .unwrap();
        assert_eq!(off, none);
        assert_eq!(off.get("--heading-underline-display"), Some("none"));
    }

    #[test]
    fn test_gradient_uses_color() {
        let table = HeadingDecorationComputer::compute(&headings(
            true,
            HeadingStyle::Gradient,
            HeadingColor::Secondary,
        ))
        .unwrap();
        assert_eq!(
            table.get("--heading-underline-background"),
            Some("linear-gradient(90deg, var(--color-secondary), transparent)")
        );
    }

    #[test]
    fn test_custom_color() {
        let mut config = headings(true, HeadingStyle::Solid, HeadingColor::Custom);
        let err = HeadingDecorationComputer::compute(&config).unwrap_err();
        assert_eq!(err, StyleError::InvalidCustomColor { value: None });

        config.custom_color = Some("teal".into());
        assert!(HeadingDecorationComputer::compute(&config).is_err());

        config.custom_color = Some("#ABC".into());
        let table = HeadingDecorationComputer::compute(&config).unwrap();
        assert_eq!(table.get("--heading-underline-color"), Some("#aabbcc"));
    }

    #[test]
    fn test_invalid_custom_color_ignored_when_not_drawn() {
        let mut config = headings(false, HeadingStyle::Solid, HeadingColor::Custom);
        config.custom_color = Some("teal".into());
        assert!(HeadingDecorationComputer::compute(&config).is_ok());
    }
}
