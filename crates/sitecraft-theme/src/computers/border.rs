use sitecraft_config::BorderWeight;

use super::{StyleComputer, StyleFamily};
use crate::error::Result;
use crate::values::ValueTable;

/// Outline width, line style and color.
#[derive(Debug, Clone, Copy, Default)]
pub struct BorderComputer;

impl StyleComputer for BorderComputer {
    type Input = BorderWeight;

    const FAMILY: StyleFamily = StyleFamily::Border;

    fn compute(input: &BorderWeight) -> Result<ValueTable> {
        let (width, style, color) = match input {
            BorderWeight::None => ("0px", "none", "transparent"),
            BorderWeight::Subtle => ("1px", "solid", "var(--color-border)"),
            BorderWeight::Bold => ("2px", "solid", "var(--color-border)"),
        };
        Ok(ValueTable::with_capacity(4)
            .with("--border-width", width)
            .with("--border-style", style)
            .with("--border-color", color)
            .with("--current-border-style", input.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triples() {
        let none = BorderComputer::compute(&BorderWeight::None).unwrap();
        assert_eq!(none.get("--border-width"), Some("0px"));
        assert_eq!(none.get("--border-style"), Some("none"));
        assert_eq!(none.get("--border-color"), Some("transparent"));

        let bold = BorderComputer::compute(&BorderWeight::Bold).unwrap();
        assert_eq!(bold.get("--border-width"), Some("2px"));
        assert_eq!(bold.get("--border-color"), Some("var(--color-border)"));
    }
}
