use sitecraft_config::BadgeStyle;

use super::{StyleComputer, StyleFamily};
use crate::error::Result;
use crate::values::ValueTable;

/// Badge style token consumed by presentation code.
#[derive(Debug, Clone, Copy, Default)]
pub struct BadgeStyleComputer;

impl BadgeStyleComputer {
    pub const fn token(style: BadgeStyle) -> &'static str {
        match style {
            BadgeStyle::None => "badge-none",
            BadgeStyle::Pill => "badge-pill",
            BadgeStyle::Outline => "badge-outline",
            BadgeStyle::Solid => "badge-solid",
        }
    }
}

impl StyleComputer for BadgeStyleComputer {
    type Input = BadgeStyle;

    const FAMILY: StyleFamily = StyleFamily::Badge;

    fn compute(input: &BadgeStyle) -> Result<ValueTable> {
        Ok(ValueTable::new().with("--current-badge-style", Self::token(*input)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token() {
        let table = BadgeStyleComputer::compute(&BadgeStyle::Pill).unwrap();
        assert_eq!(table.get("--current-badge-style"), Some("badge-pill"));
        assert_eq!(table.len(), 1);
    }
}
