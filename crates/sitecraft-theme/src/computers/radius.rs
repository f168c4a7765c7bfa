use sitecraft_config::BorderRadius;

use super::{StyleComputer, StyleFamily};
use crate::error::Result;
use crate::values::ValueTable;

/// Per-element corner radii.
#[derive(Debug, Clone, Copy, Default)]
pub struct BorderRadiusComputer;

impl BorderRadiusComputer {
    /// `(button, card, input, modal, badge, image, xl)`.
    const fn radii(level: BorderRadius) -> [&'static str; 7] {
        match level {
            BorderRadius::None => [
                "0.25rem", "0.375rem", "0.25rem", "0.5rem", "0.25rem", "0.25rem", "0.5rem",
            ],
            BorderRadius::Subtle => [
                "0.5rem", "0.75rem", "0.5rem", "1rem", "0.375rem", "0.75rem", "1rem",
            ],
            BorderRadius::Pronounced => [
                "1.5rem", "1.75rem", "1rem", "2rem", "9999px", "1.5rem", "2.5rem",
            ],
        }
    }
}

impl StyleComputer for BorderRadiusComputer {
    type Input = BorderRadius;

    const FAMILY: StyleFamily = StyleFamily::Radius;

    fn compute(input: &BorderRadius) -> Result<ValueTable> {
        let [button, card, field, modal, badge, image, xl] = Self::radii(*input);
        Ok(ValueTable::with_capacity(8)
            .with("--radius-button", button)
            .with("--radius-card", card)
            .with("--radius-input", field)
            .with("--radius-modal", modal)
            .with("--radius-badge", badge)
            .with("--radius-image", image)
            .with("--radius-xl", xl)
            .with("--current-border-radius", input.as_str()))
    }
}
