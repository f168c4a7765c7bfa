//! Pure style computers.
//!
//! Each computer maps one slice of the configuration to a [`ValueTable`].
//! They hold no state and can be called without an orchestrator.

mod badge;
mod border;
mod heading;
mod radius;

use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::values::ValueTable;

pub use badge::BadgeStyleComputer;
pub use border::BorderComputer;
pub use heading::HeadingDecorationComputer;
pub use radius::BorderRadiusComputer;

/// A pure function from a configuration slice to style variables.
pub trait StyleComputer {
    type Input: ?Sized;

    /// Which family of variables this computer owns.
    const FAMILY: StyleFamily;

    fn compute(input: &Self::Input) -> Result<ValueTable>;
}

/// Groups of variables that are computed, and fail, together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleFamily {
    Radius,
    Border,
    Heading,
    Badge,
}

impl StyleFamily {
    pub const fn as_str(&self) -> &'static str {
        match self {
            StyleFamily::Radius => "radius",
            StyleFamily::Border => "border",
            StyleFamily::Heading => "heading",
            StyleFamily::Badge => "badge",
        }
    }
}

impl fmt::Display for StyleFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
