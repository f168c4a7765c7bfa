//! Style computation errors.

use thiserror::Error;

/// A style computer rejected its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    /// Heading color is `custom` but no usable hex color was supplied.
    #[error("custom heading color requires a #rgb or #rrggbb value, got {}", .value.as_deref().unwrap_or("nothing"))]
    InvalidCustomColor { value: Option<String> },
}

/// Result type alias for style computation.
pub type Result<T> = std::result::Result<T, StyleError>;
