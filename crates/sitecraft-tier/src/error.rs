//! Error types for tier and content handling.

use thiserror::Error;

/// Content catalog failure.
#[derive(Debug, Error)]
pub enum TierError {
    /// The catalog text is not valid catalog JSON.
    #[error("invalid content catalog")]
    Catalog(#[source] serde_json::Error),
}

/// Result type alias for tier operations.
pub type Result<T> = std::result::Result<T, TierError>;
