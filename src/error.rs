//! Library error type.

use thiserror::Error;

/// Result type alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("duplicate label in dataset: {label}")]
    DuplicateLabel { label: String },

    /// A chart hook was used without an enclosing provider. This is a wiring bug,
    /// never a runtime condition.
    #[error("{hook} should be used within {provider}")]
    OutsideProvider {
        hook: &'static str,
        provider: &'static str,
    },

    #[error("no bar at index {index} (chart has {len} bars)")]
    UnknownBar { index: usize, len: usize },

    #[error("invalid color `{0}`, expected #RRGGBB")]
    InvalidColor(String),
}
