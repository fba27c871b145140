//! Error types for the layout engine.

use thiserror::Error;

/// Errors that can occur during brick layout.
#[derive(Error, Debug)]
pub enum LayoutError {
    /// The brick catalog cannot cover arbitrary regions.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    /// A growable cell accepted no footprint, not even 1×1.
    ///
    /// This signals a growth-map invariant violation, never an expected
    /// runtime condition.
    #[error("placement stalled at cell ({row}, {col})")]
    Stalled {
        /// Row of the stalled cell.
        row: usize,
        /// Column of the stalled cell.
        col: usize,
    },
}

/// Result type for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;
