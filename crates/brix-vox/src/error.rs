//! Error types for model file import.

use thiserror::Error;

/// Errors that can occur while reading a voxel model file.
#[derive(Error, Debug)]
pub enum VoxError {
    /// I/O error reading the file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The byte stream ended inside a header, chunk, or record.
    #[error("truncated model data: needed {needed} bytes, {available} available")]
    Truncated {
        /// Bytes the parser needed.
        needed: usize,
        /// Bytes actually present.
        available: usize,
    },

    /// A required chunk kind was not found.
    #[error("missing chunk: {0}")]
    MissingChunk(&'static str),

    /// A voxel record lies outside the declared model size.
    #[error("voxel ({x}, {y}, {z}) outside model size {size_x}x{size_y}x{size_z}")]
    VoxelOutOfBounds {
        /// Record x coordinate.
        x: u8,
        /// Record y coordinate.
        y: u8,
        /// Record z coordinate.
        z: u8,
        /// Declared x extent.
        size_x: usize,
        /// Declared y extent.
        size_y: usize,
        /// Declared z extent.
        size_z: usize,
    },
}

impl VoxError {
    /// Create a truncation error.
    pub fn truncated(needed: usize, available: usize) -> Self {
        Self::Truncated { needed, available }
    }
}

/// Result type for model import operations.
pub type Result<T> = std::result::Result<T, VoxError>;
