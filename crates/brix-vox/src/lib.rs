#![warn(missing_docs)]

//! Chunk-based voxel model file import.
//!
//! Parses the binary model format consumed by the layout engine: an
//! 8-byte file header followed by nested chunks, of which three kinds are
//! recognized — a container chunk (`MAIN`), a size chunk (`SIZE`, three
//! u32-le extents) and a voxel-cloud chunk (`XYZI`, a count followed by
//! `x, y, z, color` byte records). The result is a dense [`brix_grid::Grid3`]
//! trimmed to the tight bounding box of its nonzero content.
//!
//! # Example
//!
//! ```ignore
//! let volume = brix_vox::read_vox("model.vox")?;
//! let (x, y, z) = volume.dims();
//! println!("{x} x {y} x {z} voxels");
//! ```

pub mod chunk;
pub mod error;
pub mod reader;

pub use chunk::{parse_chunks, RawChunk};
pub use error::{Result, VoxError};
pub use reader::{read_vox, read_vox_from_buffer};
