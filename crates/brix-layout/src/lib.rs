#![warn(missing_docs)]

//! Greedy per-layer brick decomposition of voxel volumes.
//!
//! This crate approximates how a voxel model could be assembled from
//! rectangular interlocking bricks. The volume is sliced along one axis
//! and every layer is decomposed independently: a growth map derived from
//! corner adjacency marks where a new brick may be seeded and which way it
//! may extend, and a greedy loop commits the first catalog footprint that
//! fits until the layer is exhausted.
//!
//! # Example
//!
//! ```ignore
//! use brix_layout::{decompose, LayoutSettings};
//!
//! let volume = brix_vox::read_vox("model.vox")?;
//! let result = decompose(&volume, &LayoutSettings::default())?;
//!
//! println!("Layers: {}", result.stats.layer_count);
//! println!("Bricks: {}", result.stats.brick_count);
//! ```

pub mod catalog;
pub mod error;
pub mod growth;
pub mod placer;

pub use catalog::BrickCatalog;
pub use error::{LayoutError, Result};
pub use growth::{growth_map, GROW_DOWN, GROW_LEFT, GROW_RIGHT, GROW_UP, UNGROWABLE};
pub use placer::{BrickPlacer, Layer, SizeOrder};

use brix_grid::{Axis, Grid2, Grid3};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Decomposition parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutSettings {
    /// Axis the volume is sliced along.
    pub axis: Axis,
    /// Master seed; every layer derives its own random stream from it.
    pub seed: u64,
    /// Brick footprints available to the placer.
    pub catalog: BrickCatalog,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            axis: Axis::Z,
            seed: 0,
            catalog: BrickCatalog::default(),
        }
    }
}

impl LayoutSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        self.catalog.validate()
    }
}

/// Statistics about a decomposed volume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutStats {
    /// Number of layers processed.
    pub layer_count: usize,
    /// Total bricks committed across all layers.
    pub brick_count: usize,
    /// Number of non-empty voxels in the source volume.
    pub voxel_count: usize,
    /// Bricks committed per layer, in slice order.
    pub bricks_per_layer: Vec<usize>,
}

/// Result of decomposing a volume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decomposition {
    /// Per-voxel brick ids, same shape as the input volume. `-1` marks
    /// empty voxels; positive ids are scoped to their layer.
    pub labels: Grid3<i32>,
    /// Summary counters.
    pub stats: LayoutStats,
}

/// Decompose a voxel volume into per-layer bricks.
///
/// Slices `volume` along `settings.axis` and runs the placer on every
/// slice independently, with color-constrained placement and the fixed
/// (largest-first) catalog order. Layers are processed in parallel; each
/// derives an independent random stream from the master seed, so the
/// output is identical however the work is scheduled.
pub fn decompose(volume: &Grid3<u8>, settings: &LayoutSettings) -> Result<Decomposition> {
    settings.validate()?;

    let axis = settings.axis;
    let layer_count = volume.len_along(axis);
    let placer = BrickPlacer::new(&settings.catalog, SizeOrder::Fixed);

    let layers: Vec<Grid2<i32>> = (0..layer_count)
        .into_par_iter()
        .map(|index| -> Result<Grid2<i32>> {
            let colors = volume.slice(axis, index);
            let mut rng = ChaCha8Rng::seed_from_u64(settings.seed);
            rng.set_stream(index as u64);
            let placement = placer.run(Layer::Colored(&colors), &mut rng)?;
            log::debug!(
                "layer {}/{}: {} bricks",
                index + 1,
                layer_count,
                brick_count(&placement)
            );
            Ok(placement)
        })
        .collect::<Result<Vec<_>>>()?;

    let (x, y, z) = volume.dims();
    let mut labels = Grid3::new(x, y, z, -1i32);
    let mut bricks_per_layer = Vec::with_capacity(layer_count);
    for (index, placement) in layers.iter().enumerate() {
        labels.set_slice(axis, index, placement);
        bricks_per_layer.push(brick_count(placement));
    }

    let stats = LayoutStats {
        layer_count,
        brick_count: bricks_per_layer.iter().sum(),
        voxel_count: volume.iter().filter(|&&v| v != 0).count(),
        bricks_per_layer,
    };

    Ok(Decomposition { labels, stats })
}

/// Cover a blank rectangle with bricks (the colorless variant).
///
/// No cells are excluded and no color constraint applies; the catalog
/// order is reshuffled before every placement for a varied brick mix.
pub fn cover(rows: usize, cols: usize, catalog: &BrickCatalog, seed: u64) -> Result<Grid2<i32>> {
    catalog.validate()?;
    let placer = BrickPlacer::new(catalog, SizeOrder::Shuffled);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    placer.run(Layer::Blank { rows, cols }, &mut rng)
}

/// Number of bricks in one layer's placement grid.
fn brick_count(placement: &Grid2<i32>) -> usize {
    placement.iter().copied().max().unwrap_or(0).max(0) as usize
}
