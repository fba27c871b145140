//! Greedy brick placement over a single layer.

use brix_grid::Grid2;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::BrickCatalog;
use crate::error::{LayoutError, Result};
use crate::growth::{growth_map, GROW_LEFT, GROW_UP, UNGROWABLE};

/// The unit of independent processing.
#[derive(Debug, Clone, Copy)]
pub enum Layer<'a> {
    /// A slice of a voxel volume. Cells hold color indices; `0` marks
    /// empty cells, which are excluded from placement, and bricks may
    /// only cover cells of one color.
    Colored(&'a Grid2<u8>),
    /// A blank rectangle: every cell is fillable, no color constraint.
    Blank {
        /// Row count.
        rows: usize,
        /// Column count.
        cols: usize,
    },
}

impl Layer<'_> {
    fn shape(&self) -> (usize, usize) {
        match self {
            Layer::Colored(colors) => (colors.rows(), colors.cols()),
            Layer::Blank { rows, cols } => (*rows, *cols),
        }
    }

    fn colors(&self) -> Option<&Grid2<u8>> {
        match *self {
            Layer::Colored(colors) => Some(colors),
            Layer::Blank { .. } => None,
        }
    }
}

/// Catalog iteration strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeOrder {
    /// Try sizes in catalog order (largest first with the default
    /// catalog). Used for color-constrained layers.
    Fixed,
    /// Reshuffle both size lists before every placement. Used for
    /// colorless covers.
    Shuffled,
}

/// Greedy placer: repeatedly seeds a brick at a random growable cell and
/// commits the first catalog footprint that fits.
#[derive(Debug)]
pub struct BrickPlacer<'a> {
    catalog: &'a BrickCatalog,
    order: SizeOrder,
}

impl<'a> BrickPlacer<'a> {
    /// Create a placer over `catalog` with the given size ordering.
    pub fn new(catalog: &'a BrickCatalog, order: SizeOrder) -> Self {
        Self { catalog, order }
    }

    /// Decompose one layer into bricks.
    ///
    /// Returns the placement grid: `-1` excluded, `k >= 1` brick ids in
    /// order of commitment (ids are scoped to this layer). Every
    /// placeable cell ends up assigned; the loop commits one brick per
    /// iteration, so it runs at most `rows * cols` rounds.
    pub fn run<R: Rng>(&self, layer: Layer<'_>, rng: &mut R) -> Result<Grid2<i32>> {
        let (rows, cols) = layer.shape();
        let mut placement = Grid2::new(rows, cols, 0i32);
        if let Some(colors) = layer.colors() {
            for (r, c, color) in colors.cells() {
                if color == 0 {
                    placement[(r, c)] = -1;
                }
            }
        }

        let mut widths = self.catalog.widths.clone();
        let mut lengths = self.catalog.lengths.clone();
        let mut next_id = 1;

        loop {
            let map = growth_map(&placement);
            let growable: Vec<(usize, usize)> = map
                .cells()
                .filter(|&(_, _, allow)| allow != UNGROWABLE)
                .map(|(r, c, _)| (r, c))
                .collect();
            let Some(&(row, col)) = growable.choose(rng) else {
                break;
            };
            let allow = map[(row, col)];

            if self.order == SizeOrder::Shuffled {
                widths.shuffle(rng);
                lengths.shuffle(rng);
            }

            if place_at(&mut placement, &layer, row, col, allow, &widths, &lengths, next_id) {
                next_id += 1;
            } else {
                // The 1x1 fallback makes this unreachable unless the
                // growth map marked a cell it should not have.
                return Err(LayoutError::Stalled { row, col });
            }
        }

        Ok(placement)
    }
}

/// Try every catalog footprint at `(row, col)` and commit the first fit.
#[allow(clippy::too_many_arguments)]
fn place_at(
    placement: &mut Grid2<i32>,
    layer: &Layer<'_>,
    row: usize,
    col: usize,
    allow: i8,
    widths: &[u32],
    lengths: &[u32],
    id: i32,
) -> bool {
    for &w in widths {
        // The growth bits pick which way each axis extends; the sign
        // travels with the size through both orientations.
        let w_span = if allow & GROW_UP != 0 {
            -(w as isize)
        } else {
            w as isize
        };
        for &l in lengths {
            let l_span = if allow & GROW_LEFT != 0 {
                -(l as isize)
            } else {
                l as isize
            };
            if try_commit(placement, layer, row, col, w_span, l_span, id) {
                return true;
            }
            if try_commit(placement, layer, row, col, l_span, w_span, id) {
                return true;
            }
        }
    }
    false
}

/// Cells covered by a signed span starting at `start`, or `None` when the
/// span leaves `0..len`. A negative span keeps `start` as its high end.
fn footprint(start: usize, span: isize, len: usize) -> Option<std::ops::Range<usize>> {
    let end = start as isize + span;
    if end < 0 || end > len as isize {
        return None;
    }
    if span > 0 {
        Some(start..end as usize)
    } else {
        Some((end + 1) as usize..start + 1)
    }
}

/// Validate one footprint and stamp it into the placement grid.
fn try_commit(
    placement: &mut Grid2<i32>,
    layer: &Layer<'_>,
    row: usize,
    col: usize,
    row_span: isize,
    col_span: isize,
    id: i32,
) -> bool {
    let Some(row_range) = footprint(row, row_span, placement.rows()) else {
        return false;
    };
    let Some(col_range) = footprint(col, col_span, placement.cols()) else {
        return false;
    };

    for r in row_range.clone() {
        for c in col_range.clone() {
            if placement[(r, c)] != 0 {
                return false;
            }
        }
    }

    if let Some(colors) = layer.colors() {
        let reference = colors[(row_range.start, col_range.start)];
        for r in row_range.clone() {
            for c in col_range.clone() {
                if colors[(r, c)] != reference {
                    return false;
                }
            }
        }
    }

    for r in row_range {
        for c in col_range.clone() {
            placement[(r, c)] = id;
        }
    }
    true
}
