//! Growth-map computation.
//!
//! For every unassigned cell of a placement grid, the growth map encodes
//! which cardinal directions a new brick seeded at that cell may extend
//! toward. The rule is a corner check: when both cardinal neighbors of a
//! diagonal quadrant are occupied, two placed edges meet at that corner,
//! and a new brick must not start its own corner there. Cells outside the
//! layer count as occupied, so the layer boundary seeds growth the same
//! way placed bricks do.

use brix_grid::Grid2;

/// Sentinel for cells that cannot seed a new brick: assigned, excluded,
/// or with no occupied corner adjacency at all.
pub const UNGROWABLE: i8 = -1;

/// New bricks may extend toward row 0.
pub const GROW_UP: i8 = 1;
/// New bricks may extend toward the last row.
pub const GROW_DOWN: i8 = 2;
/// New bricks may extend toward column 0.
pub const GROW_LEFT: i8 = 4;
/// New bricks may extend toward the last column.
pub const GROW_RIGHT: i8 = 8;

/// Occupancy with the boundary treated as structure.
fn occupied(grid: &Grid2<i32>, row: isize, col: isize) -> bool {
    if row < 0 || col < 0 || row >= grid.rows() as isize || col >= grid.cols() as isize {
        return true;
    }
    grid[(row as usize, col as usize)] != 0
}

/// Compute the growth map for the current placement state.
///
/// Pure function of the grid, O(cells). Unassigned cells adjacent to at
/// least one occupied corner pair get a bit-OR of legal grow directions;
/// everything else maps to [`UNGROWABLE`]. Isolated interior cells stay
/// dormant until a neighbor is placed or the region shrinks to touch
/// them.
pub fn growth_map(placement: &Grid2<i32>) -> Grid2<i8> {
    let mut map = Grid2::new(placement.rows(), placement.cols(), UNGROWABLE);
    for row in 0..placement.rows() {
        for col in 0..placement.cols() {
            if placement[(row, col)] != 0 {
                continue;
            }
            let (r, c) = (row as isize, col as isize);
            let up = occupied(placement, r - 1, c);
            let down = occupied(placement, r + 1, c);
            let left = occupied(placement, r, c - 1);
            let right = occupied(placement, r, c + 1);

            let upper_left = up && left;
            let upper_right = up && right;
            let lower_right = down && right;
            let lower_left = down && left;

            if !(upper_left || upper_right || lower_right || lower_left) {
                continue;
            }

            let mut allow = 0;
            if !upper_left && !lower_left {
                allow |= GROW_UP;
            }
            if !upper_right && !lower_right {
                allow |= GROW_DOWN;
            }
            if !upper_left && !upper_right {
                allow |= GROW_LEFT;
            }
            if !lower_left && !lower_right {
                allow |= GROW_RIGHT;
            }
            map[(row, col)] = allow;
        }
    }
    map
}
