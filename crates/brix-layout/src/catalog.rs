//! The brick size catalog.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Candidate brick footprint dimensions, in studs.
///
/// Orderings are significant: the placer tries widths and lengths in the
/// order given here and commits the first footprint that fits, so listing
/// larger sizes first biases the layout toward big bricks. Both axes must
/// contain `1` so that a lone cell can always be closed with a 1×1 brick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrickCatalog {
    /// Candidate widths, tried outermost.
    pub widths: Vec<u32>,
    /// Candidate lengths, tried innermost.
    pub lengths: Vec<u32>,
}

impl Default for BrickCatalog {
    /// Real interlocking-brick plate dimensions: widths 1–2 studs,
    /// lengths up to 10 studs.
    fn default() -> Self {
        Self {
            widths: vec![2, 1],
            lengths: vec![10, 8, 6, 4, 3, 2, 1],
        }
    }
}

impl BrickCatalog {
    /// Check that the catalog can cover arbitrary regions.
    pub fn validate(&self) -> Result<()> {
        if self.widths.is_empty() || self.lengths.is_empty() {
            return Err(LayoutError::InvalidCatalog(
                "width and length lists must be non-empty".into(),
            ));
        }
        if self.widths.iter().chain(&self.lengths).any(|&d| d == 0) {
            return Err(LayoutError::InvalidCatalog(
                "brick dimensions must be positive".into(),
            ));
        }
        if !self.widths.contains(&1) || !self.lengths.contains(&1) {
            return Err(LayoutError::InvalidCatalog(
                "both axes must offer 1 so a 1x1 brick always fits".into(),
            ));
        }
        Ok(())
    }

    /// Whether `(w, l)` is a catalog footprint, in either orientation.
    pub fn contains_footprint(&self, w: u32, l: u32) -> bool {
        (self.widths.contains(&w) && self.lengths.contains(&l))
            || (self.widths.contains(&l) && self.lengths.contains(&w))
    }
}
