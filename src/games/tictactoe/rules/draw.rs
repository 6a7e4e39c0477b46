//! Draw detection.

use super::super::Grid;

/// Checks if every cell is claimed.
///
/// A full grid with no winning triple is a draw.
pub fn is_full(grid: &Grid) -> bool {
    grid.cells().iter().all(|c| !c.is_empty())
}
