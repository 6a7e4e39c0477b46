//! Win detection.

use super::super::{Grid, Player};
use tracing::instrument;

/// The eight winning triples: rows, columns, diagonals.
pub const WIN_LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Finds the first monochromatic triple in table order.
///
/// Returns its index into [`WIN_LINES`].
#[instrument(skip(grid))]
pub fn find_line(grid: &Grid) -> Option<usize> {
    WIN_LINES.iter().position(|&[a, b, c]| {
        let cell = grid.get(a);
        matches!(cell, Some(c0) if !c0.is_empty()) && cell == grid.get(b) && cell == grid.get(c)
    })
}

/// Returns the player owning every cell of a winning triple.
///
/// `None` means the triple is not a monochromatic claimed line, which only
/// happens if the grid changed after evaluation.
pub fn line_owner(grid: &Grid, line: usize) -> Option<Player> {
    let [a, b, c] = *WIN_LINES.get(line)?;
    let owner = grid.get(a)?.owner()?;
    (grid.get(b)?.owner() == Some(owner) && grid.get(c)?.owner() == Some(owner)).then_some(owner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Cell;

    const A: Cell = Cell::Claimed(Player::A);
    const B: Cell = Cell::Claimed(Player::B);
    const E: Cell = Cell::Empty;

    #[test]
    fn test_no_line_empty_grid() {
        assert_eq!(find_line(&Grid::new()), None);
    }

    #[test]
    fn test_diagonal() {
        let grid = Grid::from([B, E, A, E, B, A, E, E, B]);
        assert_eq!(find_line(&grid), Some(6));
        assert_eq!(line_owner(&grid, 6), Some(Player::B));
    }

    #[test]
    fn test_mixed_triple_is_not_a_line() {
        let grid = Grid::from([A, A, B, E, E, E, E, E, E]);
        assert_eq!(find_line(&grid), None);
    }

    #[test]
    fn test_owner_of_stale_line_is_unknown() {
        let grid = Grid::from([A, B, A, E, E, E, E, E, E]);
        assert_eq!(line_owner(&grid, 0), None);
        assert_eq!(line_owner(&grid, 42), None);
    }
}
