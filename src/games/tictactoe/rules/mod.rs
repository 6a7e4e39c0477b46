//! Game rules for the arcade board.
//!
//! Pure functions over a [`Grid`]. Rules never touch hardware and never
//! mutate the grid, so the same grid always evaluates to the same
//! [`Outcome`].

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{WIN_LINES, find_line, line_owner};

use super::Grid;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Result of evaluating a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Outcome {
    /// Round still open.
    #[display("no result")]
    NoResult,
    /// Winning triple, as an index into [`WIN_LINES`].
    #[display("line {_0}")]
    Line(usize),
    /// Every cell claimed and no winning triple.
    #[display("draw")]
    Draw,
}

impl Outcome {
    /// Returns the cell indices of the winning triple, if any.
    pub fn cells(&self) -> Option<[usize; 3]> {
        match self {
            Outcome::Line(index) => WIN_LINES.get(*index).copied(),
            Outcome::NoResult | Outcome::Draw => None,
        }
    }

    /// Returns true if the round is over.
    pub fn is_final(&self) -> bool {
        !matches!(self, Outcome::NoResult)
    }
}

/// Evaluates a grid.
///
/// The win check runs before the tie check, so a complete grid that also
/// holds a line reports [`Outcome::Line`].
#[instrument(skip(grid), fields(grid = %grid.display()))]
pub fn evaluate(grid: &Grid) -> Outcome {
    if let Some(line) = find_line(grid) {
        return Outcome::Line(line);
    }
    if is_full(grid) {
        return Outcome::Draw;
    }
    Outcome::NoResult
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Cell, Player};

    const A: Cell = Cell::Claimed(Player::A);
    const B: Cell = Cell::Claimed(Player::B);
    const E: Cell = Cell::Empty;

    #[test]
    fn test_top_row() {
        let grid = Grid::from([A, A, A, E, E, E, E, E, E]);
        assert_eq!(evaluate(&grid), Outcome::Line(0));
        assert_eq!(evaluate(&grid).cells(), Some([0, 1, 2]));
    }

    #[test]
    fn test_line_beats_full_grid() {
        // Full board whose last claim completed the right column.
        let grid = Grid::from([A, B, A, B, B, A, B, A, A]);
        assert!(is_full(&grid));
        assert_eq!(evaluate(&grid), Outcome::Line(5));
    }

    #[test]
    fn test_draw() {
        let grid = Grid::from([A, B, A, A, B, B, B, A, A]);
        assert_eq!(evaluate(&grid), Outcome::Draw);
        assert!(evaluate(&grid).is_final());
    }

    #[test]
    fn test_open_round() {
        let grid = Grid::from([A, B, E, E, E, E, E, E, E]);
        assert_eq!(evaluate(&grid), Outcome::NoResult);
        assert_eq!(evaluate(&grid).cells(), None);
    }
}
