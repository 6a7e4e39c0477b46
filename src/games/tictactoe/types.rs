//! Core domain types for the arcade board.

use super::position::Position;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Player {
    /// Red player (moves first every round).
    #[display("RED")]
    A,
    /// Blue player.
    #[display("BLUE")]
    B,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }
}

/// A cell of the 3x3 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Unclaimed cell (indicator off).
    Empty,
    /// Cell claimed by a player.
    Claimed(Player),
}

impl Cell {
    /// Returns true if nobody has claimed the cell.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Returns the player holding the cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Claimed(player) => Some(player),
        }
    }
}

/// Logical button identifier (0-8), one per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("{_0}")]
pub struct ButtonId(pub(super) u8);

impl ButtonId {
    /// Number of buttons (and cells) on the board.
    pub const COUNT: usize = 9;

    /// Creates a button id, rejecting indices outside 0-8.
    pub fn new(index: usize) -> Option<Self> {
        (index < Self::COUNT).then_some(Self(index as u8))
    }

    /// Returns the cell index this button maps to.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// All buttons in scan order.
    pub fn all() -> impl Iterator<Item = ButtonId> {
        Position::iter().map(Position::button)
    }
}

/// 3x3 cell grid in row-major order (index = row * 3 + col).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: [Cell; 9],
}

impl Grid {
    /// Creates a new empty grid.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Gets the cell at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Returns the cell a button maps to.
    pub fn cell(&self, button: ButtonId) -> Cell {
        self.cells[button.index()]
    }

    /// Claims an empty cell for a player.
    ///
    /// Returns false and leaves the grid untouched if the cell is taken.
    pub fn claim(&mut self, button: ButtonId, player: Player) -> bool {
        let cell = &mut self.cells[button.index()];
        if !cell.is_empty() {
            return false;
        }
        *cell = Cell::Claimed(player);
        true
    }

    /// Blanks every cell outside `line`, returning the indices that were cleared.
    pub fn retain_line(&mut self, line: [usize; 3]) -> Vec<usize> {
        let mut cleared = Vec::new();
        for (index, cell) in self.cells.iter_mut().enumerate() {
            if !line.contains(&index) && !cell.is_empty() {
                *cell = Cell::Empty;
                cleared.push(index);
            }
        }
        cleared
    }

    /// Full-grid reset.
    pub fn clear(&mut self) {
        self.cells = [Cell::Empty; 9];
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Number of cells held by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == Cell::Claimed(player))
            .count()
    }

    /// Formats the grid as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let symbol = match self.cells[row * 3 + col] {
                    Cell::Empty => '.',
                    Cell::Claimed(Player::A) => 'R',
                    Cell::Claimed(Player::B) => 'B',
                };
                result.push(symbol);
            }
            if row < 2 {
                result.push('/');
            }
        }
        result
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[Cell; 9]> for Grid {
    fn from(cells: [Cell; 9]) -> Self {
        Self { cells }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(index: usize) -> ButtonId {
        ButtonId::new(index).unwrap()
    }

    #[test]
    fn test_button_id_range() {
        assert!(ButtonId::new(8).is_some());
        assert!(ButtonId::new(9).is_none());
        let scan: Vec<usize> = ButtonId::all().map(ButtonId::index).collect();
        assert_eq!(scan, (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_claim_only_empty() {
        let mut grid = Grid::new();
        assert!(grid.claim(button(4), Player::B));
        assert!(!grid.claim(button(4), Player::A));
        assert_eq!(grid.cell(button(4)), Cell::Claimed(Player::B));
    }

    #[test]
    fn test_retain_line() {
        let mut grid = Grid::new();
        for i in [0, 1, 2, 4, 8] {
            grid.claim(button(i), Player::A);
        }
        let cleared = grid.retain_line([0, 1, 2]);
        assert_eq!(cleared, vec![4, 8]);
        assert_eq!(grid.count(Player::A), 3);
        assert_eq!(grid.display(), "RRR/.../...");
    }
}
