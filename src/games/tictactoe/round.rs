//! One round of play: the cell grid plus the player to move.

use super::invariants::{InvariantSet, RoundInvariants};
use super::{ButtonId, Grid, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// What happened to a claim request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum ClaimOutcome {
    /// The cell was empty and now belongs to `player`.
    #[display("{player} claimed {position}")]
    Claimed {
        /// Player who made the claim.
        player: Player,
        /// Claimed cell.
        position: Position,
    },
    /// The cell already belongs to someone; nothing changed.
    #[display("{_0} is already claimed")]
    Occupied(Position),
    /// Index outside 0-8; nothing changed.
    #[display("index {_0} is off the board")]
    OutOfRange(usize),
    /// No round is being played; nothing changed.
    #[display("no round in play")]
    NotPlaying,
}

impl ClaimOutcome {
    /// Returns true if the claim changed the grid.
    pub fn is_claimed(&self) -> bool {
        matches!(self, ClaimOutcome::Claimed { .. })
    }
}

/// Grid and turn state for a single round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    grid: Grid,
    to_move: Player,
}

impl Round {
    /// Creates a round with an empty grid and red to move.
    pub fn new() -> Self {
        Self {
            grid: Grid::new(),
            to_move: Player::A,
        }
    }

    /// Rebuilds a round from a grid snapshot and the player to move.
    pub fn from_parts(grid: Grid, to_move: Player) -> Self {
        Self { grid, to_move }
    }

    /// Returns the grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the player to move.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Claims cell `index` for the player to move.
    ///
    /// The turn toggles exactly once on success and never otherwise.
    #[instrument(skip(self), fields(to_move = %self.to_move))]
    pub fn claim(&mut self, index: usize) -> ClaimOutcome {
        let Some(button) = ButtonId::new(index) else {
            debug!("Claim rejected: off the board");
            return ClaimOutcome::OutOfRange(index);
        };
        let position = Position::from(button);
        let player = self.to_move;

        if !self.grid.claim(button, player) {
            debug!(%position, "Claim rejected: cell taken");
            return ClaimOutcome::Occupied(position);
        }
        self.to_move = player.opponent();

        if let Err(violations) = RoundInvariants::check_all(self) {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(grid = %self.grid.display(), %descriptions, "Round invariant violated");
            debug_assert!(false, "Round invariant violated: {descriptions}");
        }

        ClaimOutcome::Claimed { player, position }
    }

    /// Keeps only the cells of a winning triple lit.
    ///
    /// Returns the indices that were blanked.
    pub fn keep_line(&mut self, line: [usize; 3]) -> Vec<usize> {
        self.grid.retain_line(line)
    }

    /// Clears the grid and gives red the first move.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.to_move = Player::A;
    }
}

impl Default for Round {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Cell;

    #[test]
    fn test_claim_toggles_turn() {
        let mut round = Round::new();
        let outcome = round.claim(4);
        assert_eq!(
            outcome,
            ClaimOutcome::Claimed {
                player: Player::A,
                position: Position::Center
            }
        );
        assert_eq!(round.to_move(), Player::B);
    }

    #[test]
    fn test_occupied_claim_is_a_no_op() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::Claimed(Player::A);
        cells[4] = Cell::Claimed(Player::B);
        let mut round = Round::from_parts(Grid::from(cells), Player::A);
        let before = round.clone();

        assert_eq!(round.claim(4), ClaimOutcome::Occupied(Position::Center));
        assert_eq!(round, before);
        assert_eq!(round.to_move(), Player::A);
    }

    #[test]
    fn test_out_of_range_claim() {
        let mut round = Round::new();
        assert_eq!(round.claim(9), ClaimOutcome::OutOfRange(9));
        assert_eq!(round, Round::new());
    }

    #[test]
    fn test_reset_gives_red_the_move() {
        let mut round = Round::new();
        round.claim(0);
        round.reset();
        assert_eq!(round, Round::new());
    }
}
