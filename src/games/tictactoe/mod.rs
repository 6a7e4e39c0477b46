//! Tic-tac-toe rules and round state for the arcade board.

mod invariants;
mod position;
mod round;
mod rules;
mod types;

pub use invariants::{
    AlternatingTurnInvariant, Invariant, InvariantSet, InvariantViolation, RoundInvariants,
    SingleWinnerInvariant,
};
pub use position::Position;
pub use round::{ClaimOutcome, Round};
pub use rules::{Outcome, WIN_LINES, evaluate, find_line, is_full, line_owner};
pub use types::{ButtonId, Cell, Grid, Player};
