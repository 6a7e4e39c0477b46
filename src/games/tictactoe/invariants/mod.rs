//! First-class invariants for a round.
//!
//! Invariants are logical properties that must hold after every accepted
//! claim. They are checked by [`Round::claim`](super::Round::claim) and
//! can be tested independently.

pub mod alternating_turn;
pub mod single_winner;

pub use alternating_turn::AlternatingTurnInvariant;
pub use single_winner::SingleWinnerInvariant;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{description}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or every violation otherwise.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// All round invariants as a composable set.
pub type RoundInvariants = (AlternatingTurnInvariant, SingleWinnerInvariant);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Cell, Grid, Player, Round};

    #[test]
    fn test_invariant_set_holds_for_fresh_round() {
        assert!(RoundInvariants::check_all(&Round::new()).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        // Three blue cells, red to move, and lines for both players.
        let a = Cell::Claimed(Player::A);
        let b = Cell::Claimed(Player::B);
        let e = Cell::Empty;
        let round = Round::from_parts(Grid::from([a, a, a, b, b, b, b, e, e]), Player::A);

        let violations = RoundInvariants::check_all(&round).unwrap_err();
        assert_eq!(violations.len(), 2);
    }
}
