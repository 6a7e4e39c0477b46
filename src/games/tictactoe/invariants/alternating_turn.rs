//! Alternating turn invariant: red, blue, red, ...

use super::super::{Player, Round};
use super::Invariant;

/// Invariant: the claim counts agree with the player to move.
///
/// Red always opens a round, so equal counts mean red is to move and one
/// extra red cell means blue is to move.
pub struct AlternatingTurnInvariant;

impl Invariant<Round> for AlternatingTurnInvariant {
    fn holds(round: &Round) -> bool {
        let red = round.grid().count(Player::A);
        let blue = round.grid().count(Player::B);

        match (red.checked_sub(blue), round.to_move()) {
            (Some(0), Player::A) => true,
            (Some(1), Player::B) => true,
            _ => false,
        }
    }

    fn description() -> &'static str {
        "Players alternate turns (red, blue, red, ...)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Cell, Grid};

    #[test]
    fn test_claims_keep_alternation() {
        let mut round = Round::new();
        round.claim(4);
        round.claim(0);
        round.claim(8);
        assert!(AlternatingTurnInvariant::holds(&round));
        assert_eq!(round.to_move(), Player::B);
    }

    #[test]
    fn test_blue_ahead_violates() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::Claimed(Player::B);
        let round = Round::from_parts(Grid::from(cells), Player::A);
        assert!(!AlternatingTurnInvariant::holds(&round));
    }
}
