//! Single winner invariant: every completed line belongs to one player.

use super::super::rules::{WIN_LINES, line_owner};
use super::super::Round;
use super::Invariant;

/// Invariant: all monochromatic triples share the same owner.
///
/// A single claim can complete two lines at once (a fork), but both must
/// then be the claimer's.
pub struct SingleWinnerInvariant;

impl Invariant<Round> for SingleWinnerInvariant {
    fn holds(round: &Round) -> bool {
        let mut owners = (0..WIN_LINES.len()).filter_map(|line| line_owner(round.grid(), line));
        match owners.next() {
            Some(first) => owners.all(|owner| owner == first),
            None => true,
        }
    }

    fn description() -> &'static str {
        "At most one player holds a completed line"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fork_holds() {
        let mut round = Round::new();
        // Red's last claim at 0 completes row 0 and column 0 together.
        for index in [1, 4, 2, 5, 3, 7, 6, 8, 0] {
            assert!(round.claim(index).is_claimed());
        }
        let closed = (0..WIN_LINES.len())
            .filter(|&line| line_owner(round.grid(), line).is_some())
            .count();
        assert_eq!(closed, 2);
        assert!(SingleWinnerInvariant::holds(&round));
    }
}
