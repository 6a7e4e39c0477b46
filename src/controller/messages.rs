//! Everything the two-line display can say.

use crate::games::tictactoe::Player;

/// Boot screen.
pub const TITLE: (&str, &str) = ("Tic Tac Toe", "RED first");

/// Shown once a reset press is accepted.
pub const NEXT_ROUND: (&str, &str) = ("NEXT ROUND:", "Red first");

/// Standing prompt while idle.
pub const RESET_PROMPT: (&str, &str) = ("Press to reset", "");

/// Full grid without a line.
pub const TIE: (&str, &str) = ("It's a tie!", "");

/// A line whose owner could not be determined.
pub const UNKNOWN_RESULT: (&str, &str) = ("ERROR: Unknown", "winner color");

/// Whose turn it is.
pub fn turn(player: Player) -> String {
    format!("{player}'s turn")
}

/// Running match score.
pub fn score(red: u32, blue: u32) -> String {
    format!("Red {red} vs Blue {blue}")
}

/// Round winner.
pub fn winner(player: Player) -> String {
    format!("{player} wins!")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::LINE_WIDTH;

    #[test]
    fn test_messages_fit_the_display() {
        let texts = [
            TITLE.0.to_string(),
            TITLE.1.to_string(),
            NEXT_ROUND.0.to_string(),
            RESET_PROMPT.0.to_string(),
            TIE.0.to_string(),
            UNKNOWN_RESULT.0.to_string(),
            UNKNOWN_RESULT.1.to_string(),
            turn(Player::B),
            score(9, 9),
            winner(Player::B),
        ];
        for text in texts {
            assert!(text.chars().count() <= LINE_WIDTH, "{text:?} too long");
        }
    }

    #[test]
    fn test_turn_names() {
        assert_eq!(turn(Player::A), "RED's turn");
        assert_eq!(winner(Player::B), "BLUE wins!");
        assert_eq!(score(1, 0), "Red 1 vs Blue 0");
    }
}
