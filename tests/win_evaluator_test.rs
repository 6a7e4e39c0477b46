//! Tests for grid evaluation.

use strictly_arcade::{Cell, Grid, Outcome, Player, WIN_LINES, evaluate, is_full};

const A: Cell = Cell::Claimed(Player::A);
const B: Cell = Cell::Claimed(Player::B);
const E: Cell = Cell::Empty;

#[test]
fn test_top_row_is_line_zero() {
    let grid = Grid::from([A, A, A, E, E, E, E, E, E]);
    assert_eq!(evaluate(&grid), Outcome::Line(0));
}

#[test]
fn test_every_table_line_is_found() {
    for (index, line) in WIN_LINES.iter().enumerate() {
        let mut cells = [E; 9];
        for &i in line {
            cells[i] = B;
        }
        assert_eq!(evaluate(&Grid::from(cells)), Outcome::Line(index));
    }
}

#[test]
fn test_full_grid_without_line_is_draw() {
    let grid = Grid::from([A, B, A, A, B, B, B, A, A]);
    assert_eq!(evaluate(&grid), Outcome::Draw);
}

#[test]
fn test_line_takes_precedence_over_draw() {
    let grid = Grid::from([A, B, A, B, A, B, B, A, A]);
    assert!(is_full(&grid));
    assert_eq!(evaluate(&grid), Outcome::Line(6));
}

#[test]
fn test_fork_reports_first_line_in_table_order() {
    // Row 0 and column 0 both complete.
    let grid = Grid::from([A, A, A, A, B, B, A, B, B]);
    assert_eq!(evaluate(&grid), Outcome::Line(0));
}

#[test]
fn test_evaluation_is_pure() {
    let grid = Grid::from([A, B, E, E, A, B, E, E, E]);
    let first = evaluate(&grid);
    for _ in 0..5 {
        assert_eq!(evaluate(&grid), first);
    }
    assert_eq!(first, Outcome::NoResult);
    assert_eq!(grid, Grid::from([A, B, E, E, A, B, E, E, E]));
}
