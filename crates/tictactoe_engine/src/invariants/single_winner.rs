//! Single winner invariant: X and O never both hold a line.

use super::super::{Board, rules};
use super::Invariant;

/// Invariant: at most one mark owns a completed line.
pub struct SingleWinnerInvariant;

impl Invariant<Board> for SingleWinnerInvariant {
    fn holds(board: &Board) -> bool {
        rules::line_owners(board).len() <= 1
    }

    fn description() -> &'static str {
        "At most one mark owns a completed line"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_winner_holds() {
        let board = Board::from_symbols(["X", "X", "X", "O", "O", "", "", "", ""]).unwrap();
        assert!(SingleWinnerInvariant::holds(&board));
    }

    #[test]
    fn test_two_winners_violates() {
        let board = Board::from_symbols(["X", "X", "X", "O", "O", "O", "", "", ""]).unwrap();
        assert!(!SingleWinnerInvariant::holds(&board));
    }
}
