//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. [`evaluate`] is the only place the
//! crate decides whether a game is over.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, line_owners, winner};

use super::{Board, GameStatus};

/// Derives the status of a board.
///
/// A completed line wins regardless of how many cells are filled; only
/// a full board without a line is a draw.
pub fn evaluate(board: &Board) -> GameStatus {
    if let Some(mark) = winner(board) {
        GameStatus::won_by(mark)
    } else if is_full(board) {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_in_progress() {
        assert_eq!(evaluate(&Board::new()), GameStatus::InProgress);
    }

    #[test]
    fn test_evaluate_win_on_full_board_beats_draw() {
        let board = Board::from_symbols(["O", "X", "X", "X", "O", "O", "X", "X", "O"]).unwrap();
        assert_eq!(evaluate(&board), GameStatus::OWins);
    }

    #[test]
    fn test_evaluate_draw() {
        let board = Board::from_symbols(["X", "O", "X", "X", "O", "O", "O", "X", "X"]).unwrap();
        assert_eq!(evaluate(&board), GameStatus::Draw);
    }

    #[test]
    fn test_evaluate_x_wins_early() {
        let board = Board::from_symbols(["X", "X", "X", "O", "O", "", "", "", ""]).unwrap();
        assert_eq!(evaluate(&board), GameStatus::XWins);
    }
}
