//! Live board state and the snapshots handed out to callers.

use super::validate::{IllegalMove, IllegalMoveReason};
use super::{Board, Cell, GameStatus, Mark, Position, rules};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// The mutable board of a running game.
///
/// Not synchronised on its own; the controller owns it behind a mutex.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    board: Board,
}

impl BoardState {
    /// Creates an empty board with X to move.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing board.
    pub fn from_board(board: Board) -> Self {
        Self { board }
    }

    /// The nine cells in row-major order.
    pub fn cells(&self) -> &[Cell; 9] {
        self.board.cells()
    }

    /// Copy of the current board.
    pub fn board(&self) -> Board {
        self.board
    }

    /// The mark to move next.
    pub fn turn(&self) -> Mark {
        self.board.turn()
    }

    /// Status, recomputed from the cells on every call.
    pub fn status(&self) -> GameStatus {
        rules::evaluate(&self.board)
    }

    /// Places `mark` at `pos`. No other cell changes.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMoveReason::Occupied`] if the cell is taken.
    #[instrument(skip(self))]
    pub fn place(&mut self, pos: Position, mark: Mark) -> Result<(), IllegalMove> {
        if !self.board.is_empty(pos) {
            return Err(IllegalMove::new(
                IllegalMoveReason::Occupied,
                pos.to_index() as i64,
                mark,
            ));
        }
        self.board.set(pos, Cell::Occupied(mark));
        debug!(position = %pos, ?mark, "Placed mark");
        Ok(())
    }

    /// Clears every cell; X moves next.
    pub fn reset(&mut self) {
        self.board = Board::new();
    }
}

/// Read-only view of a game at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Board contents.
    board: Board,
    /// Status derived from the board.
    status: GameStatus,
    /// Mark to move next.
    turn: Mark,
}

impl GameSnapshot {
    /// Captures a board, deriving status and turn from it.
    pub fn of(board: Board) -> Self {
        Self {
            board,
            status: rules::evaluate(&board),
            turn: board.turn(),
        }
    }

    /// True once the game is won or drawn.
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_sets_only_that_cell() {
        let mut state = BoardState::new();
        state.place(Position::Center, Mark::X).unwrap();
        let expected = Board::from_symbols(["", "", "", "", "X", "", "", "", ""]).unwrap();
        assert_eq!(state.board(), expected);
        assert_eq!(state.turn(), Mark::O);
    }

    #[test]
    fn test_place_rejects_occupied() {
        let mut state = BoardState::new();
        state.place(Position::Center, Mark::X).unwrap();
        let err = state.place(Position::Center, Mark::O).unwrap_err();
        assert_eq!(err.reason, IllegalMoveReason::Occupied);
        assert_eq!(state.cells()[4], Cell::Occupied(Mark::X));
    }

    #[test]
    fn test_reset() {
        let mut state = BoardState::new();
        state.place(Position::TopLeft, Mark::X).unwrap();
        state.reset();
        assert!(state.cells().iter().all(|c| *c == Cell::Empty));
        assert_eq!(state.turn(), Mark::X);
        assert_eq!(state.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_status_is_never_stale() {
        let board = Board::from_symbols(["X", "X", "", "O", "O", "", "", "", ""]).unwrap();
        let mut state = BoardState::from_board(board);
        assert_eq!(state.status(), GameStatus::InProgress);
        state.place(Position::TopRight, Mark::X).unwrap();
        assert_eq!(state.status(), GameStatus::XWins);
    }

    #[test]
    fn test_snapshot_derives_fields() {
        let snapshot = GameSnapshot::of(Board::new());
        assert_eq!(*snapshot.status(), GameStatus::InProgress);
        assert_eq!(*snapshot.turn(), Mark::X);
        assert!(!snapshot.is_over());
    }
}
