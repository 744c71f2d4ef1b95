//! Pure tic-tac-toe game logic: board, rules, move validation and an
//! optimal minimax opponent.
//!
//! Everything here is synchronous and free of shared state. Boards are
//! `Copy` values; [`BoardState`] is the one mutable wrapper and callers
//! provide their own locking.
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{Board, Mark, Position, select_move};
//!
//! let board = Board::from_symbols(["O", "O", "", "X", "X", "", "", "", ""]).unwrap();
//! assert_eq!(select_move(&board, Mark::X), Ok(Position::MiddleRight));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod invariants;
pub mod opponent;
mod position;
pub mod rules;
mod selfplay;
mod state;
mod types;
pub mod validate;

pub use invariants::{BoardInvariants, Invariant, InvariantSet, InvariantViolation};
pub use opponent::{
    EngineError, MinimaxOpponent, Opponent, WIN_SCORE, score_moves, select_move, winning_cells,
};
pub use position::Position;
pub use rules::{evaluate, is_draw, is_full, line_owners, winner};
pub use selfplay::{Ply, play_out};
pub use state::{BoardState, GameSnapshot};
pub use types::{Board, Cell, GameStatus, Mark};
pub use validate::{IllegalMove, IllegalMoveReason, validate};
