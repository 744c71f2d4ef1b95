//! Move legality checks.
//!
//! Validation is separate from execution: [`validate`] either rejects a
//! move with a reason or hands back the [`Position`] that may be placed.

use super::{Board, GameStatus, Mark, Position, rules};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum IllegalMoveReason {
    /// The game already has a winner or is drawn.
    #[display("game already finished")]
    GameFinished,
    /// The index is not in 0-8.
    #[display("out of range")]
    OutOfRange,
    /// The cell already holds a mark.
    #[display("cell occupied")]
    Occupied,
    /// The requesting mark is not the one to move.
    #[display("out of turn")]
    OutOfTurn,
}

impl IllegalMoveReason {
    /// Machine-readable code sent to clients.
    pub fn code(self) -> &'static str {
        match self {
            IllegalMoveReason::GameFinished => "game_finished",
            IllegalMoveReason::OutOfRange => "out_of_range",
            IllegalMoveReason::Occupied => "occupied",
            IllegalMoveReason::OutOfTurn => "out_of_turn",
        }
    }
}

/// A rejected move. The board is never touched when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Illegal move at index {index} by {mark}: {reason}")]
pub struct IllegalMove {
    /// Why the move was rejected.
    pub reason: IllegalMoveReason,
    /// Index the caller asked for.
    pub index: i64,
    /// Mark that asked.
    pub mark: Mark,
}

impl IllegalMove {
    /// Creates a new rejection.
    pub fn new(reason: IllegalMoveReason, index: i64, mark: Mark) -> Self {
        Self {
            reason,
            index,
            mark,
        }
    }
}

/// Checks whether `mark` may play `index` on `board`.
///
/// Checks run in a fixed order: finished game, range, occupancy, turn.
/// The first failing check decides the reason.
#[instrument(skip(board), fields(turn = ?board.turn()))]
pub fn validate(board: &Board, index: i64, mark: Mark) -> Result<Position, IllegalMove> {
    let reject = |reason: IllegalMoveReason| -> Result<Position, IllegalMove> {
        warn!(index, ?mark, %reason, "Rejected move");
        Err(IllegalMove::new(reason, index, mark))
    };

    if rules::evaluate(board) != GameStatus::InProgress {
        return reject(IllegalMoveReason::GameFinished);
    }

    let Some(pos) = usize::try_from(index).ok().and_then(Position::from_index) else {
        return reject(IllegalMoveReason::OutOfRange);
    };

    if !board.is_empty(pos) {
        return reject(IllegalMoveReason::Occupied);
    }

    if board.turn() != mark {
        return reject(IllegalMoveReason::OutOfTurn);
    }

    Ok(pos)
}
