//! Winner-moved-last invariant: nobody plays on after a line completes.

use super::super::{Board, Mark, rules};
use super::Invariant;

/// Invariant: the owner of a completed line made the last move.
///
/// An X win leaves X one mark ahead; an O win leaves the counts equal.
pub struct WinnerMovedLastInvariant;

impl Invariant<Board> for WinnerMovedLastInvariant {
    fn holds(board: &Board) -> bool {
        let x = board.count(Mark::X);
        let o = board.count(Mark::O);
        match rules::winner(board) {
            Some(Mark::X) => x == o + 1,
            Some(Mark::O) => x == o,
            None => true,
        }
    }

    fn description() -> &'static str {
        "The owner of a completed line made the last move"
    }
}
