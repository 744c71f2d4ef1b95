//! Balanced marks invariant: X and O alternate, X first.

use super::super::{Board, Mark};
use super::Invariant;

/// Invariant: X has as many marks as O, or exactly one more.
pub struct BalancedMarksInvariant;

impl Invariant<Board> for BalancedMarksInvariant {
    fn holds(board: &Board) -> bool {
        let x = board.count(Mark::X);
        let o = board.count(Mark::O);
        x == o || x == o + 1
    }

    fn description() -> &'static str {
        "Marks alternate: count(X) - count(O) is 0 or 1"
    }
}
