//! Win detection logic for tic-tac-toe.

use super::super::{Board, Cell, Mark, Position};

/// The eight lines that win the game: rows, columns, diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
    ],
    [
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ],
    // Columns
    [
        Position::TopLeft,
        Position::MiddleLeft,
        Position::BottomLeft,
    ],
    [
        Position::TopCenter,
        Position::Center,
        Position::BottomCenter,
    ],
    [
        Position::TopRight,
        Position::MiddleRight,
        Position::BottomRight,
    ],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Checks if there is a winner on the board.
///
/// Returns `Some(mark)` for the owner of the first completed line,
/// `None` otherwise.
pub fn winner(board: &Board) -> Option<Mark> {
    LINES.iter().find_map(|line| line_owner(board, line))
}

/// Returns every mark that owns at least one completed line.
///
/// Legal play never yields both marks; the invariant checks use this to
/// detect corrupted boards.
pub fn line_owners(board: &Board) -> Vec<Mark> {
    let mut owners: Vec<Mark> = Vec::new();
    for line in &LINES {
        if let Some(mark) = line_owner(board, line)
            && !owners.contains(&mark)
        {
            owners.push(mark);
        }
    }
    owners
}

fn line_owner(board: &Board, [a, b, c]: &[Position; 3]) -> Option<Mark> {
    match board.get(*a) {
        Cell::Occupied(mark) if board.get(*b) == board.get(*a) && board.get(*c) == board.get(*a) => {
            Some(mark)
        }
        _ => None,
    }
}
