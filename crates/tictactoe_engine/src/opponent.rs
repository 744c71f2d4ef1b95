//! Automated opponent: exhaustive minimax with alpha-beta pruning.
//!
//! The search walks the whole remaining game tree. Boards are `Copy`, so
//! every branch works on its own copy and the search has no shared state.

use super::{Board, Cell, GameStatus, Mark, Position, rules};
use tracing::{debug, error, instrument};

/// Score of a win found one ply below the root. Deeper wins score lower.
pub const WIN_SCORE: i32 = 10;

/// Failure of the opponent engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EngineError {
    /// The engine was asked to move on a finished board.
    #[display("No legal move available (board status {status:?})")]
    NoLegalMove {
        /// Status of the board the engine was given.
        status: GameStatus,
    },
}

/// Something that picks moves for the automated side.
pub trait Opponent: Send + Sync {
    /// Chooses a move for `mark` on `board`.
    fn select_move(&self, board: &Board, mark: Mark) -> Result<Position, EngineError>;

    /// Returns the opponent's display name.
    fn name(&self) -> &str;
}

/// Optimal opponent backed by [`select_move`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimaxOpponent;

impl Opponent for MinimaxOpponent {
    fn select_move(&self, board: &Board, mark: Mark) -> Result<Position, EngineError> {
        select_move(board, mark)
    }

    fn name(&self) -> &str {
        "minimax"
    }
}

/// Picks the best move for `mark`, assuming the other side plays perfectly.
///
/// Candidates are tried in [`Position::SEARCH_ORDER`] and ranked by
/// `(score, blocks)`, where `blocks` is true for a cell the other mark
/// would win on next turn. A later candidate only replaces the current best
/// with a strictly higher rank, so the result is deterministic. The second
/// key matters when every move loses equally fast: the engine still blocks
/// one of the threats.
///
/// # Errors
///
/// Returns [`EngineError::NoLegalMove`] if the board is already won or drawn.
#[instrument(skip(board), fields(cells = ?board.symbols()))]
pub fn select_move(board: &Board, mark: Mark) -> Result<Position, EngineError> {
    let status = ensure_open(board)?;
    let threats = winning_cells(board, mark.opponent());

    let mut best: Option<(Position, (i32, bool))> = None;
    for pos in candidates(board) {
        // One below the best score so that equal scores come back exact.
        let alpha = best.map_or(i32::MIN, |(_, (score, _))| score.saturating_sub(1));
        let score = search(play(board, pos, mark), mark, mark.opponent(), 1, alpha, i32::MAX);
        let rank = (score, threats.contains(&pos));
        if best.is_none_or(|(_, best_rank)| rank > best_rank) {
            best = Some((pos, rank));
        }
    }

    match best {
        Some((pos, (score, blocks))) => {
            debug!(position = %pos, score, blocks, "Selected move");
            Ok(pos)
        }
        None => Err(EngineError::NoLegalMove { status }),
    }
}

/// Empty cells on which `mark` would complete a line.
pub fn winning_cells(board: &Board, mark: Mark) -> Vec<Position> {
    candidates(board)
        .filter(|&pos| rules::winner(&play(board, pos, mark)) == Some(mark))
        .collect()
}

/// Exact minimax score of every legal move for `mark`, in search order.
///
/// # Errors
///
/// Returns [`EngineError::NoLegalMove`] if the board is already won or drawn.
#[instrument(skip(board))]
pub fn score_moves(board: &Board, mark: Mark) -> Result<Vec<(Position, i32)>, EngineError> {
    ensure_open(board)?;
    Ok(candidates(board)
        .map(|pos| {
            let score = search(play(board, pos, mark), mark, mark.opponent(), 1, i32::MIN, i32::MAX);
            (pos, score)
        })
        .collect())
}

fn ensure_open(board: &Board) -> Result<GameStatus, EngineError> {
    let status = rules::evaluate(board);
    if status.is_terminal() {
        error!(?status, board = ?board.symbols(), "Opponent asked to move on a finished board");
        return Err(EngineError::NoLegalMove { status });
    }
    Ok(status)
}

fn candidates(board: &Board) -> impl Iterator<Item = Position> + '_ {
    Position::SEARCH_ORDER
        .into_iter()
        .filter(|&pos| board.is_empty(pos))
}

fn play(board: &Board, pos: Position, mark: Mark) -> Board {
    let mut next = *board;
    next.set(pos, Cell::Occupied(mark));
    next
}

/// Scores `board` for `engine` with `to_move` about to play.
fn search(board: Board, engine: Mark, to_move: Mark, depth: i32, mut alpha: i32, mut beta: i32) -> i32 {
    match rules::evaluate(&board) {
        GameStatus::InProgress => {}
        GameStatus::Draw => return 0,
        status if status.winner() == Some(engine) => return WIN_SCORE - depth,
        _ => return depth - WIN_SCORE,
    }

    let maximizing = to_move == engine;
    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for pos in candidates(&board) {
        let score = search(play(&board, pos, to_move), engine, to_move.opponent(), depth + 1, alpha, beta);
        if maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }
        if alpha >= beta {
            break;
        }
    }
    best
}
