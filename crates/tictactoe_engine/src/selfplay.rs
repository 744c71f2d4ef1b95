//! Engine-versus-engine games.

use crate::{Board, BoardState, EngineError, GameStatus, Opponent, Position};
use tracing::{info, instrument};

/// One move of a self-play game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ply {
    /// Where the mark went.
    pub position: Position,
    /// Board after the move.
    pub board: Board,
}

/// Lets `opponent` play both sides from `start` until the game ends.
///
/// # Errors
///
/// Returns the engine's error if it fails to produce a legal move.
#[instrument(skip_all, fields(opponent = opponent.name()))]
pub fn play_out(opponent: &dyn Opponent, start: Board) -> Result<(Vec<Ply>, GameStatus), EngineError> {
    let mut state = BoardState::from_board(start);
    let mut plies = Vec::new();

    while !state.status().is_terminal() {
        let mark = state.turn();
        let position = opponent.select_move(&state.board(), mark)?;
        state.place(position, mark).map_err(|_| EngineError::NoLegalMove {
            status: state.status(),
        })?;
        plies.push(Ply {
            position,
            board: state.board(),
        });
    }

    let status = state.status();
    info!(moves = plies.len(), ?status, "Self-play finished");
    Ok((plies, status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MinimaxOpponent;

    #[test]
    fn test_perfect_play_is_a_draw() {
        let (plies, status) = play_out(&MinimaxOpponent, Board::new()).unwrap();
        assert_eq!(status, GameStatus::Draw);
        assert_eq!(plies.len(), 9);
        assert_eq!(plies[0].position, Position::Center);
    }

    #[test]
    fn test_finished_start_plays_nothing() {
        let won = Board::from_symbols(["X", "X", "X", "O", "O", "", "", "", ""]).unwrap();
        let (plies, status) = play_out(&MinimaxOpponent, won).unwrap();
        assert!(plies.is_empty());
        assert_eq!(status, GameStatus::XWins);
    }
}
