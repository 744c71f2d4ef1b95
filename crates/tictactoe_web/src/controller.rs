//! Game controller: the one shared, mutable game of the process.

use derive_new::new;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};
use tictactoe_engine::{
    Board, BoardInvariants, BoardState, EngineError, GameSnapshot, IllegalMove, InvariantSet, Mark,
    MinimaxOpponent, Opponent, Position, validate,
};
use tracing::{error, info, instrument, warn};

/// Error returned by controller operations.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum GameError {
    /// The human's move was rejected; the game is unchanged.
    #[display("{_0}")]
    IllegalMove(IllegalMove),
    /// The opponent engine failed. Indicates a controller bug.
    #[display("Internal error: {_0}")]
    Engine(EngineError),
}

/// Result of an accepted human move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct MoveOutcome {
    /// Game after the human move and, if the game went on, the reply.
    pub snapshot: GameSnapshot,
    /// Where the human played.
    pub human_move: Position,
    /// Where the opponent replied; `None` if the human's move ended the game.
    pub opponent_move: Option<Position>,
}

/// Owns the game and serialises every access to it.
///
/// Share it between request handlers with an `Arc`. All operations take
/// the same lock, so no caller ever sees a half-applied turn.
pub struct GameController {
    state: Mutex<BoardState>,
    opponent: Box<dyn Opponent>,
}

impl GameController {
    /// Mark played by the human.
    pub const HUMAN_MARK: Mark = Mark::X;

    /// Creates a controller with an empty board and the minimax opponent.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating game controller");
        Self::from_parts(Board::new(), Box::new(MinimaxOpponent))
    }

    /// Creates a controller with an empty board and a custom opponent.
    pub fn with_opponent(opponent: Box<dyn Opponent>) -> Self {
        Self::from_parts(Board::new(), opponent)
    }

    /// Creates a controller resuming from `board`.
    pub fn from_parts(board: Board, opponent: Box<dyn Opponent>) -> Self {
        Self {
            state: Mutex::new(BoardState::from_board(board)),
            opponent,
        }
    }

    /// Mark played by the opponent.
    pub fn opponent_mark(&self) -> Mark {
        Self::HUMAN_MARK.opponent()
    }

    /// Current board and status.
    #[instrument(skip(self))]
    pub fn state(&self) -> GameSnapshot {
        GameSnapshot::of(self.lock().board())
    }

    /// Plays the human's move and, if the game is still open, the reply.
    ///
    /// Validation, both placements and both status checks happen under one
    /// lock. The new board is built on a copy and committed only once the
    /// whole turn succeeded, so an error never leaves a partial change.
    ///
    /// # Errors
    ///
    /// [`GameError::IllegalMove`] if the move is rejected,
    /// [`GameError::Engine`] if the opponent cannot produce a legal reply.
    #[instrument(skip(self), fields(opponent = self.opponent.name()))]
    pub fn apply_human_move(&self, index: i64) -> Result<MoveOutcome, GameError> {
        let mut state = self.lock();
        let human = Self::HUMAN_MARK;

        let pos = validate(&state.board(), index, human)?;
        let mut next = state.clone();
        next.place(pos, human)?;

        let status = next.status();
        if status.is_terminal() {
            info!(position = %pos, ?status, "Human move ended the game");
            return Ok(self.commit(&mut state, next, pos, None));
        }

        let reply = self.reply(&next)?;
        next.place(reply, self.opponent_mark())
            .map_err(|_| EngineError::NoLegalMove { status })?;

        info!(position = %pos, reply = %reply, status = ?next.status(), "Turn completed");
        Ok(self.commit(&mut state, next, pos, Some(reply)))
    }

    /// Starts a new game: empty board, X to move.
    #[instrument(skip(self))]
    pub fn reset(&self) -> GameSnapshot {
        let mut state = self.lock();
        state.reset();
        info!("Game reset");
        GameSnapshot::of(state.board())
    }

    fn reply(&self, next: &BoardState) -> Result<Position, EngineError> {
        let mark = self.opponent_mark();
        let reply = self.opponent.select_move(&next.board(), mark).inspect_err(|e| {
            error!(error = %e, "Opponent failed to move");
        })?;
        if validate(&next.board(), reply.to_index() as i64, mark).is_err() {
            error!(position = %reply, "Opponent chose an illegal move");
            return Err(EngineError::NoLegalMove {
                status: next.status(),
            });
        }
        Ok(reply)
    }

    fn commit(
        &self,
        state: &mut MutexGuard<'_, BoardState>,
        next: BoardState,
        human_move: Position,
        opponent_move: Option<Position>,
    ) -> MoveOutcome {
        check_invariants(&next);
        **state = next;
        MoveOutcome::new(GameSnapshot::of(state.board()), human_move, opponent_move)
    }

    fn lock(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("Game lock was poisoned; continuing with last committed board");
            poisoned.into_inner()
        })
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameController")
            .field("state", &self.state)
            .field("opponent", &self.opponent.name())
            .finish()
    }
}

fn check_invariants(state: &BoardState) {
    if let Err(violations) = BoardInvariants::check_all(&state.board()) {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        error!(board = ?state.board().symbols(), %descriptions, "Board invariant violated");
        debug_assert!(false, "Board invariant violated: {descriptions}");
    }
}
