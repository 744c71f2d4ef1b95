//! HTTP server: JSON game API plus the browser page.

use crate::config::ServerConfig;
use crate::controller::{GameController, GameError, MoveOutcome};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::sync::Arc;
use tictactoe_engine::{GameSnapshot, GameStatus, IllegalMoveReason, Mark};
use tower::ServiceBuilder;
use tracing::{debug, error, info, instrument, warn};

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Request body for a human move.
///
/// The index is kept as a raw JSON number so that values outside `i64`
/// still reach move validation and are reported as out of range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Cell index (0-8, where 0=top-left, 8=bottom-right).
    #[serde(alias = "position")]
    pub index: Number,
}

impl MoveRequest {
    /// Integer form of the index, saturating at the `i64` bounds.
    ///
    /// Whole floats (`4.0`, `1e20`) count as integers. Returns `None` for
    /// a fractional index.
    pub fn cell_index(&self) -> Option<i64> {
        if let Some(index) = self.index.as_i64() {
            return Some(index);
        }
        if self.index.is_u64() {
            return Some(i64::MAX);
        }
        let value = self.index.as_f64()?;
        (value.fract() == 0.0).then_some(value as i64)
    }
}

/// Board and status as returned by every successful API call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardResponse {
    /// Always `true`.
    pub success: bool,
    /// Nine cell symbols: `""`, `"X"` or `"O"`.
    pub board: Vec<String>,
    /// Derived game status.
    pub status: GameStatus,
    /// Mark to move next.
    pub turn: Mark,
    /// Human-readable status line.
    pub message: String,
    /// True once the game is won or drawn.
    pub game_over: bool,
    /// Index the opponent replied on, if it moved during this request.
    pub opponent_move: Option<usize>,
}

impl BoardResponse {
    /// Builds a response from a snapshot.
    pub fn from_snapshot(snapshot: &GameSnapshot, message: impl Into<String>) -> Self {
        Self {
            success: true,
            board: snapshot.board().symbols().map(String::from).to_vec(),
            status: *snapshot.status(),
            turn: *snapshot.turn(),
            message: message.into(),
            game_over: snapshot.is_over(),
            opponent_move: None,
        }
    }

    fn from_outcome(outcome: &MoveOutcome) -> Self {
        Self {
            opponent_move: outcome.opponent_move.map(|pos| pos.to_index()),
            ..Self::from_snapshot(&outcome.snapshot, status_message(*outcome.snapshot.status()))
        }
    }
}

/// Body of a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Machine-readable reason (`out_of_range`, `occupied`, ...).
    pub error: String,
    /// Human-readable explanation.
    pub message: String,
}

/// Status line shown under the board.
pub fn status_message(status: GameStatus) -> &'static str {
    match status {
        GameStatus::InProgress => "Your turn",
        GameStatus::XWins => "Player X wins!",
        GameStatus::OWins => "AI (O) wins!",
        GameStatus::Draw => "It's a draw!",
    }
}

/// Failure of an API call, rendered as an [`ErrorResponse`].
#[derive(Debug, derive_more::Display)]
pub enum ApiError {
    /// The game rejected the request.
    #[display("{_0}")]
    Game(GameError),
    /// The request body could not be read as a move.
    #[display("{message}")]
    BadRequest {
        /// HTTP status to answer with.
        status: StatusCode,
        /// Machine-readable reason.
        code: &'static str,
        /// Human-readable explanation.
        message: String,
    },
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        ApiError::Game(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest {
            status: rejection.status(),
            code: "bad_request",
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Game(GameError::IllegalMove(illegal)) => {
                let status = match illegal.reason {
                    IllegalMoveReason::OutOfRange => StatusCode::BAD_REQUEST,
                    IllegalMoveReason::Occupied
                    | IllegalMoveReason::GameFinished
                    | IllegalMoveReason::OutOfTurn => StatusCode::CONFLICT,
                };
                (status, illegal.reason.code())
            }
            ApiError::Game(GameError::Engine(e)) => {
                error!(error = %e, "Internal game error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
            ApiError::BadRequest { status, code, message } => {
                warn!(%status, code, %message, "Malformed request");
                (*status, *code)
            }
        };
        let body = ErrorResponse {
            success: false,
            error: code.to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// HTTP front of a [`GameController`].
#[derive(Debug, Clone)]
pub struct GameServer {
    controller: Arc<GameController>,
}

impl GameServer {
    /// Creates a server around a fresh game.
    pub fn new() -> Self {
        Self::with_controller(Arc::new(GameController::new()))
    }

    /// Creates a server sharing an existing controller.
    pub fn with_controller(controller: Arc<GameController>) -> Self {
        Self { controller }
    }

    /// The shared controller.
    pub fn controller(&self) -> &Arc<GameController> {
        &self.controller
    }

    /// Builds the axum router with request logging.
    pub fn router(self) -> Router {
        Router::new()
            .route("/", get(index))
            .route("/api/board", get(get_board))
            .route("/api/move", post(make_move))
            .route("/api/make_move", post(make_move))
            .route("/api/reset", post(reset))
            .layer(ServiceBuilder::new().map_request(|req: Request| {
                info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
                req
            }))
            .with_state(self)
    }
}

impl Default for GameServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Binds `config`'s address and serves until the process stops.
#[instrument(skip(server), fields(address = %config.bind_address()))]
pub async fn serve(server: GameServer, config: &ServerConfig) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!("Server ready at http://{}/", listener.local_addr()?);
    axum::serve(listener, server.router()).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[instrument(skip_all)]
async fn get_board(State(server): State<GameServer>) -> Json<BoardResponse> {
    let snapshot = server.controller.state();
    debug!(status = ?snapshot.status(), "Board requested");
    Json(BoardResponse::from_snapshot(&snapshot, status_message(*snapshot.status())))
}

#[instrument(skip_all)]
async fn make_move(
    State(server): State<GameServer>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<BoardResponse>, ApiError> {
    let Json(req) = payload?;
    let index = req.cell_index().ok_or_else(|| ApiError::BadRequest {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request",
        message: format!("Index {} is not a whole number", req.index),
    })?;
    debug!(index, "Move requested");
    let outcome = server.controller.apply_human_move(index)?;
    Ok(Json(BoardResponse::from_outcome(&outcome)))
}

#[instrument(skip_all)]
async fn reset(State(server): State<GameServer>) -> Json<BoardResponse> {
    let snapshot = server.controller.reset();
    Json(BoardResponse::from_snapshot(&snapshot, "Game reset"))
}
