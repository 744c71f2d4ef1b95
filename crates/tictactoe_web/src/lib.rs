//! Browser tic-tac-toe against an optimal opponent.
//!
//! Game logic lives in [`tictactoe_engine`]; this crate shares one game
//! between HTTP requests and serves it.
//!
//! # Architecture
//!
//! - **Controller**: the shared game, one lock around every turn
//! - **Server**: axum JSON API and the game page
//! - **Config**: TOML file, environment and CLI overrides
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{GameStatus, Position};
//! use tictactoe_web::GameController;
//!
//! let controller = GameController::new();
//! let outcome = controller.apply_human_move(4).unwrap();
//! assert_eq!(outcome.opponent_move, Some(Position::TopLeft));
//! assert_eq!(*outcome.snapshot.status(), GameStatus::InProgress);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod controller;
mod server;

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig};

// Crate-level exports - Controller
pub use controller::{GameController, GameError, MoveOutcome};

// Crate-level exports - Server types
pub use server::{
    ApiError, BoardResponse, ErrorResponse, GameServer, MoveRequest, serve, status_message,
};
