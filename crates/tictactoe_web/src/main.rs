//! tictactoe_web - Unified CLI
//!
//! Serves the tic-tac-toe game over HTTP, or plays the engine against itself.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use tictactoe_engine::{Board, MinimaxOpponent, play_out};
use tictactoe_web::{GameServer, ServerConfig};
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt, reload};

/// Handle for swapping the log filter once the configuration is loaded.
type FilterHandle = reload::Handle<EnvFilter, Registry>;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Http { port, host, config } => run_http_server(config, host, port).await,
        Command::Selfplay => run_selfplay(),
    }
}

/// Installs the subscriber before anything else logs.
///
/// `RUST_LOG` wins when set. Otherwise the filter starts at
/// `default_filter` and the returned handle can replace it later.
fn init_tracing(default_filter: &str) -> Option<FilterHandle> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
            None
        }
        Err(_) => {
            let (filter, handle) = reload::Layer::new(EnvFilter::new(default_filter));
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer())
                .init();
            Some(handle)
        }
    }
}

/// Run the HTTP game server
async fn run_http_server(
    config_path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let filter = init_tracing("info");

    let config = ServerConfig::load(config_path.as_deref())?
        .apply_env()?
        .with_overrides(host, port);

    if let Some(handle) = filter {
        handle.reload(EnvFilter::new(config.log_filter()))?;
    }
    info!(address = %config.bind_address(), "Starting tic-tac-toe server");

    tictactoe_web::serve(GameServer::new(), &config).await
}

/// Play one engine-versus-engine game and print every board
fn run_selfplay() -> Result<()> {
    init_tracing("warn");

    let (plies, status) = play_out(&MinimaxOpponent, Board::new())?;
    for (turn, ply) in plies.iter().enumerate() {
        println!("Move {}: {}\n{}\n", turn + 1, ply.position, ply.board.display());
    }
    println!("Result: {:?}", status);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_config_warnings_logged_before_filter_reload() {
        let captured = Captured::default();
        let writer = captured.clone();
        let (filter, handle) = reload::Layer::new(EnvFilter::new("info"));
        let subscriber = tracing_subscriber::registry().with(filter).with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(move || writer.clone()),
        );

        tracing::subscriber::with_default(subscriber, || {
            let result = ServerConfig::default()
                .apply_vars(|key| (key == "TIC_TAC_TOE_PORT").then(|| "nope".to_string()));
            assert!(result.is_err());
            handle.reload(EnvFilter::new("error")).unwrap();
            tracing::warn!("after reload");
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Invalid port in environment"));
        assert!(!output.contains("after reload"));
    }
}
