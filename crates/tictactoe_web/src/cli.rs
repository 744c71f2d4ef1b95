//! Command-line interface for tictactoe_web.

use clap::{Parser, Subcommand};

/// Tic-tac-toe against an optimal minimax opponent
#[derive(Parser, Debug)]
#[command(name = "tictactoe_web")]
#[command(about = "Browser tic-tac-toe server with an unbeatable opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Http {
        /// Port to bind to (overrides config file and environment)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides config file and environment)
        #[arg(long)]
        host: Option<String>,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,
    },

    /// Let the engine play both sides and print the game
    Selfplay,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_http_flags() {
        let cli = Cli::parse_from(["tictactoe_web", "http", "--port", "8080", "--host", "0.0.0.0"]);
        match cli.command {
            Command::Http { port, host, config } => {
                assert_eq!(port, Some(8080));
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert!(config.is_none());
            }
            Command::Selfplay => panic!("expected http"),
        }
    }

    #[test]
    fn test_parse_selfplay() {
        let cli = Cli::parse_from(["tictactoe_web", "selfplay"]);
        assert!(matches!(cli.command, Command::Selfplay));
    }
}
