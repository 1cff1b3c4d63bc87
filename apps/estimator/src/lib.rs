//! # Cab Fare Estimator Application
//!
//! Wires configuration, the database and the two front ends together.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. init_tracing()            RUST_LOG or info,cabfare=debug,sqlx=warn   │
//! │  2. AppConfig::load()         defaults → estimator.toml → CABFARE_*      │
//! │  3. Database::new()           connect + migrations                      │
//! │  4. FareCalculator::new()     [rates] section, validated                │
//! │  5. TripStore / ReportGenerator                                         │
//! │  6. console  ─or─  serve                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Commands
//! - `estimator` / `estimator console` - interactive booking loop
//! - `estimator serve` - HTTP API for the browser UI
//! - `--config <path>` - explicit config file

pub mod config;
pub mod console;
pub mod error;
pub mod web;

use cabfare_core::FareCalculator;
use cabfare_db::{Database, DbConfig, ReportGenerator, TripStore};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::console::ConsoleSession;
use crate::error::AppError;
use crate::web::ApiState;

pub const USAGE: &str = "\
Cab Fare Estimator

Usage: estimator [COMMAND] [OPTIONS]

Commands:
  console            Record trips interactively (default)
  serve              Run the HTTP API

Options:
  --config <PATH>    Config file (default: platform config dir/estimator.toml)
  -h, --help         Show this help message";

// =============================================================================
// Command Line
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Console,
    Serve,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub command: Command,
    pub config_path: Option<PathBuf>,
}

impl CliArgs {
    /// Parses arguments, excluding the program name.
    pub fn parse<I, S>(args: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut command = None;
        let mut config_path = None;
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "console" | "serve" if command.is_some() => {
                    return Err(AppError::Usage(format!("Unexpected argument '{}'", arg)));
                }
                "console" => command = Some(Command::Console),
                "serve" => command = Some(Command::Serve),
                "--help" | "-h" => command = Some(Command::Help),
                "--config" | "-c" => match args.next() {
                    Some(path) => config_path = Some(PathBuf::from(path)),
                    None => return Err(AppError::Usage("--config needs a path".to_string())),
                },
                other => {
                    return Err(AppError::Usage(format!("Unknown argument '{}'", other)));
                }
            }
        }

        Ok(CliArgs {
            command: command.unwrap_or(Command::Console),
            config_path,
        })
    }
}

// =============================================================================
// Startup
// =============================================================================

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so console prompts on stdout stay clean.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=cabfare=trace` - Show trace for cabfare crates only
/// - Default: `info,cabfare=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cabfare=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads config, opens the database and runs the chosen front end.
pub async fn run(args: CliArgs) -> Result<(), AppError> {
    if args.command == Command::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = AppConfig::load(args.config_path)?;
    let db_path = config.database_path()?;

    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    info!(path = ?db_path, "Opening trip database");
    let db = Database::new(DbConfig::new(db_path.clone())).await?;

    let calculator = FareCalculator::new(config.rates.clone())?;
    let store = TripStore::new(db.trips(), calculator);
    let reports = ReportGenerator::new(db.trips());

    let result = match args.command {
        Command::Serve => web::serve(&config.listen_addr(), ApiState { store, reports }).await,
        _ => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let mut session = ConsoleSession::new(stdin.lock(), stdout.lock(), store, reports);
            session.run().await.map(|recorded| {
                info!(recorded, "Console session ended");
            })
        }
    };

    db.close().await;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_console() {
        let args = CliArgs::parse(Vec::<String>::new()).unwrap();
        assert_eq!(args.command, Command::Console);
        assert_eq!(args.config_path, None);
    }

    #[test]
    fn test_serve_with_config() {
        let args = CliArgs::parse(["serve", "--config", "/etc/cabfare/estimator.toml"]).unwrap();
        assert_eq!(args.command, Command::Serve);
        assert_eq!(
            args.config_path,
            Some(PathBuf::from("/etc/cabfare/estimator.toml"))
        );
    }

    #[test]
    fn test_help() {
        assert_eq!(CliArgs::parse(["-h"]).unwrap().command, Command::Help);
    }

    #[test]
    fn test_bad_arguments() {
        assert!(matches!(CliArgs::parse(["--config"]), Err(AppError::Usage(_))));
        assert!(matches!(CliArgs::parse(["drive"]), Err(AppError::Usage(_))));
        assert!(matches!(
            CliArgs::parse(["serve", "console"]),
            Err(AppError::Usage(_))
        ));
    }
}
