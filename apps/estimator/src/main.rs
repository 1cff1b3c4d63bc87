//! # Cab Fare Estimator Entry Point
//!
//! Parses the command line and hands off to [`cabfare_estimator::run`].
//! Setup lives in `lib.rs` so it can be tested.

use cabfare_estimator::{init_tracing, run, CliArgs, USAGE};
use std::process::ExitCode;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let args = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    init_tracing();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
