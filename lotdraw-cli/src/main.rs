//! ## lotdraw-cli
//! **Command line front end for the draw engine**
//!
//! Loads the layered configuration, opens the draw service on the configured
//! snapshot, runs one command and prints the result. Logs go to stderr.
//!
//! Exit codes: `0` success, `2` draw refused (blank name, no open slot),
//! `1` anything else.

use std::process::ExitCode;

use clap::Parser;
use lotdraw_config::LotdrawConfig;
use lotdraw_engine::ServiceError;
use lotdraw_telemetry::logging::EventLogger;

mod commands;

use commands::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => LotdrawConfig::load_from_path(path),
        None => LotdrawConfig::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    EventLogger::init(&config.telemetry.log_level);

    match commands::run_command(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<ServiceError>() {
            Some(refusal) if refusal.is_domain_refusal() => {
                eprintln!("{refusal}");
                ExitCode::from(2)
            }
            _ => {
                eprintln!("error: {e:#}");
                ExitCode::FAILURE
            }
        },
    }
}
