//! Rescate CLI
//!
//! # Usage
//!
//! ```bash
//! # Full pipeline from config
//! rescate run config.yaml
//!
//! # Pipeline with overrides
//! rescate run config.yaml --epochs 20 --threshold 0.4 --seed 7
//!
//! # Validate config
//! rescate validate config.yaml --detailed
//!
//! # Preview a CSV after repair
//! rescate inspect train.csv --rows 5
//!
//! # Score new passengers with a saved model
//! rescate predict output/model.json test.csv
//!
//! # Re-threshold a saved model against labeled data
//! rescate report output/model.json labeled.csv --threshold 0.35
//! ```

use clap::Parser;
use rescate::cli::{init_tracing, run_command, Cli, LogLevel};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(LogLevel::from_flags(cli.verbose, cli.quiet));

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
