//! CLI command implementations

mod inspect;
mod predict;
mod report;
mod run;
mod validate;


use crate::cli::LogLevel;
use crate::config::{Cli, Command};

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = LogLevel::from_flags(cli.verbose, cli.quiet);

    match cli.command {
        Command::Run(args) => run::run_pipeline(args, log_level),
        Command::Validate(args) => validate::run_validate(args, log_level),
        Command::Inspect(args) => inspect::run_inspect(args, log_level),
        Command::Predict(args) => predict::run_predict(args, log_level),
        Command::Report(args) => report::run_report(args, log_level),
    }
}
