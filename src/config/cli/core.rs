//! Core CLI types - Cli, Command, and the pipeline argument structs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::extended::{InspectArgs, PredictArgs, ReportArgs};
use crate::config::WorkbenchSpec;

/// Rescate: Titanic survival workbench
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "rescate")]
#[command(version)]
#[command(about = "CSV repair, preprocessing, classifier training and ROC/threshold reports for Titanic data")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run the full pipeline from a YAML configuration
    Run(RunArgs),

    /// Validate a configuration file without running
    Validate(ValidateArgs),

    /// Load and repair a CSV, then show a preview
    Inspect(InspectArgs),

    /// Score a CSV with a saved model and write prediction files
    Predict(PredictArgs),

    /// Score a labeled CSV with a saved model and print AUC and threshold metrics
    Report(ReportArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct RunArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Override number of epochs
    #[arg(short, long)]
    pub epochs: Option<usize>,

    /// Override batch size
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Override decision threshold
    #[arg(short, long)]
    pub threshold: Option<f32>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override output directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Dry run (validate config but don't train)
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Show detailed configuration summary
    #[arg(short, long)]
    pub detailed: bool,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Apply command-line overrides to a WorkbenchSpec
pub fn apply_overrides(spec: &mut WorkbenchSpec, args: &RunArgs) {
    if let Some(epochs) = args.epochs {
        spec.training.epochs = epochs;
    }
    if let Some(batch_size) = args.batch_size {
        spec.training.batch_size = batch_size;
    }
    if let Some(threshold) = args.threshold {
        spec.eval.threshold = threshold;
    }
    if let Some(seed) = args.seed {
        spec.split.seed = Some(seed);
    }
    if let Some(output_dir) = &args.output_dir {
        spec.output.dir = output_dir.clone();
    }
}
