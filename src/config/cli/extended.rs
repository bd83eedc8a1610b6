//! Arguments for the data and saved-model commands

use clap::Parser;
use std::path::PathBuf;

/// Arguments for inspect command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InspectArgs {
    /// Path to CSV file
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Rows shown in the preview table
    #[arg(short, long, default_value = "10")]
    pub rows: usize,
}

/// Arguments for predict command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct PredictArgs {
    /// Saved model bundle (.json, .yaml or .yml)
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// CSV of passengers to score
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Decision threshold; the bundle's threshold when absent
    #[arg(short, long)]
    pub threshold: Option<f32>,

    /// Directory for submission.csv and probabilities.csv
    #[arg(short, long, default_value = "./output")]
    pub output_dir: PathBuf,
}

/// Arguments for report command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ReportArgs {
    /// Saved model bundle (.json, .yaml or .yml)
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// Labeled CSV to score
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Decision threshold; the bundle's threshold when absent
    #[arg(short, long)]
    pub threshold: Option<f32>,

    /// Thresholds sampled for the ROC curve
    #[arg(long, default_value = "200")]
    pub roc_steps: usize,
}
