//! Report command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::ReportArgs;
use crate::data::{read_csv, repair_all};
use crate::eval::ThresholdReport;
use crate::io::load_bundle;

pub fn run_report(args: ReportArgs, level: LogLevel) -> Result<(), String> {
    let bundle = load_bundle(&args.model).map_err(|e| format!("Model error: {e}"))?;
    let rows = repair_all(&read_csv(&args.input).map_err(|e| format!("Load error: {e}"))?.rows);

    let (probs, labels) = bundle.score(&rows).map_err(|e| format!("Scoring error: {e}"))?;
    let labels = labels.ok_or_else(|| format!("{} has no Survived column", args.input.display()))?;

    let threshold = args.threshold.unwrap_or(bundle.metadata.threshold);
    if !(0.0..=1.0).contains(&threshold) {
        return Err(format!("Invalid threshold: {threshold} (must be in [0.0, 1.0])"));
    }
    let (report, curve) = ThresholdReport::with_roc(&labels, &probs, threshold, args.roc_steps);

    log(level, LogLevel::Normal, &format!("Model: {} ({} rows scored)", bundle.metadata.name, probs.len()));
    log(level, LogLevel::Normal, &report.to_string());
    log(level, LogLevel::Verbose, &format!("ROC points: {}", curve.points.len()));
    Ok(())
}
