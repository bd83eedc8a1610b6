//! Predict command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::PredictArgs;
use crate::data::{read_csv, repair_all};
use crate::io::{load_bundle, write_predictions};

pub fn run_predict(args: PredictArgs, level: LogLevel) -> Result<(), String> {
    log(level, LogLevel::Normal, &format!("Loading model: {}", args.model.display()));
    let bundle = load_bundle(&args.model).map_err(|e| format!("Model error: {e}"))?;

    let rows = repair_all(&read_csv(&args.input).map_err(|e| format!("Load error: {e}"))?.rows);
    if rows.is_empty() {
        log(level, LogLevel::Normal, "No rows to score; nothing written");
        return Ok(());
    }

    let threshold = args.threshold.unwrap_or(bundle.metadata.threshold);
    if !(0.0..=1.0).contains(&threshold) {
        return Err(format!("Invalid threshold: {threshold} (must be in [0.0, 1.0])"));
    }
    let (probs, _) = bundle.score(&rows).map_err(|e| format!("Scoring error: {e}"))?;

    let files = write_predictions(&args.output_dir, &rows, &probs, threshold)
        .map_err(|e| format!("Write error: {e}"))?;
    if let Some(files) = files {
        let positive = probs.iter().filter(|&&p| p >= threshold).count();
        log(
            level,
            LogLevel::Normal,
            &format!("Scored {} rows at threshold {threshold:.2} ({positive} predicted survivors)", files.rows),
        );
        log(level, LogLevel::Normal, &format!("  {}", files.submission.display()));
        log(level, LogLevel::Normal, &format!("  {}", files.probabilities.display()));
    }
    Ok(())
}
