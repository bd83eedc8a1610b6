//! Validate command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_config, ValidateArgs, WorkbenchSpec};

/// Format data configuration as a string
pub fn format_data_info(spec: &WorkbenchSpec) -> String {
    let mut lines = vec![format!("  Training data: {}", spec.data.train.display())];
    if let Some(test) = &spec.data.test {
        lines.push(format!("  Test data: {}", test.display()));
    }
    let seed = spec.split.seed.map_or_else(|| "random".to_string(), |s| s.to_string());
    lines.push(format!("  Validation ratio: {} (seed: {seed})", spec.split.val_ratio));
    lines.join("\n")
}

/// Format training configuration as a string
pub fn format_training_info(spec: &WorkbenchSpec) -> String {
    let t = &spec.training;
    [
        format!("  Hidden units: {}", t.hidden_units),
        format!("  Epochs: {} (batch size {})", t.epochs, t.batch_size),
        format!("  Learning rate: {}", t.lr),
        format!("  Early stopping: {} with patience {}", t.monitor, t.patience),
        format!("  FamilySize: {} | IsAlone: {}", spec.features.family_size, spec.features.is_alone),
    ]
    .join("\n")
}

/// Format evaluation and output configuration as a string
pub fn format_output_info(spec: &WorkbenchSpec) -> String {
    format!(
        "  Threshold: {:.2} | ROC steps: {}\n  Output dir: {} ({})",
        spec.eval.threshold,
        spec.eval.roc_steps,
        spec.output.dir.display(),
        spec.output.model_format
    )
}

/// Print detailed configuration summary
pub fn print_detailed_summary(spec: &WorkbenchSpec) {
    println!();
    println!("Configuration Summary:");
    println!("{}", format_data_info(spec));
    println!();
    println!("{}", format_training_info(spec));
    println!();
    println!("{}", format_output_info(spec));
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(level, LogLevel::Normal, &format!("Validating config: {}", args.config.display()));

    let spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;

    log(level, LogLevel::Normal, "Configuration is valid");

    if args.detailed && level != LogLevel::Quiet {
        print_detailed_summary(&spec);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn make_test_spec() -> WorkbenchSpec {
        let mut spec = WorkbenchSpec::new("/data/train.csv");
        spec.data.test = Some(PathBuf::from("/data/test.csv"));
        spec.split.seed = Some(9);
        spec
    }

    #[test]
    fn test_format_data_info() {
        let info = format_data_info(&make_test_spec());
        assert!(info.contains("Training data: /data/train.csv"));
        assert!(info.contains("Test data: /data/test.csv"));
        assert!(info.contains("seed: 9"));

        let info = format_data_info(&WorkbenchSpec::new("t.csv"));
        assert!(!info.contains("Test data"));
        assert!(info.contains("seed: random"));
    }

    #[test]
    fn test_format_training_info() {
        let info = format_training_info(&make_test_spec());
        assert!(info.contains("Hidden units: 16"));
        assert!(info.contains("Epochs: 40 (batch size 16)"));
        assert!(info.contains("val_loss with patience 5"));
    }

    #[test]
    fn test_format_output_info() {
        let info = format_output_info(&make_test_spec());
        assert!(info.contains("Threshold: 0.50"));
        assert!(info.contains("(json)"));
    }
}
