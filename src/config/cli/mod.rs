//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! rescate run config.yaml
//! rescate run config.yaml --epochs 20 --threshold 0.4 --seed 7
//! rescate validate config.yaml
//! rescate inspect train.csv --rows 5
//! rescate predict output/model.json test.csv --output-dir ./output
//! rescate report output/model.json labeled.csv --threshold 0.35
//! ```

mod core;
mod extended;

pub use core::{apply_overrides, parse_args, Cli, Command, RunArgs, ValidateArgs};
pub use extended::{InspectArgs, PredictArgs, ReportArgs};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorkbenchSpec;
    use std::path::PathBuf;

    #[test]
    fn test_parse_run_command() {
        let cli = parse_args(["rescate", "run", "config.yaml"]).unwrap();
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.config, PathBuf::from("config.yaml"));
                assert!(!args.dry_run);
                assert_eq!(args.epochs, None);
            }
            _ => panic!("Expected Run command"),
        }
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_run_with_overrides() {
        let cli = parse_args([
            "rescate",
            "run",
            "config.yaml",
            "--epochs",
            "10",
            "--batch-size",
            "32",
            "--threshold",
            "0.35",
            "--seed",
            "42",
            "--output-dir",
            "./out",
            "--dry-run",
        ])
        .unwrap();

        let Command::Run(args) = cli.command else { panic!("Expected Run command") };
        let mut spec = WorkbenchSpec::new("train.csv");
        apply_overrides(&mut spec, &args);
        assert_eq!(spec.training.epochs, 10);
        assert_eq!(spec.training.batch_size, 32);
        assert!((spec.eval.threshold - 0.35).abs() < 1e-6);
        assert_eq!(spec.split.seed, Some(42));
        assert_eq!(spec.output.dir, PathBuf::from("./out"));
        assert!(args.dry_run);
    }

    #[test]
    fn test_overrides_leave_unset_fields() {
        let cli = parse_args(["rescate", "run", "c.yaml"]).unwrap();
        let Command::Run(args) = cli.command else { panic!("Expected Run command") };
        let mut spec = WorkbenchSpec::new("train.csv");
        spec.split.seed = Some(3);
        apply_overrides(&mut spec, &args);
        assert_eq!(spec, {
            let mut s = WorkbenchSpec::new("train.csv");
            s.split.seed = Some(3);
            s
        });
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = parse_args(["rescate", "-v", "validate", "c.yaml", "--detailed"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Validate(ValidateArgs { detailed: true, .. })));

        let cli = parse_args(["rescate", "inspect", "train.csv", "-q"]).unwrap();
        assert!(cli.quiet);
        assert!(matches!(cli.command, Command::Inspect(InspectArgs { rows: 10, .. })));
    }

    #[test]
    fn test_parse_predict_and_report() {
        let cli = parse_args(["rescate", "predict", "m.json", "test.csv", "-t", "0.4"]).unwrap();
        let Command::Predict(args) = cli.command else { panic!("Expected Predict command") };
        assert_eq!(args.model, PathBuf::from("m.json"));
        assert_eq!(args.threshold, Some(0.4));
        assert_eq!(args.output_dir, PathBuf::from("./output"));

        let cli = parse_args(["rescate", "report", "m.yaml", "labeled.csv", "--roc-steps", "50"]).unwrap();
        let Command::Report(args) = cli.command else { panic!("Expected Report command") };
        assert_eq!(args.roc_steps, 50);
        assert_eq!(args.threshold, None);
    }

    #[test]
    fn test_missing_config_is_an_error() {
        assert!(parse_args(["rescate", "run"]).is_err());
        assert!(parse_args(["rescate", "bogus"]).is_err());
    }
}
