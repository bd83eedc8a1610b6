//! Run command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{apply_overrides, load_config, validate_config, RunArgs, WorkbenchSpec};
use crate::io::{save_bundle, SaveConfig};
use crate::session::Session;
use crate::train::{ProgressCallback, Trainer};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

/// Files written by a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutputs {
    pub model: PathBuf,
    pub submission: Option<PathBuf>,
    pub auc: Option<f64>,
}

/// Load, preprocess, train, evaluate, predict and save as configured.
pub fn execute(spec: &WorkbenchSpec, level: LogLevel) -> crate::Result<RunOutputs> {
    let mut rng = match spec.split.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let session = Session::new().load(Some(&spec.data.train), spec.data.test.as_deref())?;
    let data = session.data_summary();
    log(
        level,
        LogLevel::Normal,
        &format!("Loaded {} train / {} test rows (~{:.1}% missing)", data.train_rows, data.test_rows, data.missing_pct),
    );

    let session = session.preprocess(spec.feature_config(), spec.split.val_ratio, &mut rng)?;
    for line in session.preprocess_summary()? {
        log(level, LogLevel::Verbose, &line);
    }

    let session = session.build_model(spec.training.hidden_units, &mut rng)?;
    for line in session.model_summary()? {
        log(level, LogLevel::Verbose, &line);
    }

    let mut trainer = Trainer::new(spec.train_config());
    trainer.add_callback(ProgressCallback::new());
    let (session, result) = session.train(&mut trainer, &mut rng)?;
    let mut trained = format!("Trained {} epochs in {:.1}s", result.epochs_run, result.elapsed_secs);
    if let Some(reason) = result.stop_reason {
        trained.push_str(&format!(" ({reason})"));
    }
    log(level, LogLevel::Normal, &trained);

    let session = session.with_threshold(spec.eval.threshold);
    let (report, _) = session.evaluate(spec.eval.roc_steps)?;
    log(level, LogLevel::Normal, &report.to_string());

    let submission = if session.raw_test.is_empty() {
        log(level, LogLevel::Normal, "No test rows; skipping predictions");
        None
    } else {
        let session = session.predict_test()?;
        session.export(&spec.output.dir)?.map(|files| files.submission)
    };

    let format = spec.output.model_format;
    let model = spec.output.dir.join(format!("model.{}", format.extension()));
    let bundle = session.bundle("titanic", spec.eval.roc_steps)?;
    std::fs::create_dir_all(&spec.output.dir)
        .map_err(|e| crate::Error::Io(format!("Failed to create {}: {e}", spec.output.dir.display())))?;
    save_bundle(&bundle, &model, &SaveConfig::new(format))?;
    log(level, LogLevel::Normal, &format!("Model saved to {}", model.display()));

    Ok(RunOutputs { model, submission, auc: report.auc })
}

pub fn run_pipeline(args: RunArgs, level: LogLevel) -> Result<(), String> {
    log(level, LogLevel::Normal, &format!("Rescate: running {}", args.config.display()));

    let mut spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;
    apply_overrides(&mut spec, &args);
    validate_config(&spec).map_err(|e| format!("Validation failed: {e}"))?;

    if args.dry_run {
        log(level, LogLevel::Normal, "Dry run - config validated successfully");
        log(level, LogLevel::Verbose, &format!("  Train: {}", spec.data.train.display()));
        log(
            level,
            LogLevel::Verbose,
            &format!("  Epochs: {} (batch size {})", spec.training.epochs, spec.training.batch_size),
        );
        log(level, LogLevel::Verbose, &format!("  Threshold: {:.2}", spec.eval.threshold));
        return Ok(());
    }

    execute(&spec, level).map_err(|e| format!("Run error: {e}"))?;
    log(level, LogLevel::Normal, "Run complete!");
    Ok(())
}
