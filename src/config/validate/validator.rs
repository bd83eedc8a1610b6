//! Configuration validation logic

use super::error::ValidationError;
use crate::config::schema::WorkbenchSpec;
use crate::train::EpochRecord;

/// Validate a workbench specification
///
/// Checks:
/// - Data files exist
/// - Numeric values are in valid ranges
/// - The early-stop monitor names a known loss
pub fn validate_config(spec: &WorkbenchSpec) -> Result<(), ValidationError> {
    // Skip in tests where files may not exist
    #[cfg(not(test))]
    {
        if !spec.data.train.exists() {
            return Err(ValidationError::TrainDataNotFound(spec.data.train.display().to_string()));
        }
        if let Some(test) = &spec.data.test {
            if !test.exists() {
                return Err(ValidationError::TestDataNotFound(test.display().to_string()));
            }
        }
    }

    let ratio = spec.split.val_ratio;
    if !(ratio > 0.0 && ratio < 1.0) {
        return Err(ValidationError::InvalidValRatio(ratio));
    }

    let t = &spec.training;
    if t.epochs == 0 {
        return Err(ValidationError::InvalidEpochs(t.epochs));
    }
    if t.batch_size == 0 {
        return Err(ValidationError::InvalidBatchSize(t.batch_size));
    }
    if !(t.lr > 0.0 && t.lr <= 1.0) {
        return Err(ValidationError::InvalidLearningRate(t.lr));
    }
    if t.hidden_units == 0 {
        return Err(ValidationError::InvalidHiddenUnits(t.hidden_units));
    }
    if t.patience == 0 {
        return Err(ValidationError::InvalidPatience(t.patience));
    }
    if !EpochRecord::MONITORABLE.contains(&t.monitor.as_str()) {
        return Err(ValidationError::InvalidMonitor(t.monitor.clone()));
    }

    if spec.eval.roc_steps == 0 {
        return Err(ValidationError::InvalidRocSteps(spec.eval.roc_steps));
    }
    let th = spec.eval.threshold;
    if !(0.0..=1.0).contains(&th) {
        return Err(ValidationError::InvalidThreshold(th));
    }

    Ok(())
}
