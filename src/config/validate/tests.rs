//! Unit tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_config;
use crate::config::schema::*;

fn create_valid_spec() -> WorkbenchSpec {
    let mut spec = WorkbenchSpec::new("train.csv");
    spec.data.test = Some("test.csv".into());
    spec
}

#[test]
fn test_valid_config() {
    assert!(validate_config(&create_valid_spec()).is_ok());
}

#[test]
fn test_invalid_val_ratio() {
    for ratio in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
        let mut spec = create_valid_spec();
        spec.split.val_ratio = ratio;
        let err = validate_config(&spec).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValRatio(_)), "{ratio}");
    }
}

#[test]
fn test_zero_counts() {
    let mut spec = create_valid_spec();
    spec.training.epochs = 0;
    assert_eq!(validate_config(&spec), Err(ValidationError::InvalidEpochs(0)));

    let mut spec = create_valid_spec();
    spec.training.batch_size = 0;
    assert_eq!(validate_config(&spec), Err(ValidationError::InvalidBatchSize(0)));

    let mut spec = create_valid_spec();
    spec.training.hidden_units = 0;
    assert_eq!(validate_config(&spec), Err(ValidationError::InvalidHiddenUnits(0)));

    let mut spec = create_valid_spec();
    spec.training.patience = 0;
    assert_eq!(validate_config(&spec), Err(ValidationError::InvalidPatience(0)));

    let mut spec = create_valid_spec();
    spec.eval.roc_steps = 0;
    assert_eq!(validate_config(&spec), Err(ValidationError::InvalidRocSteps(0)));
}

#[test]
fn test_invalid_learning_rate() {
    let mut spec = create_valid_spec();
    spec.training.lr = 0.0;
    assert!(matches!(validate_config(&spec), Err(ValidationError::InvalidLearningRate(_))));

    spec.training.lr = 1.5;
    assert!(matches!(validate_config(&spec), Err(ValidationError::InvalidLearningRate(_))));

    spec.training.lr = 1.0;
    assert!(validate_config(&spec).is_ok());
}

#[test]
fn test_invalid_monitor() {
    let mut spec = create_valid_spec();
    spec.training.monitor = "f1".to_string();
    let err = validate_config(&spec).unwrap_err();
    assert_eq!(err, ValidationError::InvalidMonitor("f1".to_string()));
    assert!(err.to_string().contains("val_loss"));

    spec.training.monitor = "val_acc".to_string();
    assert!(validate_config(&spec).is_err());

    spec.training.monitor = "loss".to_string();
    assert!(validate_config(&spec).is_ok());
}

#[test]
fn test_threshold_bounds() {
    let mut spec = create_valid_spec();
    spec.eval.threshold = 0.0;
    assert!(validate_config(&spec).is_ok());
    spec.eval.threshold = 1.0;
    assert!(validate_config(&spec).is_ok());
    spec.eval.threshold = 1.01;
    assert!(matches!(validate_config(&spec), Err(ValidationError::InvalidThreshold(_))));
    spec.eval.threshold = f32::NAN;
    assert!(matches!(validate_config(&spec), Err(ValidationError::InvalidThreshold(_))));
}
