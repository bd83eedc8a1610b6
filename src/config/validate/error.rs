//! Validation error types

/// Validation error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Training data path does not exist: {0}")]
    TrainDataNotFound(String),

    #[error("Test data path does not exist: {0}")]
    TestDataNotFound(String),

    #[error("Invalid validation ratio: {0} (must be > 0.0 and < 1.0)")]
    InvalidValRatio(f64),

    #[error("Invalid epochs: {0} (must be > 0)")]
    InvalidEpochs(usize),

    #[error("Invalid batch size: {0} (must be > 0)")]
    InvalidBatchSize(usize),

    #[error("Invalid learning rate: {0} (must be > 0.0 and <= 1.0)")]
    InvalidLearningRate(f32),

    #[error("Invalid hidden units: {0} (must be > 0)")]
    InvalidHiddenUnits(usize),

    #[error("Invalid patience: {0} (must be > 0)")]
    InvalidPatience(usize),

    #[error("Invalid monitor: {0} (must be one of: loss, val_loss)")]
    InvalidMonitor(String),

    #[error("Invalid ROC steps: {0} (must be > 0)")]
    InvalidRocSteps(usize),

    #[error("Invalid threshold: {0} (must be in [0.0, 1.0])")]
    InvalidThreshold(f32),
}
