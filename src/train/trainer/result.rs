//! Training result types

use super::epoch::EpochRecord;
use crate::train::callback::StopReason;

/// Result of a training run
#[derive(Debug, Clone)]
pub struct TrainResult {
    /// Number of epochs completed
    pub epochs_run: usize,
    /// Mean training loss of the last completed epoch
    pub final_loss: f64,
    /// Best value of the monitored metric, if it was ever reported
    pub best_metric: Option<f64>,
    /// 0-indexed epoch of the best metric
    pub best_epoch: Option<usize>,
    /// Whether training stopped before the epoch budget ran out
    pub stopped_early: bool,
    pub stop_reason: Option<StopReason>,
    /// Whether the best snapshot was written back into the model
    pub restored_best: bool,
    /// Total training time in seconds
    pub elapsed_secs: f64,
    /// One record per completed epoch
    pub history: Vec<EpochRecord>,
}

impl TrainResult {
    pub fn last(&self) -> Option<&EpochRecord> {
        self.history.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_train_result_clone() {
        let result = TrainResult {
            epochs_run: 5,
            final_loss: 0.1,
            best_metric: Some(0.05),
            best_epoch: Some(3),
            stopped_early: false,
            stop_reason: None,
            restored_best: false,
            elapsed_secs: 10.0,
            history: vec![],
        };
        let cloned = result.clone();
        assert_eq!(result.epochs_run, cloned.epochs_run);
        assert_eq!(result.stopped_early, cloned.stopped_early);
        assert!(cloned.last().is_none());
    }
}
