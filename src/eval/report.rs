//! Threshold report: the confusion matrix and rates at one decision
//! threshold, optionally with the AUC of the whole curve

use super::confusion::{confusion_stats, ConfusionStats};
use super::roc::{roc_points, RocCurve};
use std::fmt;

/// Metrics at a movable decision threshold.
///
/// Re-thresholding only recounts the confusion matrix; the probabilities
/// and the ROC curve stay as they are.
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdReport {
    pub threshold: f32,
    pub stats: ConfusionStats,
    pub auc: Option<f64>,
}

impl ThresholdReport {
    pub fn new(y_true: &[f32], y_prob: &[f32], threshold: f32) -> Self {
        Self { threshold, stats: confusion_stats(y_true, y_prob, threshold), auc: None }
    }

    /// Report plus the ROC curve at `roc_steps` resolution.
    pub fn with_roc(y_true: &[f32], y_prob: &[f32], threshold: f32, roc_steps: usize) -> (Self, RocCurve) {
        let curve = roc_points(y_true, y_prob, roc_steps);
        let report = Self { auc: Some(curve.auc), ..Self::new(y_true, y_prob, threshold) };
        (report, curve)
    }

    /// Same probabilities at another threshold.
    pub fn rethreshold(&self, y_true: &[f32], y_prob: &[f32], threshold: f32) -> Self {
        Self { auc: self.auc, ..Self::new(y_true, y_prob, threshold) }
    }
}

impl fmt::Display for ThresholdReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(auc) = self.auc {
            writeln!(f, "AUC = {auc:.4}")?;
        }
        writeln!(f, "Threshold: {:.2}", self.threshold)?;
        write!(f, "{}", self.stats)
    }
}
