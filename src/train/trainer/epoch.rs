//! Per-epoch training record

use serde::{Deserialize, Serialize};

/// Metrics observed at the end of one epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochRecord {
    /// 0-indexed epoch
    pub epoch: usize,
    pub loss: f64,
    pub val_loss: Option<f64>,
    pub accuracy: f64,
    pub val_accuracy: Option<f64>,
}

impl EpochRecord {
    /// Metric names accepted by [`EpochRecord::metric`].
    pub const METRICS: [&'static str; 4] = ["loss", "val_loss", "acc", "val_acc"];

    /// Metrics early stopping may watch. Improvement means a decrease, so
    /// only losses qualify.
    pub const MONITORABLE: [&'static str; 2] = ["loss", "val_loss"];

    /// Look up a metric by name. Unknown names and absent validation
    /// metrics resolve to `None`.
    pub fn metric(&self, name: &str) -> Option<f64> {
        match name {
            "loss" => Some(self.loss),
            "val_loss" => self.val_loss,
            "acc" | "accuracy" => Some(self.accuracy),
            "val_acc" | "val_accuracy" => self.val_accuracy,
            _ => None,
        }
    }

    /// `epoch N: loss=… val_loss=… acc=…` with 1-based epoch numbering.
    pub fn log_line(&self) -> String {
        let val = self.val_loss.map(|v| format!(" val_loss={v:.4}")).unwrap_or_default();
        format!("epoch {}: loss={:.4}{} acc={:.4}", self.epoch + 1, self.loss, val, self.accuracy)
    }
}
