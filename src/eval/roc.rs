//! ROC curve and trapezoidal AUC over a fixed threshold grid

use super::confusion::{count, safe_ratio};
use serde::{Deserialize, Serialize};

/// One operating point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RocPoint {
    pub fpr: f64,
    pub tpr: f64,
    pub threshold: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RocCurve {
    /// Sorted by `fpr`, then `tpr`, ascending
    pub points: Vec<RocPoint>,
    pub auc: f64,
}

/// Evaluate `steps + 1` thresholds `i / steps` for `i` in `0..=steps`.
///
/// Zero denominators in TPR and FPR are replaced by 1, so degenerate label
/// sets give rates of 0 rather than NaN. `steps == 0` is treated as 1.
///
/// Points sharing an `fpr` are ordered by `tpr` so the curve is monotone
/// and a perfect separator integrates to 1.
pub fn roc_points(y_true: &[f32], y_prob: &[f32], steps: usize) -> RocCurve {
    let steps = steps.max(1);
    let mut points: Vec<RocPoint> = (0..=steps)
        .map(|i| {
            let threshold = i as f64 / steps as f64;
            let (tp, fp, tn, fn_) = count(y_true, y_prob, threshold as f32);
            RocPoint {
                fpr: safe_ratio(fp as f64, (fp + tn) as f64),
                tpr: safe_ratio(tp as f64, (tp + fn_) as f64),
                threshold,
            }
        })
        .collect();

    points.sort_by(|a, b| a.fpr.total_cmp(&b.fpr).then(a.tpr.total_cmp(&b.tpr)));

    let auc = points.windows(2).map(|w| (w[1].fpr - w[0].fpr) * (w[0].tpr + w[1].tpr) / 2.0).sum();
    RocCurve { points, auc }
}
