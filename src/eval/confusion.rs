//! Binary confusion matrix at a decision threshold

use std::fmt;

/// Counts and derived rates for one threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfusionStats {
    pub tp: usize,
    pub fp: usize,
    pub tn: usize,
    pub fn_: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Raw counts. Labels other than 0 and 1 are counted as false negatives so
/// the four cells always add up to the number of samples.
pub(crate) fn count(y_true: &[f32], y_prob: &[f32], threshold: f32) -> (usize, usize, usize, usize) {
    assert_eq!(y_true.len(), y_prob.len(), "Labels and probabilities must have same length");

    let (mut tp, mut fp, mut tn, mut fn_) = (0, 0, 0, 0);
    for (&y, &p) in y_true.iter().zip(y_prob) {
        let positive = p >= threshold;
        if y == 1.0 && positive {
            tp += 1;
        } else if y == 0.0 && positive {
            fp += 1;
        } else if y == 0.0 && !positive {
            tn += 1;
        } else {
            fn_ += 1;
        }
    }
    (tp, fp, tn, fn_)
}

/// Ratio with the denominator floored to 1 when it is 0.
pub(crate) fn safe_ratio(num: f64, den: f64) -> f64 {
    num / if den == 0.0 { 1.0 } else { den }
}

/// Confusion counts, precision, recall and F1.
///
/// A probability exactly at `threshold` counts as positive.
///
/// # Example
///
/// ```
/// use rescate::eval::confusion_stats;
///
/// let st = confusion_stats(&[1.0, 0.0, 1.0, 0.0], &[0.9, 0.2, 0.4, 0.6], 0.5);
/// assert_eq!((st.tp, st.fp, st.tn, st.fn_), (1, 1, 1, 1));
/// assert_eq!(st.f1, 0.5);
/// ```
pub fn confusion_stats(y_true: &[f32], y_prob: &[f32], threshold: f32) -> ConfusionStats {
    let (tp, fp, tn, fn_) = count(y_true, y_prob, threshold);
    let precision = safe_ratio(tp as f64, (tp + fp) as f64);
    let recall = safe_ratio(tp as f64, (tp + fn_) as f64);
    let f1 = safe_ratio(2.0 * precision * recall, precision + recall);
    ConfusionStats { tp, fp, tn, fn_, precision, recall, f1 }
}

impl ConfusionStats {
    pub fn total(&self) -> usize {
        self.tp + self.fp + self.tn + self.fn_
    }

    pub fn accuracy(&self) -> f64 {
        safe_ratio((self.tp + self.tn) as f64, self.total() as f64)
    }
}

impl fmt::Display for ConfusionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Confusion Matrix:")?;
        writeln!(f, "          Pred 1  Pred 0")?;
        writeln!(f, "True 1  {:>7} {:>7}", self.tp, self.fn_)?;
        writeln!(f, "True 0  {:>7} {:>7}", self.fp, self.tn)?;
        writeln!(f, "Precision: {:.2}%", self.precision * 100.0)?;
        writeln!(f, "Recall: {:.2}%", self.recall * 100.0)?;
        write!(f, "F1: {:.4}", self.f1)
    }
}
