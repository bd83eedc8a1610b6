//! Binary classification metrics
//!
//! - `confusion`: confusion matrix, precision, recall and F1 at a threshold
//! - `roc`: ROC points over a threshold grid and trapezoidal AUC
//! - `report`: printable threshold report
//!
//! ## Example
//!
//! ```
//! use rescate::eval::ThresholdReport;
//!
//! let y = [1.0, 0.0, 1.0, 0.0];
//! let p = [0.9, 0.2, 0.8, 0.1];
//! let (report, curve) = ThresholdReport::with_roc(&y, &p, 0.5, 200);
//! assert_eq!(curve.auc, 1.0);
//! println!("{report}");
//! ```

mod confusion;
mod report;
mod roc;

pub use confusion::{confusion_stats, ConfusionStats};
pub use report::ThresholdReport;
pub use roc::{roc_points, RocCurve, RocPoint};
