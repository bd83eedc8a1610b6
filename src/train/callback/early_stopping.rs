//! Early stopping with best-weight restore
//!
//! The controller watches one metric of the epoch-record stream. Each
//! improvement captures an owned snapshot of the live weights; when patience
//! runs out the snapshot is handed back to the trainer for restoring.

use crate::train::EpochRecord;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Smallest decrease that counts as an improvement.
pub const MIN_DELTA: f64 = 1e-12;

/// External cancellation flag, cheap to clone and safe to trigger from any
/// thread. Training honours it at the next epoch boundary.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Clear a previous request before a new run.
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Controller state after the most recent observation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopState {
    Running,
    BetterFound,
    PatienceWaiting,
    Stopped,
}

/// Why training stopped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StopReason {
    /// No improvement for `patience` epochs
    PatienceExhausted { best: f64, best_epoch: Option<usize> },
    /// Cancellation was requested
    Cancelled,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PatienceExhausted { best, best_epoch: Some(e) } => {
                write!(f, "no improvement since epoch {} (best {best:.4})", e + 1)
            }
            Self::PatienceExhausted { best, best_epoch: None } => {
                write!(f, "no improvement (best {best:.4})")
            }
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Outcome of observing one epoch.
#[derive(Clone, Debug, PartialEq)]
pub enum StopDecision<W> {
    Continue,
    /// Stop training. `restore` carries the best snapshot when the live
    /// weights should be replaced.
    Stop { restore: Option<W>, reason: StopReason },
}

impl<W> StopDecision<W> {
    pub fn is_stop(&self) -> bool {
        matches!(self, Self::Stop { .. })
    }
}

/// Early-stop controller over weights of type `W`.
///
/// # Example
///
/// ```
/// use rescate::train::{EarlyStopping, EpochRecord, StopDecision};
///
/// let mut es = EarlyStopping::new(1, "loss");
/// let rec = |epoch, loss| EpochRecord { epoch, loss, val_loss: None, accuracy: 0.0, val_accuracy: None };
///
/// assert_eq!(es.observe(&rec(0, 0.5), &vec![1.0], false), StopDecision::Continue);
/// match es.observe(&rec(1, 0.9), &vec![2.0], false) {
///     StopDecision::Stop { restore, .. } => assert_eq!(restore, Some(vec![1.0])),
///     StopDecision::Continue => unreachable!(),
/// }
/// ```
#[derive(Clone, Debug)]
pub struct EarlyStopping<W> {
    patience: usize,
    monitor: String,
    best: f64,
    best_epoch: Option<usize>,
    pub(crate) wait: usize,
    snapshot: Option<W>,
    state: StopState,
    reason: Option<StopReason>,
}

impl<W: Clone> EarlyStopping<W> {
    /// Stop after `patience` epochs without improvement of `monitor`
    /// (a name accepted by [`EpochRecord::metric`]).
    pub fn new(patience: usize, monitor: impl Into<String>) -> Self {
        Self {
            patience,
            monitor: monitor.into(),
            best: f64::INFINITY,
            best_epoch: None,
            wait: 0,
            snapshot: None,
            state: StopState::Running,
            reason: None,
        }
    }

    pub fn state(&self) -> StopState {
        self.state
    }

    pub fn best(&self) -> f64 {
        self.best
    }

    pub fn best_epoch(&self) -> Option<usize> {
        self.best_epoch
    }

    pub fn monitor(&self) -> &str {
        &self.monitor
    }

    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Feed one epoch. `weights` are only cloned on improvement.
    ///
    /// The metric step runs first; a cancellation seen in the same epoch as
    /// an exhausted patience still returns the restore.
    pub fn observe(&mut self, record: &EpochRecord, weights: &W, cancelled: bool) -> StopDecision<W> {
        if self.state == StopState::Stopped {
            return StopDecision::Stop { restore: None, reason: self.reason.unwrap_or(StopReason::Cancelled) };
        }

        if let Some(cur) = record.metric(&self.monitor) {
            if cur < self.best - MIN_DELTA {
                self.best = cur;
                self.best_epoch = Some(record.epoch);
                self.wait = 0;
                self.snapshot = Some(weights.clone());
                self.state = StopState::BetterFound;
            } else {
                self.wait += 1;
                self.state = StopState::PatienceWaiting;
                if self.wait >= self.patience {
                    let restore = self.snapshot.take();
                    let reason = StopReason::PatienceExhausted { best: self.best, best_epoch: self.best_epoch };
                    return self.stop(restore, reason);
                }
            }
        }

        if cancelled {
            return self.stop(None, StopReason::Cancelled);
        }
        StopDecision::Continue
    }

    fn stop(&mut self, restore: Option<W>, reason: StopReason) -> StopDecision<W> {
        self.state = StopState::Stopped;
        self.reason = Some(reason);
        tracing::warn!(
            monitor = %self.monitor,
            restored = restore.is_some(),
            "early stop: {reason}"
        );
        StopDecision::Stop { restore, reason }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn restore_is_weights_of_best_epoch(
            losses in proptest::collection::vec(0.0f64..10.0, 1..40),
            patience in 1usize..6,
        ) {
            let mut es = EarlyStopping::new(patience, "val_loss");
            let mut best = f64::INFINITY;
            let mut best_epoch = None;

            for (epoch, &l) in losses.iter().enumerate() {
                if l < best - MIN_DELTA {
                    best = l;
                    best_epoch = Some(epoch);
                }
                let r = EpochRecord { epoch, loss: l, val_loss: Some(l), accuracy: 0.0, val_accuracy: None };
                if let StopDecision::Stop { restore, .. } = es.observe(&r, &epoch, false) {
                    prop_assert_eq!(restore, best_epoch);
                    prop_assert!(epoch - best_epoch.unwrap_or(0) >= patience);
                    break;
                }
            }
            prop_assert_eq!(es.best(), best);
        }

        #[test]
        fn wait_never_exceeds_patience(
            losses in proptest::collection::vec(0.0f64..1.0, 1..30),
            patience in 1usize..4,
        ) {
            let mut es = EarlyStopping::new(patience, "loss");
            for (epoch, &l) in losses.iter().enumerate() {
                let r = EpochRecord { epoch, loss: l, val_loss: None, accuracy: 0.0, val_accuracy: None };
                let stop = es.observe(&r, &(), false).is_stop();
                prop_assert!(es.wait <= patience);
                if stop {
                    break;
                }
            }
        }
    }
}
