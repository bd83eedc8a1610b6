//! Trainer struct and the epoch loop

use super::epoch::EpochRecord;
use super::result::TrainResult;
use crate::optim::{Adam, Optimizer};
use crate::preprocess::Tensors;
use crate::train::callback::{
    CallbackAction, CallbackContext, CallbackManager, EarlyStopping, StopDecision, StopHandle, TrainerCallback,
};
use crate::train::{Mlp, TrainConfig};
use crate::{Error, Result};
use ndarray::{Array1, Axis};
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Instant;

/// Runs mini-batch Adam over shuffled rows, one [`EpochRecord`] per epoch,
/// with early stopping and best-weight restore.
///
/// # Example
///
/// ```no_run
/// use rescate::train::{ProgressCallback, TrainConfig, Trainer};
///
/// let mut trainer = Trainer::new(TrainConfig::default());
/// trainer.add_callback(ProgressCallback::new());
/// let stop = trainer.stop_handle();
/// // hand `stop` to a signal handler, then call `trainer.fit(...)`
/// # drop(stop);
/// ```
pub struct Trainer {
    pub(crate) config: TrainConfig,
    pub(crate) callbacks: CallbackManager,
    stop: StopHandle,
    start_time: Option<Instant>,
}

impl Trainer {
    pub fn new(config: TrainConfig) -> Self {
        Self { config, callbacks: CallbackManager::new(), stop: StopHandle::new(), start_time: None }
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    /// Add a callback to the trainer
    pub fn add_callback<C: TrainerCallback + 'static>(&mut self, callback: C) {
        self.callbacks.add(callback);
    }

    pub fn callbacks(&self) -> &CallbackManager {
        &self.callbacks
    }

    /// Handle for cancelling a running [`Trainer::fit`] from elsewhere.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    fn elapsed(&self) -> f64 {
        self.start_time.map_or(0.0, |t| t.elapsed().as_secs_f64())
    }

    /// Train `model` on `train`, validating on `val` after every epoch.
    ///
    /// Rows are reshuffled each epoch with `rng`. Training ends after the
    /// configured epochs, when patience on the monitored metric runs out
    /// (the best weights are restored), or when cancellation is requested
    /// (the current epoch completes first and weights are left as they are).
    pub fn fit<R: Rng + ?Sized>(
        &mut self,
        model: &mut Mlp,
        train: &Tensors,
        val: Option<&Tensors>,
        rng: &mut R,
    ) -> Result<TrainResult> {
        let y_train = train
            .labels()
            .ok_or_else(|| Error::Precondition("training tensors carry no labels".to_string()))?;
        let val = match val {
            Some(v) => {
                let y = v
                    .labels()
                    .ok_or_else(|| Error::Precondition("validation tensors carry no labels".to_string()))?;
                Some((v, y))
            }
            None => None,
        };
        let n = train.n_rows();
        if n == 0 {
            return Err(Error::EmptyInput("no training rows".to_string()));
        }
        if train.feat_len != model.input_dim() {
            return Err(Error::ShapeMismatch {
                expected: vec![n, model.input_dim()],
                actual: vec![n, train.feat_len],
            });
        }

        let max_epochs = self.config.epochs;
        let batch_size = self.config.batch_size.max(1);
        let steps_per_epoch = n.div_ceil(batch_size);
        let mut optimizer = Adam::default_params(self.config.lr);
        let mut early = EarlyStopping::new(self.config.patience, self.config.monitor.clone());

        self.stop.reset();
        self.start_time = Some(Instant::now());
        let mut history = Vec::with_capacity(max_epochs);
        let mut stop_reason = None;
        let mut restored_best = false;

        tracing::info!(rows = n, max_epochs, batch_size, lr = self.config.lr, "training started");
        let ctx = CallbackContext { max_epochs, steps_per_epoch, ..Default::default() };
        self.callbacks.on_train_begin(&ctx);

        let mut order: Vec<usize> = (0..n).collect();
        for epoch in 0..max_epochs {
            order.shuffle(rng);
            let mut loss_sum = 0.0f64;
            let mut hits = 0usize;

            for (step, idx) in order.chunks(batch_size).enumerate() {
                let xb = train.x.select(Axis(0), idx);
                let yb: Array1<f32> = idx.iter().map(|&i| y_train[i]).collect();
                let out = model.loss_and_grads(&xb, &yb)?;
                let grads = out.grads.views();
                optimizer.step(&mut model.weights_mut().views_mut(), &grads);

                loss_sum += f64::from(out.loss) * idx.len() as f64;
                hits += out.probs.iter().zip(&yb).filter(|&(&p, &y)| (p > 0.5) == (y > 0.5)).count();

                let ctx = CallbackContext {
                    epoch,
                    max_epochs,
                    step,
                    steps_per_epoch,
                    loss: f64::from(out.loss),
                    record: None,
                    elapsed_secs: self.elapsed(),
                };
                if self.callbacks.on_step_end(&ctx) == CallbackAction::Stop {
                    self.stop.request_stop();
                }
            }

            let (val_loss, val_accuracy) = match &val {
                Some((v, y)) => {
                    let (l, a) = model.evaluate(&v.x, y)?;
                    (Some(f64::from(l)), Some(f64::from(a)))
                }
                None => (None, None),
            };
            let record = EpochRecord {
                epoch,
                loss: loss_sum / n as f64,
                val_loss,
                accuracy: hits as f64 / n as f64,
                val_accuracy,
            };
            tracing::debug!(
                epoch = epoch + 1,
                loss = record.loss,
                val_loss = ?record.val_loss,
                acc = record.accuracy,
                "epoch finished"
            );

            let ctx = CallbackContext {
                epoch,
                max_epochs,
                step: steps_per_epoch,
                steps_per_epoch,
                loss: record.loss,
                record: Some(record.clone()),
                elapsed_secs: self.elapsed(),
            };
            if self.callbacks.on_epoch_end(&ctx) == CallbackAction::Stop {
                self.stop.request_stop();
            }

            let decision = early.observe(&record, model.weights(), self.stop.is_stop_requested());
            history.push(record);
            if let StopDecision::Stop { restore, reason } = decision {
                if let Some(best) = restore {
                    model.set_weights(best)?;
                    restored_best = true;
                }
                stop_reason = Some(reason);
                break;
            }
        }

        let final_loss = history.last().map_or(0.0, |r| r.loss);
        let result = TrainResult {
            epochs_run: history.len(),
            final_loss,
            best_metric: early.best_epoch().map(|_| early.best()),
            best_epoch: early.best_epoch(),
            stopped_early: stop_reason.is_some(),
            stop_reason,
            restored_best,
            elapsed_secs: self.elapsed(),
            history,
        };

        let ctx = CallbackContext {
            epoch: result.epochs_run,
            max_epochs,
            loss: final_loss,
            record: result.last().cloned(),
            elapsed_secs: result.elapsed_secs,
            ..Default::default()
        };
        self.callbacks.on_train_end(&ctx);
        tracing::info!(
            epochs = result.epochs_run,
            final_loss,
            stopped_early = result.stopped_early,
            restored_best,
            "training finished"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Two separable blobs: label 1 when the first feature is positive.
    fn blobs(n: usize, seed: u64, flip: bool) -> Tensors {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut x = Array2::zeros((n, 2));
        let mut y = Array2::zeros((n, 1));
        for i in 0..n {
            let label = (i % 2) as f32;
            let centre = if label == 1.0 { 2.0 } else { -2.0 };
            x[[i, 0]] = centre + rng.random_range(-0.5f32..0.5);
            x[[i, 1]] = rng.random_range(-1.0f32..1.0);
            y[[i, 0]] = if flip { 1.0 - label } else { label };
        }
        Tensors { x, y: Some(y), feat_len: 2 }
    }

    fn setup(config: TrainConfig) -> (Trainer, Mlp, StdRng) {
        let mut rng = StdRng::seed_from_u64(42);
        let model = Mlp::new(2, 8, &mut rng);
        (Trainer::new(config), model, rng)
    }

    #[test]
    fn test_fit_learns_separable_data() {
        let (mut trainer, mut model, mut rng) = setup(TrainConfig::default().with_epochs(30).with_lr(0.05));
        let train = blobs(64, 1, false);
        let val = blobs(32, 2, false);
        let result = trainer.fit(&mut model, &train, Some(&val), &mut rng).unwrap();

        assert!(result.epochs_run > 0);
        assert_eq!(result.history.len(), result.epochs_run);
        let first = &result.history[0];
        let last = result.last().unwrap();
        assert!(last.loss < first.loss);
        let (_, acc) = model.evaluate(&val.x, &val.labels().unwrap()).unwrap();
        assert!(acc > 0.9, "accuracy {acc}");
    }

    #[test]
    fn test_patience_stop_restores_best_weights() {
        let config = TrainConfig::default().with_epochs(300).with_lr(0.05).with_patience(2, "val_loss");
        let (mut trainer, mut model, mut rng) = setup(config);
        let train = blobs(64, 1, false);
        // validation labels are inverted so learning makes val_loss worse
        let val = blobs(32, 2, true);
        let result = trainer.fit(&mut model, &train, Some(&val), &mut rng).unwrap();

        assert!(result.stopped_early);
        assert!(result.restored_best);
        let best = result.best_metric.unwrap();
        let best_in_history =
            result.history.iter().filter_map(|r| r.val_loss).fold(f64::INFINITY, f64::min);
        assert_eq!(best, best_in_history);

        let (val_loss, _) = model.evaluate(&val.x, &val.labels().unwrap()).unwrap();
        approx::assert_relative_eq!(f64::from(val_loss), best, epsilon = 1e-6);
    }

    struct CancelAfter {
        handle: StopHandle,
        epoch: usize,
    }

    impl TrainerCallback for CancelAfter {
        fn on_epoch_end(&mut self, ctx: &CallbackContext) -> CallbackAction {
            if ctx.epoch == self.epoch {
                self.handle.request_stop();
            }
            CallbackAction::Continue
        }
    }

    #[test]
    fn test_cancellation_completes_epoch_without_restore() {
        let (mut trainer, mut model, mut rng) = setup(TrainConfig::default().with_epochs(50));
        let handle = trainer.stop_handle();
        trainer.add_callback(CancelAfter { handle, epoch: 2 });
        let train = blobs(32, 1, false);
        let result = trainer.fit(&mut model, &train, Some(&blobs(16, 2, false)), &mut rng).unwrap();

        assert_eq!(result.epochs_run, 3);
        assert!(result.stopped_early);
        assert!(!result.restored_best);
        assert_eq!(result.stop_reason, Some(crate::train::StopReason::Cancelled));
    }

    #[test]
    fn test_callback_stop_is_cancellation() {
        struct StopNow;
        impl TrainerCallback for StopNow {
            fn on_step_end(&mut self, _ctx: &CallbackContext) -> CallbackAction {
                CallbackAction::Stop
            }
        }
        let (mut trainer, mut model, mut rng) = setup(TrainConfig::default().with_epochs(10));
        trainer.add_callback(StopNow);
        let result = trainer.fit(&mut model, &blobs(20, 1, false), None, &mut rng).unwrap();
        assert_eq!(result.epochs_run, 1);
    }

    #[test]
    fn test_missing_val_metric_runs_all_epochs() {
        let (mut trainer, mut model, mut rng) = setup(TrainConfig::default().with_epochs(4));
        let result = trainer.fit(&mut model, &blobs(20, 1, false), None, &mut rng).unwrap();
        assert_eq!(result.epochs_run, 4);
        assert!(!result.stopped_early);
        assert!(result.best_metric.is_none());
        assert!(result.history.iter().all(|r| r.val_loss.is_none()));
    }

    #[test]
    fn test_unlabeled_training_set_is_rejected() {
        let (mut trainer, mut model, mut rng) = setup(TrainConfig::default());
        let mut t = blobs(8, 1, false);
        t.y = None;
        assert!(matches!(trainer.fit(&mut model, &t, None, &mut rng), Err(Error::Precondition(_))));
    }

    #[test]
    fn test_feature_width_mismatch() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut model = Mlp::new(3, 4, &mut rng);
        let mut trainer = Trainer::new(TrainConfig::default());
        let t = blobs(8, 1, false);
        assert!(matches!(trainer.fit(&mut model, &t, None, &mut rng), Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn test_same_seed_same_history() {
        let run = || {
            let (mut trainer, mut model, mut rng) = setup(TrainConfig::default().with_epochs(3));
            trainer.fit(&mut model, &blobs(20, 1, false), None, &mut rng).unwrap().history
        };
        assert_eq!(run(), run());
    }
}
