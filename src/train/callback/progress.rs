//! Progress callback for logging training progress

use super::traits::{CallbackAction, CallbackContext, TrainerCallback};
use std::sync::mpsc::Sender;

/// Renders one `epoch N: loss=… val_loss=… acc=…` line per epoch.
///
/// Lines go to the tracing log and, when attached, to a channel so a
/// caller can show them as they arrive.
#[derive(Clone, Debug, Default)]
pub struct ProgressCallback {
    sink: Option<Sender<String>>,
}

impl ProgressCallback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also send every rendered line to `sink`.
    pub fn with_sink(sink: Sender<String>) -> Self {
        Self { sink: Some(sink) }
    }
}

impl TrainerCallback for ProgressCallback {
    fn on_epoch_end(&mut self, ctx: &CallbackContext) -> CallbackAction {
        let Some(record) = &ctx.record else {
            return CallbackAction::Continue;
        };
        let line = record.log_line();
        tracing::info!(epoch = record.epoch + 1, elapsed_secs = ctx.elapsed_secs, "{line}");
        if let Some(sink) = &self.sink {
            // receiver gone means nobody is listening any more
            let _ = sink.send(line);
        }
        CallbackAction::Continue
    }

    fn name(&self) -> &'static str {
        "ProgressCallback"
    }
}
