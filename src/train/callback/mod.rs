//! Callback system for training events
//!
//! Observers hook into `on_train_begin` / `on_train_end`, `on_epoch_end`
//! and `on_step_end`. The early-stop controller is not a callback: it
//! consumes the epoch-record stream and answers with a [`StopDecision`].
//!
//! # Example
//!
//! ```rust
//! use rescate::train::callback::{CallbackAction, CallbackContext, TrainerCallback};
//!
//! struct PrintCallback;
//!
//! impl TrainerCallback for PrintCallback {
//!     fn on_epoch_end(&mut self, ctx: &CallbackContext) -> CallbackAction {
//!         println!("Epoch {} finished with loss {:.4}", ctx.epoch, ctx.loss);
//!         CallbackAction::Continue
//!     }
//! }
//! ```

mod early_stopping;
mod manager;
mod progress;
mod traits;

pub use early_stopping::{EarlyStopping, StopDecision, StopHandle, StopReason, StopState, MIN_DELTA};
pub use manager::CallbackManager;
pub use progress::ProgressCallback;
pub use traits::{CallbackAction, CallbackContext, TrainerCallback};
