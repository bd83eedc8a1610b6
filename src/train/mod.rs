//! Training: dense classifier, epoch loop and early stopping
//!
//! # Example
//!
//! ```no_run
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use rescate::train::{Mlp, TrainConfig, Trainer};
//! # fn demo(train: &rescate::preprocess::Tensors, val: &rescate::preprocess::Tensors) -> rescate::Result<()> {
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut model = Mlp::new(train.feat_len, 16, &mut rng);
//! let result = Trainer::new(TrainConfig::default()).fit(&mut model, train, Some(val), &mut rng)?;
//! println!("{} epochs, final loss {:.4}", result.epochs_run, result.final_loss);
//! # Ok(())
//! # }
//! ```

pub mod callback;
mod config;
mod model;
mod trainer;

pub use callback::{
    CallbackAction, CallbackContext, CallbackManager, EarlyStopping, ProgressCallback, StopDecision, StopHandle,
    StopReason, StopState, TrainerCallback,
};
pub use config::TrainConfig;
pub use model::{binary_accuracy, binary_cross_entropy, Mlp, StepOutput, Weights, PROB_EPSILON};
pub use trainer::{EpochRecord, TrainResult, Trainer};
