//! Trainer abstraction for the training loop
//!
//! - Shuffled mini-batch epochs
//! - Per-epoch validation and [`EpochRecord`]s
//! - Early stopping with best-weight restore and external cancellation

mod core;
mod epoch;
mod result;

pub use core::Trainer;
pub use epoch::EpochRecord;
pub use result::TrainResult;
