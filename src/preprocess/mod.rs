//! Feature engineering: imputation, scaling, one-hot encoding, tensorization

mod preprocessor;
pub mod stats;
mod tensorize;

pub use preprocessor::{FeatureConfig, Preprocessor, DEFAULT_AGE, DEFAULT_PORT, UNKNOWN_PORT};
pub use tensorize::{tensorize, Tensors};
