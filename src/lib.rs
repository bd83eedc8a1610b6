//! # Rescate
//!
//! Binary classification workbench for the Titanic survival data.
//!
//! - [`data`]: lenient CSV loading, shifted-row repair, stratified split
//! - [`preprocess`]: imputation, scaling and one-hot encoding fitted on training rows
//! - [`train`]: two-layer dense classifier, Adam and an epoch loop with early stopping
//! - [`eval`]: ROC points, trapezoidal AUC and confusion-matrix statistics
//! - [`io`]: model bundles and prediction files
//! - [`session`]: the staged pipeline, one immutable step at a time
//! - [`config`] and [`cli`]: YAML run configuration and the `rescate` binary
//!
//! # Example
//!
//! ```no_run
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use rescate::preprocess::FeatureConfig;
//! use rescate::session::Session;
//! use rescate::train::{TrainConfig, Trainer};
//! use std::path::Path;
//!
//! # fn main() -> rescate::Result<()> {
//! let mut rng = StdRng::seed_from_u64(42);
//! let session = Session::new()
//!     .load(Some(Path::new("train.csv")), Some(Path::new("test.csv")))?
//!     .preprocess(FeatureConfig::default(), 0.2, &mut rng)?
//!     .build_model(16, &mut rng)?;
//!
//! let mut trainer = Trainer::new(TrainConfig::default());
//! let (session, _result) = session.train(&mut trainer, &mut rng)?;
//! let (report, _roc) = session.evaluate(200)?;
//! println!("{report}");
//!
//! session.predict_test()?.export(Path::new("output"))?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod eval;
pub mod io;
pub mod optim;
pub mod preprocess;
pub mod session;
pub mod train;

pub use error::{Error, Result};
