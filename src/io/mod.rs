//! Persistence: model bundles and prediction files
//!
//! # Example
//!
//! ```no_run
//! use rescate::io::{load_bundle, write_predictions};
//! # fn demo(test_rows: &[rescate::data::Row], x: &ndarray::Array2<f32>) -> rescate::Result<()> {
//! let bundle = load_bundle("output/model.json")?;
//! let model = bundle.to_model()?;
//! let probs = model.predict_proba(x)?;
//! write_predictions("output", test_rows, &probs, bundle.metadata.threshold)?;
//! # Ok(())
//! # }
//! ```

mod format;
mod load;
mod model;
mod predictions;
mod save;

pub use format::{ModelFormat, SaveConfig};
pub use load::load_bundle;
pub use model::{ModelBundle, ModelMetadata, TensorState, Topology};
pub use predictions::{
    write_predictions, write_probabilities, write_submission, PredictionFiles, PROBABILITIES_FILE, SUBMISSION_FILE,
};
pub use save::save_bundle;
