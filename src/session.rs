//! Workbench session
//!
//! A [`Session`] carries everything computed so far: raw rows, the fitted
//! preprocessor, tensors, model and probabilities. Every stage takes the
//! current session by reference and returns a new one, so a failing stage
//! leaves the caller's session exactly as it was.

use crate::data::{missing_pct, read_csv, repair_all, stratified_split, Row};
use crate::eval::{RocCurve, ThresholdReport};
use crate::io::{write_predictions, ModelBundle, ModelMetadata, PredictionFiles};
use crate::preprocess::{tensorize, FeatureConfig, Preprocessor, Tensors};
use crate::train::{EpochRecord, Mlp, TrainResult, Trainer};
use crate::{Error, Result};
use rand::Rng;
use std::path::Path;

/// Default decision threshold
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Counts shown after loading.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSummary {
    pub train_rows: usize,
    pub test_rows: usize,
    /// Rough share of null cells in the training rows, in percent
    pub missing_pct: f64,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub raw_train: Vec<Row>,
    pub raw_test: Vec<Row>,
    pub pre: Option<Preprocessor>,
    pub train_tensors: Option<Tensors>,
    pub val_tensors: Option<Tensors>,
    pub model: Option<Mlp>,
    pub history: Vec<EpochRecord>,
    pub val_probs: Option<Vec<f32>>,
    pub test_probs: Option<Vec<f32>>,
    pub threshold: f32,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            raw_train: Vec::new(),
            raw_test: Vec::new(),
            pre: None,
            train_tensors: None,
            val_tensors: None,
            model: None,
            history: Vec::new(),
            val_probs: None,
            test_probs: None,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

fn require<'a, T>(value: &'a Option<T>, message: &str) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| Error::Precondition(message.to_string()))
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read, normalize and repair the training file and the optional test
    /// file. Everything downstream of the raw rows is reset.
    pub fn load(&self, train: Option<&Path>, test: Option<&Path>) -> Result<Self> {
        let train = train.ok_or_else(|| Error::InputMissing("train.csv".to_string()))?;
        let train_rows = read_csv(train)?.rows;
        let test_rows = match test {
            Some(p) => read_csv(p)?.rows,
            None => Vec::new(),
        };
        Ok(self.load_rows(train_rows, test_rows))
    }

    /// Same as [`Session::load`] for rows already in memory.
    pub fn load_rows(&self, train: Vec<Row>, test: Vec<Row>) -> Self {
        let raw_train = repair_all(&train);
        let raw_test = repair_all(&test);
        tracing::info!(train = raw_train.len(), test = raw_test.len(), "loaded rows");
        Self { raw_train, raw_test, threshold: self.threshold, ..Self::default() }
    }

    pub fn data_summary(&self) -> DataSummary {
        DataSummary {
            train_rows: self.raw_train.len(),
            test_rows: self.raw_test.len(),
            missing_pct: missing_pct(&self.raw_train),
        }
    }

    /// Fit the preprocessor on all training rows, split them and tensorize
    /// both halves.
    pub fn preprocess<R: Rng + ?Sized>(&self, features: FeatureConfig, val_ratio: f64, rng: &mut R) -> Result<Self> {
        if self.raw_train.is_empty() {
            return Err(Error::Precondition("Load train.csv first".to_string()));
        }
        let pre = Preprocessor::fit(&self.raw_train, features);
        let split = stratified_split(&self.raw_train, val_ratio, rng);
        let train = tensorize(&split.train, &pre)?;
        let val = tensorize(&split.val, &pre)?;
        if train.y.is_none() || val.y.is_none() {
            return Err(Error::Precondition("training rows carry no Survived column".to_string()));
        }
        tracing::info!(train = train.n_rows(), val = val.n_rows(), feat_len = pre.feat_len, "preprocessed");

        Ok(Self {
            pre: Some(pre),
            train_tensors: Some(train),
            val_tensors: Some(val),
            model: None,
            history: Vec::new(),
            val_probs: None,
            test_probs: None,
            ..self.clone()
        })
    }

    /// Preprocessing panel text.
    pub fn preprocess_summary(&self) -> Result<Vec<String>> {
        let pre = require(&self.pre, "Run preprocessing first")?;
        let train = require(&self.train_tensors, "Run preprocessing first")?;
        let val = require(&self.val_tensors, "Run preprocessing first")?;
        let mut lines = pre.summary();
        lines.insert(
            1,
            format!("Train: [{}, {}] | Val: [{}, {}]", train.n_rows(), train.feat_len, val.n_rows(), val.feat_len),
        );
        Ok(lines)
    }

    /// Fresh network sized to the feature vector.
    pub fn build_model<R: Rng + ?Sized>(&self, hidden_units: usize, rng: &mut R) -> Result<Self> {
        let train = require(&self.train_tensors, "Run preprocessing first")?;
        let model = Mlp::new(train.feat_len, hidden_units, rng);
        Ok(Self { model: Some(model), history: Vec::new(), val_probs: None, test_probs: None, ..self.clone() })
    }

    pub fn model_summary(&self) -> Result<Vec<String>> {
        Ok(require(&self.model, "Build the model first")?.summary())
    }

    /// Train the built model and score the validation set.
    pub fn train<R: Rng + ?Sized>(&self, trainer: &mut Trainer, rng: &mut R) -> Result<(Self, TrainResult)> {
        let mut model = require(&self.model, "Build the model first")?.clone();
        let train = require(&self.train_tensors, "Run preprocessing first")?;
        let val = require(&self.val_tensors, "Run preprocessing first")?;

        let result = trainer.fit(&mut model, train, Some(val), rng)?;
        let val_probs = model.predict_proba(&val.x)?;

        let next = Self {
            model: Some(model),
            history: result.history.clone(),
            val_probs: Some(val_probs),
            test_probs: None,
            ..self.clone()
        };
        Ok((next, result))
    }

    fn val_labels(&self) -> Result<(Vec<f32>, &[f32])> {
        let probs = require(&self.val_probs, "Train the model first")?;
        let labels = require(&self.val_tensors, "Run preprocessing first")?
            .labels()
            .ok_or_else(|| Error::Precondition("validation rows carry no labels".to_string()))?;
        Ok((labels, probs.as_slice()))
    }

    /// AUC and threshold report on the validation set.
    pub fn evaluate(&self, roc_steps: usize) -> Result<(ThresholdReport, RocCurve)> {
        let (labels, probs) = self.val_labels()?;
        Ok(ThresholdReport::with_roc(&labels, probs, self.threshold, roc_steps))
    }

    /// Threshold report without recomputing the curve.
    pub fn threshold_report(&self) -> Result<ThresholdReport> {
        let (labels, probs) = self.val_labels()?;
        Ok(ThresholdReport::new(&labels, probs, self.threshold))
    }

    /// Move the decision threshold, clamped to `[0, 1]`.
    pub fn with_threshold(&self, threshold: f32) -> Self {
        let threshold = if threshold.is_nan() { DEFAULT_THRESHOLD } else { threshold.clamp(0.0, 1.0) };
        Self { threshold, ..self.clone() }
    }

    /// Score the test rows.
    pub fn predict_test(&self) -> Result<Self> {
        let model = require(&self.model, "Train the model first")?;
        let pre = require(&self.pre, "Run preprocessing first")?;
        if self.val_probs.is_none() {
            return Err(Error::Precondition("Train the model first".to_string()));
        }
        if self.raw_test.is_empty() {
            return Err(Error::InputMissing("test.csv".to_string()));
        }
        let test = tensorize(&self.raw_test, pre)?;
        if test.n_rows() != self.raw_test.len() {
            return Err(Error::ShapeMismatch { expected: vec![self.raw_test.len()], actual: vec![test.n_rows()] });
        }
        let probs = model.predict_proba(&test.x)?;
        tracing::info!(rows = probs.len(), "scored test rows");
        Ok(Self { test_probs: Some(probs), ..self.clone() })
    }

    /// Write the submission and probability files at the current threshold.
    pub fn export(&self, dir: &Path) -> Result<Option<PredictionFiles>> {
        let probs = require(&self.test_probs, "Predict the test set first")?;
        write_predictions(dir, &self.raw_test, probs, self.threshold)
    }

    /// Bundle of the trained model and preprocessor. The stored validation
    /// AUC uses the same `roc_steps` as [`Session::evaluate`].
    pub fn bundle(&self, name: &str, roc_steps: usize) -> Result<ModelBundle> {
        let model = require(&self.model, "Train the model first")?;
        let pre = require(&self.pre, "Run preprocessing first")?;
        let mut metadata = ModelMetadata::new(name).with_threshold(self.threshold);
        if let Ok((report, _)) = self.evaluate(roc_steps) {
            metadata = metadata.with_val_auc(report.auc.unwrap_or_default());
        }
        if !self.history.is_empty() {
            metadata = metadata.with_custom("epochs_run", serde_json::json!(self.history.len()));
        }
        Ok(ModelBundle::new(metadata, model, pre))
    }
}
