//! YAML schema for a workbench run

use crate::io::ModelFormat;
use crate::preprocess::FeatureConfig;
use crate::train::TrainConfig;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// Deserialize a bool from either a YAML boolean (`true`) or a quoted string (`"true"`).
fn deserialize_bool_lenient<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Str(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::Str(s) => match s.to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(serde::de::Error::custom(format!("expected 'true' or 'false', got '{other}'"))),
        },
    }
}

/// Complete workbench specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkbenchSpec {
    /// Input files
    pub data: DataConfig,

    #[serde(default)]
    pub split: SplitConfig,

    #[serde(default)]
    pub features: FeatureSpec,

    #[serde(default)]
    pub training: TrainingParams,

    #[serde(default)]
    pub eval: EvalConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl WorkbenchSpec {
    /// Spec with every section at its default.
    pub fn new(train: impl Into<PathBuf>) -> Self {
        Self {
            data: DataConfig { train: train.into(), test: None },
            split: SplitConfig::default(),
            features: FeatureSpec::default(),
            training: TrainingParams::default(),
            eval: EvalConfig::default(),
            output: OutputConfig::default(),
        }
    }

    pub fn feature_config(&self) -> FeatureConfig {
        FeatureConfig { family_size: self.features.family_size, is_alone: self.features.is_alone }
    }

    pub fn train_config(&self) -> TrainConfig {
        let t = &self.training;
        TrainConfig::default()
            .with_epochs(t.epochs)
            .with_batch_size(t.batch_size)
            .with_lr(t.lr)
            .with_patience(t.patience, t.monitor.clone())
    }
}

/// Data configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// Labeled training CSV
    pub train: PathBuf,

    /// Unlabeled test CSV scored after training
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<PathBuf>,
}

/// Train/validation split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    #[serde(default = "default_val_ratio")]
    pub val_ratio: f64,

    /// Seed for splitting, shuffling and weight init; random when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self { val_ratio: default_val_ratio(), seed: None }
    }
}

fn default_val_ratio() -> f64 {
    0.2
}

/// Engineered feature switches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSpec {
    #[serde(default = "default_true", deserialize_with = "deserialize_bool_lenient")]
    pub family_size: bool,

    #[serde(default = "default_true", deserialize_with = "deserialize_bool_lenient")]
    pub is_alone: bool,
}

impl Default for FeatureSpec {
    fn default() -> Self {
        Self { family_size: true, is_alone: true }
    }
}

fn default_true() -> bool {
    true
}

/// Training parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingParams {
    #[serde(default = "default_epochs")]
    pub epochs: usize,

    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(default = "default_lr")]
    pub lr: f32,

    #[serde(default = "default_hidden_units")]
    pub hidden_units: usize,

    /// Epochs without improvement before stopping
    #[serde(default = "default_patience")]
    pub patience: usize,

    /// Epoch metric watched by early stopping
    #[serde(default = "default_monitor")]
    pub monitor: String,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            epochs: default_epochs(),
            batch_size: default_batch_size(),
            lr: default_lr(),
            hidden_units: default_hidden_units(),
            patience: default_patience(),
            monitor: default_monitor(),
        }
    }
}

fn default_epochs() -> usize {
    40
}

fn default_batch_size() -> usize {
    16
}

fn default_lr() -> f32 {
    0.001
}

fn default_hidden_units() -> usize {
    16
}

fn default_patience() -> usize {
    5
}

fn default_monitor() -> String {
    "val_loss".to_string()
}

/// Metrics settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Thresholds sampled for the ROC curve
    #[serde(default = "default_roc_steps")]
    pub roc_steps: usize,

    /// Decision threshold for reports and submission labels
    #[serde(default = "default_threshold")]
    pub threshold: f32,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self { roc_steps: default_roc_steps(), threshold: default_threshold() }
    }
}

fn default_roc_steps() -> usize {
    200
}

fn default_threshold() -> f32 {
    0.5
}

/// Output location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    #[serde(default)]
    pub model_format: ModelFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dir: default_output_dir(), model_format: ModelFormat::default() }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./output")
}
