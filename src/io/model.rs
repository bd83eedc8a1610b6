//! Model bundle structure for serialization
//!
//! A bundle holds everything needed to score new passengers: the network
//! topology, its named weight tensors and the fitted preprocessor.

use crate::data::Row;
use crate::preprocess::{tensorize, Preprocessor};
use crate::train::{Mlp, Weights};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Bundle metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub name: String,
    /// Crate version that wrote the bundle
    pub version: String,
    /// Decision threshold in use when the bundle was saved
    pub threshold: f32,
    /// Validation AUC at save time, if known
    #[serde(default)]
    pub val_auc: Option<f64>,
    /// Free-form fields (training settings, epochs run, ...)
    #[serde(default)]
    pub custom: HashMap<String, serde_json::Value>,
}

impl ModelMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            threshold: 0.5,
            val_auc: None,
            custom: HashMap::new(),
        }
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_val_auc(mut self, auc: f64) -> Self {
        self.val_auc = Some(auc);
        self
    }

    pub fn with_custom(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.custom.insert(key.into(), value);
        self
    }
}

/// Layer layout of the dense network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    pub input_dim: usize,
    pub hidden_units: usize,
    pub hidden_activation: String,
    pub output_activation: String,
}

impl Topology {
    fn of(model: &Mlp) -> Self {
        Self {
            input_dim: model.input_dim(),
            hidden_units: model.hidden_units(),
            hidden_activation: "relu".to_string(),
            output_activation: "sigmoid".to_string(),
        }
    }
}

/// One named weight tensor, row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensorState {
    pub name: String,
    pub shape: Vec<usize>,
    pub data: Vec<f32>,
}

/// Serializable model state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelBundle {
    pub metadata: ModelMetadata,
    pub topology: Topology,
    pub tensors: Vec<TensorState>,
    pub preprocessor: Preprocessor,
}

impl ModelBundle {
    pub fn new(metadata: ModelMetadata, model: &Mlp, preprocessor: &Preprocessor) -> Self {
        let tensors = model
            .weights()
            .to_named()
            .into_iter()
            .map(|(name, shape, data)| TensorState { name, shape, data })
            .collect();
        Self { metadata, topology: Topology::of(model), tensors, preprocessor: preprocessor.clone() }
    }

    /// Rebuild the network and check it agrees with the topology and the
    /// preprocessor's feature length.
    pub fn to_model(&self) -> Result<Mlp> {
        let named: Vec<(String, Vec<usize>, Vec<f32>)> =
            self.tensors.iter().map(|t| (t.name.clone(), t.shape.clone(), t.data.clone())).collect();
        let model = Mlp::from_weights(Weights::from_named(&named)?);

        let t = &self.topology;
        if model.input_dim() != t.input_dim || model.hidden_units() != t.hidden_units {
            return Err(Error::ShapeMismatch {
                expected: vec![t.input_dim, t.hidden_units],
                actual: vec![model.input_dim(), model.hidden_units()],
            });
        }
        if t.hidden_activation != "relu" || t.output_activation != "sigmoid" {
            return Err(Error::Serialization(format!(
                "unsupported activations {}/{}",
                t.hidden_activation, t.output_activation
            )));
        }
        if self.preprocessor.feat_len != t.input_dim {
            return Err(Error::ShapeMismatch {
                expected: vec![t.input_dim],
                actual: vec![self.preprocessor.feat_len],
            });
        }
        Ok(model)
    }

    /// Probabilities for `rows`, plus their labels when the rows carry a
    /// `Survived` column. Every row must map to a finite feature vector so
    /// the output stays aligned with the input.
    pub fn score(&self, rows: &[Row]) -> Result<(Vec<f32>, Option<Vec<f32>>)> {
        let model = self.to_model()?;
        let t = tensorize(rows, &self.preprocessor)?;
        if t.n_rows() != rows.len() {
            return Err(Error::ShapeMismatch { expected: vec![rows.len()], actual: vec![t.n_rows()] });
        }
        Ok((model.predict_proba(&t.x)?, t.labels()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::{col, Row};
    use crate::preprocess::FeatureConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    pub(crate) fn bundle() -> ModelBundle {
        let rows = vec![Row::new().with(col::SEX, "male").with(col::AGE, 30), Row::new().with(col::SEX, "female")];
        let pre = Preprocessor::fit(&rows, FeatureConfig::default());
        let model = Mlp::new(pre.feat_len, 4, &mut StdRng::seed_from_u64(3));
        ModelBundle::new(ModelMetadata::new("titanic").with_threshold(0.4), &model, &pre)
    }

    #[test]
    fn test_bundle_round_trip_model() {
        let b = bundle();
        assert_eq!(b.topology.input_dim, 13);
        assert_eq!(b.tensors.len(), 4);
        let m = b.to_model().unwrap();
        assert_eq!(m.hidden_units(), 4);
        assert_eq!(m.weights().to_named()[0].2, b.tensors[0].data);
    }

    #[test]
    fn test_topology_mismatch_rejected() {
        let mut b = bundle();
        b.topology.hidden_units = 8;
        assert!(matches!(b.to_model(), Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn test_feature_length_mismatch_rejected() {
        let mut b = bundle();
        b.preprocessor.feat_len = 11;
        assert!(matches!(b.to_model(), Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn test_unknown_activation_rejected() {
        let mut b = bundle();
        b.topology.hidden_activation = "tanh".to_string();
        assert!(matches!(b.to_model(), Err(Error::Serialization(_))));
    }

    #[test]
    fn test_score_rows() {
        let b = bundle();
        let rows = vec![
            Row::new().with(col::SEX, "female").with(col::SURVIVED, 1),
            Row::new().with(col::SEX, "male").with(col::SURVIVED, 0),
        ];
        let (probs, labels) = b.score(&rows).unwrap();
        assert_eq!(probs.len(), 2);
        assert!(probs.iter().all(|p| (0.0..=1.0).contains(p)));
        assert_eq!(labels, Some(vec![1.0, 0.0]));

        let (_, labels) = b.score(&[Row::new().with(col::SEX, "male")]).unwrap();
        assert_eq!(labels, None);
        assert!(matches!(b.score(&[]), Err(Error::EmptyInput(_))));
    }

    #[test]
    fn test_metadata_builder() {
        let m = ModelMetadata::new("m").with_val_auc(0.8).with_custom("epochs", serde_json::json!(12));
        assert_eq!(m.val_auc, Some(0.8));
        assert_eq!(m.custom["epochs"], 12);
        assert_eq!(m.threshold, 0.5);
    }
}
