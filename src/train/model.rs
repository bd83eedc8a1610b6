//! Two-layer dense binary classifier
//!
//! `input → Dense(hidden, relu) → Dense(1, sigmoid)`, trained with binary
//! cross-entropy. Forward and backward passes are written out by hand on
//! `ndarray` matrices.

use crate::{Error, Result};
use ndarray::{Array1, Array2, ArrayViewD, ArrayViewMutD, Axis};
use rand::Rng;

/// Probability clamp used by the loss.
pub const PROB_EPSILON: f32 = 1e-7;

/// Trainable parameters. Kernels are `fan_in × fan_out`.
#[derive(Debug, Clone, PartialEq)]
pub struct Weights {
    pub w1: Array2<f32>,
    pub b1: Array1<f32>,
    pub w2: Array2<f32>,
    pub b2: Array1<f32>,
}

impl Weights {
    /// Tensor names, in the order of [`Weights::views`].
    pub const NAMES: [&'static str; 4] = ["dense_1/kernel", "dense_1/bias", "dense_2/kernel", "dense_2/bias"];

    fn zeros(input_dim: usize, hidden: usize) -> Self {
        Self {
            w1: Array2::zeros((input_dim, hidden)),
            b1: Array1::zeros(hidden),
            w2: Array2::zeros((hidden, 1)),
            b2: Array1::zeros(1),
        }
    }

    pub fn views(&self) -> Vec<ArrayViewD<'_, f32>> {
        vec![self.w1.view().into_dyn(), self.b1.view().into_dyn(), self.w2.view().into_dyn(), self.b2.view().into_dyn()]
    }

    pub fn views_mut(&mut self) -> Vec<ArrayViewMutD<'_, f32>> {
        vec![
            self.w1.view_mut().into_dyn(),
            self.b1.view_mut().into_dyn(),
            self.w2.view_mut().into_dyn(),
            self.b2.view_mut().into_dyn(),
        ]
    }

    pub fn shapes(&self) -> Vec<Vec<usize>> {
        self.views().iter().map(|v| v.shape().to_vec()).collect()
    }

    pub fn param_count(&self) -> usize {
        self.views().iter().map(|v| v.len()).sum()
    }

    /// Named `(shape, data)` tensors in row-major order.
    pub fn to_named(&self) -> Vec<(String, Vec<usize>, Vec<f32>)> {
        Self::NAMES
            .iter()
            .zip(self.views())
            .map(|(name, v)| (name.to_string(), v.shape().to_vec(), v.iter().copied().collect()))
            .collect()
    }

    /// Rebuild from named tensors; every name must be present with a
    /// shape consistent with the others.
    pub fn from_named(tensors: &[(String, Vec<usize>, Vec<f32>)]) -> Result<Self> {
        let find = |name: &str| {
            tensors
                .iter()
                .find(|(n, _, _)| n == name)
                .ok_or_else(|| Error::Serialization(format!("missing weight tensor '{name}'")))
        };
        let matrix = |name: &str| -> Result<Array2<f32>> {
            let (_, shape, data) = find(name)?;
            let mismatch = || Error::ShapeMismatch { expected: shape.clone(), actual: vec![data.len()] };
            match shape.as_slice() {
                [r, c] => Array2::from_shape_vec((*r, *c), data.clone()).map_err(|_| mismatch()),
                _ => Err(mismatch()),
            }
        };
        let vector = |name: &str| -> Result<Array1<f32>> {
            let (_, shape, data) = find(name)?;
            if shape.as_slice() != [data.len()] {
                return Err(Error::ShapeMismatch { expected: shape.clone(), actual: vec![data.len()] });
            }
            Ok(Array1::from_vec(data.clone()))
        };

        let w = Self {
            w1: matrix(Self::NAMES[0])?,
            b1: vector(Self::NAMES[1])?,
            w2: matrix(Self::NAMES[2])?,
            b2: vector(Self::NAMES[3])?,
        };
        let hidden = w.w1.ncols();
        let expected = Self::zeros(w.w1.nrows(), hidden).shapes();
        if w.shapes() != expected {
            return Err(Error::ShapeMismatch { expected: expected.concat(), actual: w.shapes().concat() });
        }
        Ok(w)
    }
}

/// Forward pass intermediates.
struct Forward {
    z1: Array2<f32>,
    a1: Array2<f32>,
    probs: Array1<f32>,
}

/// Loss, predictions and gradients for one batch.
#[derive(Debug, Clone)]
pub struct StepOutput {
    pub loss: f32,
    pub probs: Array1<f32>,
    pub grads: Weights,
}

/// Dense ReLU/sigmoid network.
#[derive(Debug, Clone, PartialEq)]
pub struct Mlp {
    input_dim: usize,
    hidden_units: usize,
    weights: Weights,
}

fn sigmoid(z: f32) -> f32 {
    1.0 / (1.0 + (-z).exp())
}

fn glorot_uniform<R: Rng + ?Sized>(rng: &mut R, fan_in: usize, fan_out: usize) -> Array2<f32> {
    let limit = (6.0 / (fan_in + fan_out) as f32).sqrt();
    Array2::from_shape_fn((fan_in, fan_out), |_| rng.random_range(-limit..=limit))
}

/// Mean binary cross-entropy with probabilities clamped to
/// `[PROB_EPSILON, 1 - PROB_EPSILON]`. Empty input gives 0.
pub fn binary_cross_entropy(probs: &[f32], labels: &[f32]) -> f32 {
    if probs.is_empty() {
        return 0.0;
    }
    let total: f32 = probs
        .iter()
        .zip(labels)
        .map(|(&p, &y)| {
            let p = p.clamp(PROB_EPSILON, 1.0 - PROB_EPSILON);
            -(y * p.ln() + (1.0 - y) * (1.0 - p).ln())
        })
        .sum();
    total / probs.len() as f32
}

/// Share of predictions on the right side of 0.5.
pub fn binary_accuracy(probs: &[f32], labels: &[f32]) -> f32 {
    if probs.is_empty() {
        return 0.0;
    }
    let hits = probs.iter().zip(labels).filter(|&(&p, &y)| (p > 0.5) == (y > 0.5)).count();
    hits as f32 / probs.len() as f32
}

impl Mlp {
    /// Glorot-uniform kernels and zero biases.
    pub fn new<R: Rng + ?Sized>(input_dim: usize, hidden_units: usize, rng: &mut R) -> Self {
        let weights = Weights {
            w1: glorot_uniform(rng, input_dim, hidden_units),
            b1: Array1::zeros(hidden_units),
            w2: glorot_uniform(rng, hidden_units, 1),
            b2: Array1::zeros(1),
        };
        tracing::debug!(input_dim, hidden_units, params = weights.param_count(), "built model");
        Self { input_dim, hidden_units, weights }
    }

    /// Wrap existing weights, e.g. from a saved bundle.
    pub fn from_weights(weights: Weights) -> Self {
        Self { input_dim: weights.w1.nrows(), hidden_units: weights.w1.ncols(), weights }
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    pub fn hidden_units(&self) -> usize {
        self.hidden_units
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn weights_mut(&mut self) -> &mut Weights {
        &mut self.weights
    }

    /// Replace the weights. Shapes must match the current topology.
    pub fn set_weights(&mut self, weights: Weights) -> Result<()> {
        if weights.shapes() != self.weights.shapes() {
            return Err(Error::ShapeMismatch {
                expected: self.weights.shapes().concat(),
                actual: weights.shapes().concat(),
            });
        }
        self.weights = weights;
        Ok(())
    }

    fn check_input(&self, x: &Array2<f32>) -> Result<()> {
        if x.ncols() != self.input_dim {
            return Err(Error::ShapeMismatch { expected: vec![x.nrows(), self.input_dim], actual: x.shape().to_vec() });
        }
        Ok(())
    }

    fn forward(&self, x: &Array2<f32>) -> Forward {
        let w = &self.weights;
        let z1 = x.dot(&w.w1) + &w.b1;
        let a1 = z1.mapv(|v| v.max(0.0));
        let z2 = a1.dot(&w.w2) + &w.b2;
        let probs = z2.column(0).mapv(sigmoid);
        Forward { z1, a1, probs }
    }

    /// Survival probability per row of `x`.
    pub fn predict_proba(&self, x: &Array2<f32>) -> Result<Vec<f32>> {
        self.check_input(x)?;
        Ok(self.forward(x).probs.to_vec())
    }

    /// Loss and gradients of the mean batch loss.
    pub fn loss_and_grads(&self, x: &Array2<f32>, y: &Array1<f32>) -> Result<StepOutput> {
        self.check_input(x)?;
        if y.len() != x.nrows() {
            return Err(Error::ShapeMismatch { expected: vec![x.nrows()], actual: vec![y.len()] });
        }
        let n = x.nrows().max(1) as f32;
        let fwd = self.forward(x);

        let loss = binary_cross_entropy(&fwd.probs.to_vec(), &y.to_vec());

        // d(loss)/d(z2) for sigmoid + cross-entropy
        let dz2 = ((&fwd.probs - y) / n).insert_axis(Axis(1));
        let grad_w2 = fwd.a1.t().dot(&dz2);
        let grad_b2 = dz2.sum_axis(Axis(0));
        let da1 = dz2.dot(&self.weights.w2.t());
        let dz1 = da1 * fwd.z1.mapv(|v| if v > 0.0 { 1.0 } else { 0.0 });
        let grad_w1 = x.t().dot(&dz1);
        let grad_b1 = dz1.sum_axis(Axis(0));

        Ok(StepOutput {
            loss,
            probs: fwd.probs,
            grads: Weights { w1: grad_w1, b1: grad_b1, w2: grad_w2, b2: grad_b2 },
        })
    }

    /// Mean loss and accuracy on a labeled set.
    pub fn evaluate(&self, x: &Array2<f32>, y: &[f32]) -> Result<(f32, f32)> {
        let probs = self.predict_proba(x)?;
        if probs.len() != y.len() {
            return Err(Error::ShapeMismatch { expected: vec![probs.len()], actual: vec![y.len()] });
        }
        Ok((binary_cross_entropy(&probs, y), binary_accuracy(&probs, y)))
    }

    /// Layer table in the usual `Layer | Output Shape | Param #` layout.
    pub fn summary(&self) -> Vec<String> {
        let h = self.hidden_units;
        let dense1 = self.input_dim * h + h;
        let dense2 = h + 1;
        vec![
            format!("{:<24}{:<20}{}", "Layer (type)", "Output shape", "Param #"),
            format!("{:<24}{:<20}{}", "dense_1 (Dense, relu)", format!("[null,{h}]"), dense1),
            format!("{:<24}{:<20}{}", "dense_2 (Dense, sigmoid)", "[null,1]", dense2),
            format!("Total params: {}", dense1 + dense2),
        ]
    }
}
