//! Adam optimizer

use super::Optimizer;
use ndarray::{ArrayD, ArrayViewD, ArrayViewMutD, Zip};

/// Adam with bias correction folded into the step size:
///
/// lr_t = lr * √(1 - β2^t) / (1 - β1^t)
/// θ_t = θ_{t-1} - lr_t * m_t / (√v_t + ε)
#[derive(Debug, Clone)]
pub struct Adam {
    lr: f32,
    beta1: f32,
    beta2: f32,
    epsilon: f32,
    t: u64,
    m: Vec<ArrayD<f32>>, // First moment
    v: Vec<ArrayD<f32>>, // Second moment
}

impl Adam {
    pub fn new(lr: f32, beta1: f32, beta2: f32, epsilon: f32) -> Self {
        Self { lr, beta1, beta2, epsilon, t: 0, m: Vec::new(), v: Vec::new() }
    }

    /// β1 = 0.9, β2 = 0.999, ε = 1e-7
    pub fn default_params(lr: f32) -> Self {
        Self::new(lr, 0.9, 0.999, 1e-7)
    }

    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.t
    }

    fn ensure_moments(&mut self, params: &[ArrayViewMutD<'_, f32>]) {
        let stale = self.m.len() != params.len() || self.m.iter().zip(params).any(|(m, p)| m.shape() != p.shape());
        if stale {
            self.m = params.iter().map(|p| ArrayD::zeros(p.raw_dim())).collect();
            self.v = params.iter().map(|p| ArrayD::zeros(p.raw_dim())).collect();
        }
    }
}

impl Optimizer for Adam {
    fn step(&mut self, params: &mut [ArrayViewMutD<'_, f32>], grads: &[ArrayViewD<'_, f32>]) {
        self.ensure_moments(params);
        self.t += 1;

        let t = self.t.min(i32::MAX as u64) as i32;
        let lr_t = self.lr * ((1.0 - self.beta2.powi(t)).sqrt() / (1.0 - self.beta1.powi(t)));
        let (b1, b2, eps) = (self.beta1, self.beta2, self.epsilon);

        for (((param, grad), m), v) in params.iter_mut().zip(grads).zip(&mut self.m).zip(&mut self.v) {
            Zip::from(param).and(grad).and(m).and(v).for_each(|p, &g, m, v| {
                *m = b1 * *m + (1.0 - b1) * g;
                *v = b2 * *v + (1.0 - b2) * g * g;
                *p -= lr_t * *m / (v.sqrt() + eps);
            });
        }
    }

    fn lr(&self) -> f32 {
        self.lr
    }

    fn set_lr(&mut self, lr: f32) {
        self.lr = lr;
    }
}
