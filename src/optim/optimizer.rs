//! Optimizer trait

use ndarray::{ArrayViewD, ArrayViewMutD};

/// Trait for optimization algorithms
///
/// Parameters and gradients are passed as parallel lists of tensors; the
/// list order must stay the same from step to step so per-parameter state
/// lines up.
pub trait Optimizer {
    /// Perform a single optimization step
    fn step(&mut self, params: &mut [ArrayViewMutD<'_, f32>], grads: &[ArrayViewD<'_, f32>]);

    /// Get learning rate
    fn lr(&self) -> f32;

    /// Set learning rate
    fn set_lr(&mut self, lr: f32);
}
