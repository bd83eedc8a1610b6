//! Training configuration

/// Hyperparameters for [`Trainer`](super::Trainer)
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    /// Maximum number of epochs
    pub epochs: usize,
    /// Rows per mini-batch; the last batch may be smaller
    pub batch_size: usize,
    /// Adam learning rate
    pub lr: f32,
    /// Epochs without improvement before stopping
    pub patience: usize,
    /// Metric watched by early stopping
    pub monitor: String,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self { epochs: 40, batch_size: 16, lr: 0.001, patience: 5, monitor: "val_loss".to_string() }
    }
}

impl TrainConfig {
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_lr(mut self, lr: f32) -> Self {
        self.lr = lr;
        self
    }

    pub fn with_patience(mut self, patience: usize, monitor: impl Into<String>) -> Self {
        self.patience = patience;
        self.monitor = monitor.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = TrainConfig::default();
        assert_eq!(c.epochs, 40);
        assert_eq!(c.batch_size, 16);
        assert_eq!(c.lr, 0.001);
        assert_eq!(c.patience, 5);
        assert_eq!(c.monitor, "val_loss");
    }

    #[test]
    fn test_builders() {
        let c = TrainConfig::default().with_epochs(3).with_batch_size(8).with_lr(0.01).with_patience(2, "loss");
        assert_eq!((c.epochs, c.batch_size, c.patience), (3, 8, 2));
        assert_eq!(c.monitor, "loss");
    }
}
