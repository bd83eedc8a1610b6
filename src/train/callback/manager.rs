//! Callback manager for dispatching events to multiple callbacks

use super::traits::{CallbackAction, CallbackContext, TrainerCallback};

/// Manages multiple callbacks and dispatches events
#[derive(Default)]
pub struct CallbackManager {
    callbacks: Vec<Box<dyn TrainerCallback>>,
}

impl CallbackManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<C: TrainerCallback + 'static>(&mut self, callback: C) {
        self.callbacks.push(Box::new(callback));
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn on_train_begin(&mut self, ctx: &CallbackContext) {
        for cb in &mut self.callbacks {
            cb.on_train_begin(ctx);
        }
    }

    pub fn on_train_end(&mut self, ctx: &CallbackContext) {
        for cb in &mut self.callbacks {
            cb.on_train_end(ctx);
        }
    }

    /// Every callback sees the event; `Stop` wins if any asks for it.
    pub fn on_epoch_end(&mut self, ctx: &CallbackContext) -> CallbackAction {
        let mut action = CallbackAction::Continue;
        for cb in &mut self.callbacks {
            if cb.on_epoch_end(ctx) == CallbackAction::Stop {
                action = CallbackAction::Stop;
            }
        }
        action
    }

    pub fn on_step_end(&mut self, ctx: &CallbackContext) -> CallbackAction {
        let mut action = CallbackAction::Continue;
        for cb in &mut self.callbacks {
            if cb.on_step_end(ctx) == CallbackAction::Stop {
                action = CallbackAction::Stop;
            }
        }
        action
    }

    /// Names of registered callbacks, in order
    pub fn names(&self) -> Vec<&'static str> {
        self.callbacks.iter().map(|cb| cb.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Counting {
        epochs: Arc<AtomicUsize>,
        stop: bool,
    }

    impl TrainerCallback for Counting {
        fn on_epoch_end(&mut self, _ctx: &CallbackContext) -> CallbackAction {
            self.epochs.fetch_add(1, Ordering::SeqCst);
            if self.stop {
                CallbackAction::Stop
            } else {
                CallbackAction::Continue
            }
        }

        fn name(&self) -> &'static str {
            "Counting"
        }
    }

    #[test]
    fn test_manager_empty() {
        let mut m = CallbackManager::new();
        assert!(m.is_empty());
        assert_eq!(m.on_epoch_end(&CallbackContext::default()), CallbackAction::Continue);
    }

    #[test]
    fn test_every_callback_sees_epoch_end() {
        let seen = Arc::new(AtomicUsize::new(0));
        let mut m = CallbackManager::new();
        m.add(Counting { epochs: seen.clone(), stop: true });
        m.add(Counting { epochs: seen.clone(), stop: false });
        assert_eq!(m.len(), 2);
        assert_eq!(m.on_epoch_end(&CallbackContext::default()), CallbackAction::Stop);
        assert_eq!(seen.load(Ordering::SeqCst), 2);
        assert_eq!(m.names(), vec!["Counting", "Counting"]);
    }
}
