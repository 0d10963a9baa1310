//! User-facing error notification.
//!
//! Panels never talk to a concrete toast widget. They receive an
//! `Arc<dyn Notifier>` and report through it, which keeps them testable
//! without any UI attached.

use std::sync::Arc;

pub trait Notifier: Send + Sync {
    fn report_error(&self, message: &str);
}

/// Forwards each notification to every registered notifier, in order.
#[derive(Default, Clone)]
pub struct FanoutNotifier {
    targets: Vec<Arc<dyn Notifier>>,
}

impl FanoutNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, target: Arc<dyn Notifier>) -> Self {
        self.targets.push(target);
        self
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl Notifier for FanoutNotifier {
    fn report_error(&self, message: &str) {
        for target in &self.targets {
            target.report_error(message);
        }
    }
}
