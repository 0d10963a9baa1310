use chrono::{DateTime, Duration, Utc};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use visualizer_core::Notifier;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Queue {
    next_id: u64,
    toasts: VecDeque<Toast>,
}

/// Transient error toasts shown in the top-right corner.
///
/// Cloning shares the queue, so the store can be handed to the panels as
/// their notifier while the view keeps reading from it.
#[derive(Debug, Clone)]
pub struct ToastStore {
    queue: Arc<Mutex<Queue>>,
    duration: Duration,
}

impl ToastStore {
    pub fn new(duration: std::time::Duration) -> Self {
        Self {
            queue: Arc::default(),
            duration: Duration::from_std(duration).unwrap_or(Duration::seconds(5)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Queue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push_at(&self, message: impl Into<String>, now: DateTime<Utc>) -> u64 {
        let mut queue = self.lock();
        let id = queue.next_id;
        queue.next_id += 1;
        queue.toasts.push_back(Toast {
            id,
            message: message.into(),
            created_at: now,
        });
        id
    }

    /// Oldest first.
    pub fn active(&self) -> Vec<Toast> {
        self.lock().toasts.iter().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().toasts.is_empty()
    }

    /// Drops toasts older than the configured duration and returns how many
    /// were removed.
    pub fn expire(&self, now: DateTime<Utc>) -> usize {
        let mut queue = self.lock();
        let before = queue.toasts.len();
        let duration = self.duration;
        queue.toasts.retain(|toast| now - toast.created_at < duration);
        before - queue.toasts.len()
    }

    pub fn dismiss(&self, id: u64) {
        self.lock().toasts.retain(|toast| toast.id != id);
    }
}

impl Notifier for ToastStore {
    fn report_error(&self, message: &str) {
        self.push_at(message, Utc::now());
    }
}
