//! Trailing-edge debouncer
//!
//! Every [`Debouncer::call`] re-arms a cancellable timer; the action only
//! runs with the most recent value once no new call arrived for the whole
//! quiet window. Used for search boxes where each keystroke would otherwise
//! trigger a refilter.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use super::timer::{after, TimerHandle};

type Action<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Coalesces rapid calls into a single delayed call
pub struct Debouncer<T> {
    wait: Duration,
    action: Action<T>,
    pending: Mutex<Option<TimerHandle>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer that runs `action` after `wait` of quiescence.
    pub fn new<F>(wait: Duration, action: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self { wait, action: Arc::new(action), pending: Mutex::new(None) }
    }

    /// Schedule `value`, replacing any value still waiting.
    ///
    /// Must be called from within a tokio runtime.
    pub fn call(&self, value: T) {
        let mut pending = self.pending.lock();
        if let Some(previous) = pending.take() {
            previous.cancel();
        }
        let action = Arc::clone(&self.action);
        *pending = Some(after(self.wait, move || action(value)));
    }

    /// Drop the waiting value, if any.
    pub fn cancel(&self) {
        if let Some(previous) = self.pending.lock().take() {
            previous.cancel();
        }
    }

    /// Whether a value is waiting for the quiet window to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending.lock().as_ref().is_some_and(TimerHandle::is_pending)
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(previous) = self.pending.get_mut().take() {
            previous.cancel();
        }
    }
}

impl<T> std::fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer").field("wait", &self.wait).finish_non_exhaustive()
    }
}
