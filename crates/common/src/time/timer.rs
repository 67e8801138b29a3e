//! One-shot timers with cancellation support.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

/// A handle that can be used to cancel a pending timer
#[derive(Debug, Clone)]
pub struct TimerHandle {
    token: CancellationToken,
    fired: Arc<AtomicBool>,
}

impl TimerHandle {
    fn new() -> Self {
        Self { token: CancellationToken::new(), fired: Arc::new(AtomicBool::new(false)) }
    }

    /// Cancel the timer. Has no effect once the callback has run.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check if the timer has been cancelled
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Check if the callback has run
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// Neither fired nor cancelled yet.
    pub fn is_pending(&self) -> bool {
        !self.has_fired() && !self.is_cancelled()
    }
}

/// Run `callback` once after `duration` unless the returned handle is
/// cancelled first.
///
/// Must be called from within a tokio runtime.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
///
/// use seller_console_common::time::timer::after;
///
/// #[tokio::main]
/// async fn main() {
///     let handle = after(Duration::from_secs(5), || println!("Timeout!"));
///     handle.cancel();
/// }
/// ```
pub fn after<F>(duration: Duration, callback: F) -> TimerHandle
where
    F: FnOnce() + Send + 'static,
{
    let handle = TimerHandle::new();
    let token = handle.token.clone();
    let fired = Arc::clone(&handle.fired);

    tokio::spawn(async move {
        tokio::select! {
            biased;
            () = token.cancelled() => {
                tracing::trace!("timer cancelled before firing");
            }
            () = sleep(duration) => {
                if !token.is_cancelled() {
                    fired.store(true, Ordering::SeqCst);
                    callback();
                }
            }
        }
    });

    handle
}
