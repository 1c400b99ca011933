//! Timer-based call coalescing.
//!
//! A [`Debouncer`] binds one unit of async work to a quiet period. Each
//! [`trigger`](Debouncer::trigger) re-arms the timer; the work runs once, with
//! the arguments of the last trigger, after the period elapses with no further
//! triggers.
//!
//! The timer stage and the work stage are separate tasks: re-triggering aborts
//! a timer that has not yet fired, but work that already started always runs
//! to completion. Callers that need "latest wins" semantics for in-flight work
//! check currency inside the work itself.

use futures_util::future::BoxFuture;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

type Work<T> = Arc<dyn Fn(T) -> BoxFuture<'static, ()> + Send + Sync>;

/// Trailing-edge debouncer for async work.
///
/// Requires a running tokio runtime: `trigger` spawns the timer task.
///
/// # Example
///
/// ```rust
/// use character_finder::app::Debouncer;
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// let debouncer = Debouncer::new(Duration::from_millis(20), move |term: String| {
///     let sink = Arc::clone(&sink);
///     async move { sink.lock().unwrap().push(term) }
/// });
///
/// debouncer.trigger("r".to_string());
/// debouncer.trigger("ri".to_string());
/// debouncer.trigger("rick".to_string());
/// tokio::time::sleep(Duration::from_millis(60)).await;
///
/// assert_eq!(*seen.lock().unwrap(), vec!["rick".to_string()]);
/// # }
/// ```
pub struct Debouncer<T> {
    work: Work<T>,
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Binds `work` to a quiet period of `delay`.
    pub fn new<F, Fut>(delay: Duration, work: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let work: Work<T> = Arc::new(move |args| Box::pin(work(args)));
        Self {
            work,
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Cancels any pending invocation and arms a new timer with `args`.
    ///
    /// Never runs the work synchronously.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn trigger(&self, args: T) {
        let work = Arc::clone(&self.work);
        let delay = self.delay;

        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::trace!("debounce timer elapsed");
            // Detached: a later trigger must not abort work that has started.
            tokio::spawn(work(args));
        });

        if let Some(previous) = self.lock_pending().replace(timer) {
            if !previous.is_finished() {
                tracing::trace!("superseding pending debounce timer");
            }
            previous.abort();
        }
    }

    /// Whether a timer is armed and has not fired yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.lock_pending().as_ref().is_some_and(|timer| !timer.is_finished())
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<T> Debouncer<T> {
    fn lock_pending(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(timer) = self.lock_pending().take() {
            timer.abort();
        }
    }
}

impl<T> std::fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}
