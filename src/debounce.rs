//! Cancellable delayed tasks.
//!
//! Each call to [`Debouncer::call`] cancels the task scheduled by the previous
//! call and schedules a new one; only a task whose delay runs out before the
//! next call gets to run.

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub struct Debouncer {
    delay: Duration,
    /// Token of the most recently scheduled task.
    pending: Mutex<Option<CancellationToken>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `task` to run once the delay elapses, cancelling any task
    /// scheduled before it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn call<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        if let Some(previous) = self.lock_pending().replace(token.clone()) {
            previous.cancel();
        }

        // The deadline is fixed now, not when the spawned task is first polled.
        let sleep = tokio::time::sleep(self.delay);
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {}
                _ = sleep => task.await,
            }
        });
    }

    /// Cancel the pending task, if any.
    pub fn cancel(&self) {
        if let Some(pending) = self.lock_pending().take() {
            pending.cancel();
        }
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Option<CancellationToken>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn recorder() -> Arc<Mutex<Vec<&'static str>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_after_delay() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let committed = recorder();

        let c = committed.clone();
        debouncer.call(async move { c.lock().unwrap().push("goog") });

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert!(committed.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(*committed.lock().unwrap(), vec!["goog"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_call_commits() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let committed = recorder();

        for value in ["g", "go", "goo", "goog"] {
            let c = committed.clone();
            debouncer.call(async move { c.lock().unwrap().push(value) });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(*committed.lock().unwrap(), vec!["goog"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_calls_further_apart_than_delay_all_commit() {
        let debouncer = Debouncer::new(Duration::from_millis(50));
        let committed = recorder();

        for value in ["a", "b"] {
            let c = committed.clone();
            debouncer.call(async move { c.lock().unwrap().push(value) });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        assert_eq!(*committed.lock().unwrap(), vec!["a", "b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_and_drop_discard_pending_task() {
        let committed = recorder();

        let debouncer = Debouncer::new(Duration::from_millis(50));
        let c = committed.clone();
        debouncer.call(async move { c.lock().unwrap().push("cancelled") });
        debouncer.cancel();

        let dropped = Debouncer::new(Duration::from_millis(50));
        let c = committed.clone();
        dropped.call(async move { c.lock().unwrap().push("dropped") });
        drop(dropped);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(committed.lock().unwrap().is_empty());
    }
}
