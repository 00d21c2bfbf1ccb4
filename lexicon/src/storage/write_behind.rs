//! Deferred write-behind scheduling.
//!
//! Instead of persisting inline with a mutation, callers schedule a write that fires
//! after a fixed delay measured from the scheduling call. Every call schedules its own
//! write. A write reads the shared state when it fires rather than when it was
//! scheduled, so a later write simply overwrites an earlier one with newer state.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Schedules deferred writes and keeps their handles so they can be cancelled.
#[derive(Debug, Clone)]
pub struct WriteBehind {
    delay: Duration,
    handles: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl WriteBehind {
    /// Create a scheduler whose writes fire `delay` after being scheduled
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            handles: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `write` to run once the delay elapses.
    ///
    /// `write` is not polled until then, so any state it reads is the state at fire
    /// time. Returns the number of writes still outstanding, this one included.
    pub fn schedule<F>(&self, write: F) -> usize
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            write.await;
        });

        let mut handles = self.lock();
        handles.retain(|handle| !handle.is_finished());
        handles.push(task);
        handles.len()
    }

    /// Whether any scheduled write has not finished yet
    pub fn is_pending(&self) -> bool {
        self.lock().iter().any(|handle| !handle.is_finished())
    }

    /// Abort every outstanding write. Returns how many were cancelled.
    pub fn cancel(&self) -> usize {
        let handles = std::mem::take(&mut *self.lock());

        let mut cancelled = 0;
        for handle in handles {
            if !handle.is_finished() {
                handle.abort();
                cancelled += 1;
            }
        }

        if cancelled > 0 {
            tracing::debug!(cancelled, "Cancelled pending deferred writes");
        }
        cancelled
    }

    fn lock(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.handles.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_write(counter: Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_fires_after_delay() {
        let writes = Arc::new(AtomicUsize::new(0));
        let scheduler = WriteBehind::new(Duration::from_secs(5));

        assert_eq!(scheduler.schedule(counting_write(Arc::clone(&writes))), 1);
        assert!(scheduler.is_pending());

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(writes.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(writes.load(Ordering::SeqCst), 1);
        assert!(!scheduler.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_call_schedules_its_own_write() {
        let writes = Arc::new(AtomicUsize::new(0));
        let scheduler = WriteBehind::new(Duration::from_secs(5));

        scheduler.schedule(counting_write(Arc::clone(&writes)));
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(scheduler.schedule(counting_write(Arc::clone(&writes))), 2);

        // First write fires at t=5, second at t=7
        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(writes.load(Ordering::SeqCst), 1);
        assert!(scheduler.is_pending());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(writes.load(Ordering::SeqCst), 2);
        assert!(!scheduler.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_every_pending_write() {
        let writes = Arc::new(AtomicUsize::new(0));
        let scheduler = WriteBehind::new(Duration::from_secs(5));

        scheduler.schedule(counting_write(Arc::clone(&writes)));
        scheduler.schedule(counting_write(Arc::clone(&writes)));
        assert_eq!(scheduler.cancel(), 2);
        assert_eq!(scheduler.cancel(), 0);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(writes.load(Ordering::SeqCst), 0);
        assert!(!scheduler.is_pending());
    }
}
