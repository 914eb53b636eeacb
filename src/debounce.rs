//! Cancellable debounce timer
//!
//! Collapses bursts of triggers into one action that runs after a quiet
//! period. Scheduling replaces any action that has not fired yet; an action
//! that already fired runs to completion regardless of later schedules.

use std::future::Future;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

const WAITING: u8 = 0;
const FIRED: u8 = 1;
const CANCELLED: u8 = 2;

#[derive(Debug)]
struct Scheduled {
    handle: JoinHandle<()>,
    phase: Arc<AtomicU8>,
}

/// One pending action at a time, fired after `delay` of quiet
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<Scheduled>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule `action` to run once the quiet period elapses.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        let delay = self.delay;
        let phase = Arc::new(AtomicU8::new(WAITING));
        let task_phase = Arc::clone(&phase);

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if task_phase
                .compare_exchange(WAITING, FIRED, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                action.await;
            }
        });

        self.pending = Some(Scheduled { handle, phase });
    }

    /// Drop the pending action if it has not fired yet.
    ///
    /// Returns whether an action was dropped. A fired action keeps running.
    pub fn cancel(&mut self) -> bool {
        let Some(scheduled) = self.pending.take() else {
            return false;
        };

        let dropped = scheduled
            .phase
            .compare_exchange(WAITING, CANCELLED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if dropped {
            scheduled.handle.abort();
        }
        dropped
    }

    /// Whether an action is waiting for its quiet period
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|s| s.phase.load(Ordering::Acquire) == WAITING)
    }

    /// Wait for the last scheduled action to fire and finish
    pub async fn flush(&mut self) {
        if let Some(scheduled) = self.pending.take() {
            if let Err(e) = scheduled.handle.await {
                if e.is_panic() {
                    tracing::warn!("Debounced action panicked");
                }
            }
        }
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
    use std::pin::Pin;
    use std::sync::Mutex;

    type Log = Arc<Mutex<Vec<&'static str>>>;
    type Action = Pin<Box<dyn Future<Output = ()> + Send>>;

    fn recorder() -> (Log, impl Fn(&'static str) -> Action) {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let record = move |label: &'static str| -> Action {
            let sink = Arc::clone(&sink);
            Box::pin(async move {
                sink.lock().unwrap().push(label);
            })
        };
        (log, record)
    }

    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_runs_only_last_action() {
        let (log, record) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        debouncer.schedule(record("ru"));
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.schedule(record("rus"));
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.schedule(record("rust"));

        tokio::time::sleep(Duration::from_millis(301)).await;
        settle().await;

        assert_eq!(*log.lock().unwrap(), vec!["rust"]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_fires_inside_quiet_period() {
        let (log, record) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        debouncer.schedule(record("a"));
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.schedule(record("b"));
        tokio::time::sleep(Duration::from_millis(200)).await;
        settle().await;

        assert!(log.lock().unwrap().is_empty());
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(101)).await;
        settle().await;
        assert_eq!(*log.lock().unwrap(), vec!["b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_action() {
        let (log, record) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        debouncer.schedule(record("a"));
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        tokio::time::sleep(Duration::from_millis(500)).await;
        settle().await;
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fired_action_survives_new_schedule() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        let slow_log = Arc::clone(&log);
        debouncer.schedule(async move {
            tokio::time::sleep(Duration::from_millis(1000)).await;
            slow_log.lock().unwrap().push("slow");
        });
        tokio::time::sleep(Duration::from_millis(301)).await;
        settle().await;
        assert!(!debouncer.is_pending());

        let fast_log = Arc::clone(&log);
        debouncer.schedule(async move {
            fast_log.lock().unwrap().push("fast");
        });

        tokio::time::sleep(Duration::from_millis(1500)).await;
        settle().await;

        assert_eq!(*log.lock().unwrap(), vec!["fast", "slow"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_waits_for_pending_action() {
        let (log, record) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        debouncer.schedule(record("a"));
        debouncer.flush().await;

        assert_eq!(*log.lock().unwrap(), vec!["a"]);
        assert!(!debouncer.is_pending());
    }
}
