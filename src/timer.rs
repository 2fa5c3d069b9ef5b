//! Tokio-backed recurring timers for the picker animation.
//!
//! Each started timer is a task ticking a `tokio::time::interval` and sending
//! its [`TimerId`] over an unbounded channel. The host drains the receiver and
//! feeds every id to `EngineCore::on_timer_tick`. Cancelling aborts the task;
//! dropping the scheduler aborts all of them, so tearing the host down never
//! leaves a timer firing against stale state.
//!
//! Must be used from within a Tokio runtime.

#[cfg(test)]
#[path = "timer_test.rs"]
mod timer_test;

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::host::Scheduler;
use crate::picker::TimerId;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<TimerId>,
    tasks: HashMap<TimerId, JoinHandle<()>>,
}

impl TokioScheduler {
    /// Create a scheduler and the receiver its timers fire into.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerId>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, tasks: HashMap::new() }, rx)
    }

    /// Number of timers started and not yet cancelled.
    #[must_use]
    pub fn active(&self) -> usize {
        self.tasks.values().filter(|h| !h.is_finished()).count()
    }
}

impl Scheduler for TokioScheduler {
    fn start(&mut self, id: TimerId, interval: Duration) {
        if let Some(prev) = self.tasks.remove(&id) {
            prev.abort();
        }
        let tx = self.tx.clone();
        let period = interval.max(MIN_INTERVAL);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately; the animation starts one period in.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if tx.send(id).is_err() {
                    break;
                }
            }
        });
        debug!(timer = id.0, period_ms = period.as_millis(), "timer started");
        self.tasks.insert(id, handle);
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(handle) = self.tasks.remove(&id) {
            handle.abort();
            debug!(timer = id.0, "timer cancelled");
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}
