//! Presence Rotation
//!
//! Cycles a fixed, ordered list of status strings on an interval. The task is
//! started when the gateway is ready and stopped at shutdown.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

/// Something that can display a status line.
pub trait PresenceSink: Send + Sync {
    fn set_status(&self, status: &str);
}

/// Ordered statuses plus the position of the next one.
#[derive(Debug)]
struct StatusCycle {
    statuses: Vec<String>,
    index: AtomicUsize,
}

impl StatusCycle {
    fn next(&self) -> Option<&str> {
        if self.statuses.is_empty() {
            return None;
        }
        let i = self.index.fetch_add(1, Ordering::Relaxed) % self.statuses.len();
        Some(&self.statuses[i])
    }
}

/// Rotates the bot's presence through a finite list of statuses.
pub struct StatusRotator {
    cycle: Arc<StatusCycle>,
    interval: Duration,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl StatusRotator {
    pub fn new(statuses: Vec<String>, interval: Duration) -> Self {
        Self {
            cycle: Arc::new(StatusCycle {
                statuses,
                index: AtomicUsize::new(0),
            }),
            interval,
            task: Mutex::new(None),
        }
    }

    /// Start publishing statuses to `sink`. The first status is shown
    /// immediately. Does nothing if already running or there is nothing to
    /// show; returns whether a task was started.
    pub fn start(&self, sink: Arc<dyn PresenceSink>) -> bool {
        let mut task = self.task.lock();
        if task.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return false;
        }
        if self.cycle.statuses.is_empty() {
            return false;
        }

        let cycle = Arc::clone(&self.cycle);
        let period = self.interval;
        *task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                if let Some(status) = cycle.next() {
                    sink.set_status(status);
                }
            }
        }));

        tracing::debug!(interval_secs = period.as_secs(), "Presence rotation started");
        true
    }

    /// Stop the rotation task, if any.
    pub fn stop(&self) {
        if let Some(handle) = self.task.lock().take() {
            handle.abort();
            tracing::debug!("Presence rotation stopped");
        }
    }

    #[cfg(test)]
    fn is_running(&self) -> bool {
        self.task
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for StatusRotator {
    fn drop(&mut self) {
        self.stop();
    }
}
