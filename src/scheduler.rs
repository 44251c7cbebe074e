//! Periodic refresh of widget data.
//!
//! Each task runs on its own tokio interval. Ticks that fall behind are
//! skipped rather than bunched up. All tasks watch a single shutdown channel;
//! there is no per-task cancellation.
//!
//! A task that fails is logged and tried again on its next tick. Failures
//! never stop the loop.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::error::Result;
use crate::feed::Feed;

/// Shortest interval a task may run at.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Runs refresh tasks until shut down.
#[derive(Debug)]
pub struct RefreshScheduler {
    shutdown: watch::Sender<bool>,
    tasks: Vec<(String, JoinHandle<()>)>,
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshScheduler {
    /// Creates a scheduler with no tasks.
    #[must_use]
    pub fn new() -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            shutdown,
            tasks: Vec::new(),
        }
    }

    /// Spawns `task` to run every `interval`, first immediately.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn spawn<F>(&mut self, name: impl Into<String>, interval: Duration, mut task: F)
    where
        F: FnMut() -> Result<()> + Send + 'static,
    {
        let name = name.into();
        let mut stop = self.shutdown.subscribe();
        let period = interval.max(MIN_INTERVAL);
        let task_name = name.clone();

        let handle = tokio::spawn(async move {
            if *stop.borrow() {
                return;
            }

            let mut tick = tokio::time::interval(period);
            tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
            info!(
                task = %task_name,
                interval_ms = period.as_millis() as u64,
                "refresh task started"
            );

            let mut failures: u64 = 0;
            loop {
                tokio::select! {
                    _ = tick.tick() => {
                        match task() {
                            Ok(()) => debug!(task = %task_name, "recompute completed"),
                            Err(e) => {
                                failures += 1;
                                warn!(task = %task_name, error = %e, failures, "recompute failed");
                            }
                        }
                    }
                    // Fires on shutdown and when the scheduler is dropped.
                    _ = stop.changed() => break,
                }
            }

            info!(task = %task_name, failures, "refresh task stopped");
        });

        self.tasks.push((name, handle));
    }

    /// Spawns a feed's recompute at the feed's own interval.
    pub fn spawn_feed(&mut self, feed: Feed) {
        let name = feed.name().to_string();
        let interval = feed.interval();
        self.spawn(name, interval, move || feed.recompute());
    }

    /// Number of spawned tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether no task was spawned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tells every task to stop after its current tick.
    pub fn shutdown(&self) {
        self.shutdown.send_replace(true);
    }

    /// Waits for every task to finish. Call [`shutdown`](Self::shutdown) first.
    pub async fn join(self) {
        for (name, handle) in self.tasks {
            if let Err(e) = handle.await {
                error!(task = %name, error = %e, "refresh task aborted");
            }
        }
    }

    /// Shuts down and waits for every task.
    pub async fn stop(self) {
        self.shutdown();
        self.join().await;
    }
}
