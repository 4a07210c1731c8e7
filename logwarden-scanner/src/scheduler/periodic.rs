//! Periodic scheduler
//!
//! Re-triggers a scan on a fixed interval from a background task. The loop
//! awaits each run before it looks at the clock again, so one scheduler never
//! overlaps its own runs.

use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Whether automatic runs are active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleState {
    Disabled,
    Scheduled,
}

impl fmt::Display for ScheduleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => write!(f, "disabled"),
            Self::Scheduled => write!(f, "scheduled"),
        }
    }
}

/// Runs an async job immediately and then once per interval
#[derive(Default)]
pub struct PeriodicScheduler {
    token: Option<CancellationToken>,
    handle: Option<JoinHandle<()>>,
}

impl PeriodicScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) the schedule
    ///
    /// The first run happens right away. Ticks missed while a run is still
    /// going are skipped rather than replayed. An existing schedule is stopped
    /// first.
    ///
    /// # Arguments
    /// * `interval` - Time between two run starts, must be non-zero
    /// * `run_fn` - Produces the future for one run
    pub fn start<F, Fut>(&mut self, interval: Duration, run_fn: F) -> anyhow::Result<()>
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if interval.is_zero() {
            anyhow::bail!("scheduler interval must be greater than 0");
        }

        if self.is_scheduled() {
            debug!("Replacing existing schedule");
            self.stop();
        }

        let token = CancellationToken::new();
        let cancelled = token.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                debug!("Scheduled run starting");
                run_fn().await;
            }

            debug!("Scheduler loop exited");
        });

        info!("Automatic scans scheduled every {:?}", interval);
        self.token = Some(token);
        self.handle = Some(handle);
        Ok(())
    }

    /// Cancels the schedule
    ///
    /// A run already in progress finishes; no further run starts.
    pub fn stop(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
            info!("Automatic scans disabled");
        }
        // Detached: the task exits on its own once the current run returns.
        self.handle = None;
    }

    /// Cancels the schedule and waits for an in-flight run to finish
    pub async fn shutdown(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("Scheduler task panicked: {}", e);
            }
            info!("Scheduler stopped");
        }
    }

    pub fn state(&self) -> ScheduleState {
        match &self.token {
            Some(token) if !token.is_cancelled() => ScheduleState::Scheduled,
            _ => ScheduleState::Disabled,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.state() == ScheduleState::Scheduled
    }
}

impl Drop for PeriodicScheduler {
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    fn counting(counter: &Arc<AtomicUsize>) -> impl Fn() -> std::future::Ready<()> + Send + 'static {
        let counter = Arc::clone(counter);
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            std::future::ready(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_immediately_then_per_interval() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut scheduler = PeriodicScheduler::new();
        scheduler
            .start(Duration::from_secs(60), counting(&runs))
            .unwrap();
        assert_eq!(scheduler.state(), ScheduleState::Scheduled);

        time::sleep(Duration::from_secs(1)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        time::sleep(Duration::from_secs(60)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 2);

        time::sleep(Duration::from_secs(120)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_runs_after_stop() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut scheduler = PeriodicScheduler::new();
        scheduler
            .start(Duration::from_secs(60), counting(&runs))
            .unwrap();

        time::sleep(Duration::from_secs(1)).await;
        scheduler.stop();
        assert!(!scheduler.is_scheduled());

        time::sleep(Duration::from_secs(600)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_during_run_lets_it_finish() {
        let started = Arc::new(AtomicUsize::new(0));
        let finished = Arc::new(AtomicUsize::new(0));
        let mut scheduler = PeriodicScheduler::new();
        {
            let (started, finished) = (started.clone(), finished.clone());
            scheduler
                .start(Duration::from_secs(10), move || {
                    let (started, finished) = (started.clone(), finished.clone());
                    async move {
                        started.fetch_add(1, Ordering::SeqCst);
                        time::sleep(Duration::from_secs(30)).await;
                        finished.fetch_add(1, Ordering::SeqCst);
                    }
                })
                .unwrap();
        }

        time::sleep(Duration::from_secs(5)).await;
        scheduler.stop();
        assert_eq!(scheduler.state(), ScheduleState::Disabled);

        time::sleep(Duration::from_secs(100)).await;
        assert_eq!(started.load(Ordering::SeqCst), 1);
        assert_eq!(finished.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_long_run_does_not_overlap() {
        let active = Arc::new(AtomicBool::new(false));
        let overlapped = Arc::new(AtomicBool::new(false));
        let runs = Arc::new(AtomicUsize::new(0));

        let mut scheduler = PeriodicScheduler::new();
        {
            let (active, overlapped, runs) = (active.clone(), overlapped.clone(), runs.clone());
            scheduler
                .start(Duration::from_secs(10), move || {
                    let (active, overlapped, runs) =
                        (active.clone(), overlapped.clone(), runs.clone());
                    async move {
                        if active.swap(true, Ordering::SeqCst) {
                            overlapped.store(true, Ordering::SeqCst);
                        }
                        runs.fetch_add(1, Ordering::SeqCst);
                        time::sleep(Duration::from_secs(25)).await;
                        active.store(false, Ordering::SeqCst);
                    }
                })
                .unwrap();
        }

        time::sleep(Duration::from_secs(90)).await;
        scheduler.shutdown().await;

        assert!(!overlapped.load(Ordering::SeqCst));
        // Runs start at 0, 25, 50 and 75 seconds.
        assert_eq!(runs.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_lets_current_run_finish() {
        let finished = Arc::new(AtomicBool::new(false));
        let mut scheduler = PeriodicScheduler::new();
        {
            let finished = finished.clone();
            scheduler
                .start(Duration::from_secs(60), move || {
                    let finished = finished.clone();
                    async move {
                        time::sleep(Duration::from_secs(30)).await;
                        finished.store(true, Ordering::SeqCst);
                    }
                })
                .unwrap();
        }

        time::sleep(Duration::from_secs(1)).await;
        scheduler.shutdown().await;

        assert!(finished.load(Ordering::SeqCst));
        assert_eq!(scheduler.state(), ScheduleState::Disabled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_schedule() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let mut scheduler = PeriodicScheduler::new();

        scheduler
            .start(Duration::from_secs(60), counting(&first))
            .unwrap();
        time::sleep(Duration::from_secs(1)).await;

        scheduler
            .start(Duration::from_secs(30), counting(&second))
            .unwrap();
        time::sleep(Duration::from_secs(61)).await;

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_zero_interval_is_rejected() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut scheduler = PeriodicScheduler::new();

        assert!(scheduler.start(Duration::ZERO, counting(&runs)).is_err());
        assert_eq!(scheduler.state(), ScheduleState::Disabled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_runs() {
        let runs = Arc::new(AtomicUsize::new(0));
        {
            let mut scheduler = PeriodicScheduler::new();
            scheduler
                .start(Duration::from_secs(60), counting(&runs))
                .unwrap();
            time::sleep(Duration::from_secs(1)).await;
        }

        time::sleep(Duration::from_secs(300)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }
}
