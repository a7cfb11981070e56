use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::client::RequestTemplate;
use crate::models::report::{RunReport, RunSummary};

/// Lock-free counter shared by every attempt of a run. It only ever grows.
#[derive(Debug, Default)]
pub struct CompletionCounter(AtomicU64);

impl CompletionCounter {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn increment(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// All state belonging to one trigger. A fresh run starts at zero, so
/// attempts still in flight from an earlier run can only ever bump the
/// counter of the run that launched them.
#[derive(Debug)]
pub struct TestRun {
    template: RequestTemplate,
    duration: Duration,
    completed: CompletionCounter,
    launched: AtomicU64,
    stop: CancellationToken,
    attempts: TaskTracker,
    started_at: DateTime<Local>,
    started: Instant,
}

impl TestRun {
    pub fn new(template: RequestTemplate, duration: Duration) -> Self {
        Self {
            template,
            duration,
            completed: CompletionCounter::new(),
            launched: AtomicU64::new(0),
            stop: CancellationToken::new(),
            attempts: TaskTracker::new(),
            started_at: Local::now(),
            started: Instant::now(),
        }
    }

    pub fn template(&self) -> &RequestTemplate {
        &self.template
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Fires the stop signal. Calling it again is a no-op.
    pub fn stop(&self) {
        self.stop.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.is_cancelled()
    }

    pub fn stop_signal(&self) -> &CancellationToken {
        &self.stop
    }

    pub(crate) fn attempts(&self) -> &TaskTracker {
        &self.attempts
    }

    pub(crate) fn record_launch(&self) {
        self.launched.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_completion(&self) {
        self.completed.increment();
    }

    pub fn completed(&self) -> u64 {
        self.completed.get()
    }

    pub fn launched(&self) -> u64 {
        self.launched.load(Ordering::Relaxed)
    }

    /// Attempts launched but not yet finished.
    pub fn in_flight(&self) -> usize {
        self.attempts.len()
    }

    pub fn report(&self) -> RunReport {
        RunReport {
            count: self.completed(),
        }
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            target: self.template.uri().to_string(),
            method: self.template.method().to_string(),
            duration: self.duration,
            completed: self.completed(),
            launched: self.launched(),
            in_flight: self.in_flight(),
            elapsed: self.started.elapsed(),
            started_at: self.started_at.format("%Y/%m/%d %H:%M:%S").to_string(),
        }
    }

    /// Resolves once the dispatch loop has exited and every attempt it
    /// launched has finished.
    pub async fn drain(&self) {
        self.attempts.wait().await;
    }
}
