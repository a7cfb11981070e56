use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// Body returned by the trigger endpoint.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct RunReport {
    #[serde(rename = "Count")]
    pub count: u64,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub target: String,
    pub method: String,
    pub duration: Duration,

    pub completed: u64,
    pub launched: u64,
    pub in_flight: usize,

    pub elapsed: Duration,
    pub started_at: String,
}

impl RunSummary {
    /// Completed attempts per second of wall-clock run time.
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.completed as f64 / secs
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} for {:?}: {} completed, {} launched, {} in flight, {:.2} req/s",
            self.started_at,
            self.method,
            self.target,
            self.duration,
            self.completed,
            self.launched,
            self.in_flight,
            self.throughput()
        )
    }
}
