use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::{self, JoinHandle};
use tokio::time::timeout;
use tracing::debug;

use crate::client::{build_client, send_request, HttpsClient};
use crate::models::test_run::TestRun;

/// Drives a test run: launches attempts against the run's target as fast as
/// the scheduler allows until the run's stop signal fires.
///
/// There is no concurrency cap and no pacing. The dispatch loop never waits
/// on an attempt; attempts outlive the stop signal and finish on their own.
#[derive(Debug, Clone)]
pub struct FloodEngine {
    runtime: Handle,
    attempt_timeout: Option<Duration>,
}

impl FloodEngine {
    pub fn new(runtime: Handle, attempt_timeout: Option<Duration>) -> Self {
        Self {
            runtime,
            attempt_timeout,
        }
    }

    /// Spawns the dispatch loop for `run` and returns immediately.
    pub fn start(&self, run: Arc<TestRun>) -> JoinHandle<()> {
        let client = build_client();
        let attempt_timeout = self.attempt_timeout;
        self.runtime
            .spawn(async move { dispatch(client, run, attempt_timeout).await })
    }
}

async fn dispatch(client: HttpsClient, run: Arc<TestRun>, attempt_timeout: Option<Duration>) {
    while !run.is_stopped() {
        run.record_launch();
        run.attempts()
            .spawn(attempt(client.clone(), Arc::clone(&run), attempt_timeout));

        // Spawning never suspends; without this the loop would pin its worker.
        task::yield_now().await;
    }

    run.attempts().close();
    debug!(
        launched = run.launched(),
        in_flight = run.in_flight(),
        "dispatch loop stopped"
    );
}

/// One request attempt. The outcome is deliberately ignored: success, error
/// status, transport failure and timeout all count as a completion.
async fn attempt(client: HttpsClient, run: Arc<TestRun>, attempt_timeout: Option<Duration>) {
    let request = send_request(&client, run.template());
    let _ = match attempt_timeout {
        Some(limit) => timeout(limit, request).await.ok(),
        None => Some(request.await),
    };
    run.record_completion();
}
