//! Run Completion Poller - converts an asynchronous run into a result.
//!
//! After a run is created the provider processes it in the background; the
//! only way to observe completion is to probe its status. The loop here is
//! bounded: a fixed delay between probes and a hard wait budget, both from
//! configuration. A run that never reaches a terminal status fails the turn
//! with `RunTimedOut` instead of looping forever.

use std::time::Duration;
use tokio::time::{sleep, Instant};

use crate::domain::chat::RunStatus;
use crate::ports::{AssistantClient, AssistantError};

/// Errors from waiting on a run.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    /// The run reached a terminal state other than success.
    #[error("run finished with status {status}")]
    RunFailed {
        /// The terminal status reported by the provider.
        status: RunStatus,
    },

    /// The run did not reach a terminal state within the wait budget.
    #[error("run did not finish within {budget_secs}s")]
    RunTimedOut {
        /// Configured budget.
        budget_secs: u64,
    },

    /// A non-transient provider error aborted the loop.
    #[error(transparent)]
    Provider(#[from] AssistantError),
}

/// Bounded fixed-interval poller for run completion.
#[derive(Debug, Clone)]
pub struct RunPoller {
    interval: Duration,
    max_wait: Duration,
}

impl RunPoller {
    /// Creates a poller with the given probe interval and total wait budget.
    pub fn new(interval: Duration, max_wait: Duration) -> Self {
        Self { interval, max_wait }
    }

    /// Waits until the run reaches a terminal status.
    ///
    /// Returns `Ok` only on the success terminal status. Terminal failures
    /// short-circuit immediately; transient probe errors are logged and the
    /// probing continues within the budget.
    pub async fn wait_until_done(
        &self,
        client: &dyn AssistantClient,
        thread_id: &str,
        run_id: &str,
    ) -> Result<(), PollError> {
        let deadline = Instant::now() + self.max_wait;

        loop {
            sleep(self.interval).await;

            if Instant::now() >= deadline {
                tracing::warn!(run_id, "run wait budget exhausted");
                return Err(PollError::RunTimedOut {
                    budget_secs: self.max_wait.as_secs(),
                });
            }

            match client.run_status(thread_id, run_id).await {
                Ok(status) if status.is_success() => {
                    tracing::debug!(run_id, "run completed");
                    return Ok(());
                }
                Ok(status) if status.is_failure() => {
                    tracing::warn!(run_id, %status, "run reached terminal failure");
                    return Err(PollError::RunFailed { status });
                }
                Ok(status) => {
                    tracing::trace!(run_id, %status, "run still pending");
                }
                Err(err) if err.is_transient() => {
                    // One flaky probe must not abort the run; the budget
                    // bounds how long this can go on.
                    tracing::warn!(run_id, error = %err, "status probe failed, will retry");
                }
                Err(err) => return Err(PollError::Provider(err)),
            }
        }
    }
}
