//! Progress hooks for submissions and batches.

use std::time::Duration;

use log::{info, warn};

use super::outcome::SubmissionOutcome;

/// Receives progress events from the engine.
///
/// Every method has an empty default, so implementors override only what
/// they need. Calls happen on the task driving the submission.
pub trait SubmissionObserver: Send + Sync {
    /// An attempt (1-indexed) is about to be sent.
    fn on_attempt(&self, _attempt: u32, _max_attempts: u32) {}

    /// Attempt `attempt` failed with `last` and the engine will sleep `delay`.
    fn on_retry(&self, _attempt: u32, _delay: Duration, _last: &SubmissionOutcome) {}

    /// A submission reached its terminal outcome.
    fn on_outcome(&self, _outcome: &SubmissionOutcome) {}

    /// Batch item `index` (0-indexed) of `total` is starting.
    fn on_batch_item(&self, _index: usize, _total: usize) {}

    /// A batch finished with `succeeded` of `total` items stored.
    fn on_batch_complete(&self, _succeeded: usize, _total: usize) {}
}

/// Ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SubmissionObserver for NoopObserver {}

/// Reports progress through the `log` facade.
///
/// Batch completion is already logged by `submit_batch`, so it is not repeated here.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl SubmissionObserver for LoggingObserver {
    fn on_attempt(&self, attempt: u32, max_attempts: u32) {
        info!("Attempt {}/{}: sending data", attempt, max_attempts);
    }

    fn on_retry(&self, attempt: u32, delay: Duration, last: &SubmissionOutcome) {
        warn!("Attempt {} failed: {}", attempt, last);
        info!("Waiting {:.1}s before retry", delay.as_secs_f64());
    }

    fn on_outcome(&self, outcome: &SubmissionOutcome) {
        match outcome {
            SubmissionOutcome::Success {
                row,
                execution_time,
            } => {
                let row = row.map_or_else(|| "N/A".to_string(), |r| r.to_string());
                let secs = execution_time.map_or_else(|| "N/A".to_string(), |t| t.to_string());
                info!("Success! Data written to row {} (execution time: {}s)", row, secs);
            }
            SubmissionOutcome::ServerRejected { .. } => warn!("Server error: {}", outcome),
            SubmissionOutcome::Failed(_) => warn!("Submission failed: {}", outcome),
        }
    }

    fn on_batch_item(&self, index: usize, total: usize) {
        info!("Processing item {}/{}", index + 1, total);
    }
}
