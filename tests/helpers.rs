// Shared test helpers for building clients against mock servers.

use std::sync::Mutex;
use std::time::Duration;

use result_relay::{ClientConfig, ClientConfigBuilder, SubmissionObserver, SubmissionOutcome};

/// Config pointed at `base_url` with a millisecond backoff unit so retry tests stay fast.
#[allow(dead_code)] // Used by other test files
pub fn fast_config(base_url: &str) -> ClientConfigBuilder {
    ClientConfig::builder(base_url)
        .max_retries(3)
        .timeout(Duration::from_secs(5))
        .probe_timeout(Duration::from_secs(5))
        .backoff_unit(Duration::from_millis(1))
}

/// Success body as the endpoint returns it.
#[allow(dead_code)]
pub fn success_body(row: i64, execution_time: f64) -> String {
    format!(r#"{{"status":"success","row":{row},"executionTime":{execution_time}}}"#)
}

/// Observer that records what the engine reported.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingObserver {
    pub attempts: Mutex<Vec<u32>>,
    pub delays: Mutex<Vec<Duration>>,
    pub outcomes: Mutex<Vec<SubmissionOutcome>>,
}

impl SubmissionObserver for RecordingObserver {
    fn on_attempt(&self, attempt: u32, _max_attempts: u32) {
        self.attempts.lock().unwrap().push(attempt);
    }

    fn on_retry(&self, _attempt: u32, delay: Duration, _last: &SubmissionOutcome) {
        self.delays.lock().unwrap().push(delay);
    }

    fn on_outcome(&self, outcome: &SubmissionOutcome) {
        self.outcomes.lock().unwrap().push(outcome.clone());
    }
}
