//! Batch submission.
//!
//! Items are submitted in input order through the same engine as single
//! submissions. One item's failure never stops the batch, and the result is
//! index-aligned with the input.

use std::collections::BTreeMap;

use futures::stream::{self, StreamExt};
use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::FailureKind;
use crate::submit::{ResultClient, SubmissionOutcome, SubmissionPayload};

/// One batch item and how it ended.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    /// The submitted payload.
    pub payload: SubmissionPayload,
    /// Its terminal outcome.
    pub outcome: SubmissionOutcome,
}

/// Outcomes of a batch, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchResult {
    /// One entry per input item, same index.
    pub entries: Vec<BatchEntry>,
}

impl BatchResult {
    /// Number of items in the batch.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the batch had no items.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of items that ended in `Success`.
    pub fn success_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.outcome.is_success())
            .count()
    }

    /// True when every item succeeded (vacuously true for an empty batch).
    pub fn all_succeeded(&self) -> bool {
        self.success_count() == self.len()
    }

    /// Number of failed items per failure kind; kinds with no failures are omitted.
    pub fn failure_breakdown(&self) -> BTreeMap<FailureKind, usize> {
        FailureKind::iter()
            .filter_map(|kind| {
                let count = self
                    .entries
                    .iter()
                    .filter(|entry| entry.outcome.failure_kind() == Some(kind))
                    .count();
                (count > 0).then_some((kind, count))
            })
            .collect()
    }
}

impl ResultClient {
    /// Submits every payload and collects the outcomes in input order.
    ///
    /// With `batch_concurrency == 1` items run strictly one after another.
    /// Higher values keep that many submissions in flight while still
    /// yielding outcomes in input order.
    pub async fn submit_batch(&self, items: &[SubmissionPayload]) -> BatchResult {
        let total = items.len();
        let entries: Vec<BatchEntry> = stream::iter(items.iter().enumerate())
            .map(|(index, payload)| async move {
                self.observer.on_batch_item(index, total);
                BatchEntry {
                    payload: payload.clone(),
                    outcome: self.submit(payload).await,
                }
            })
            .buffered(self.config.batch_concurrency())
            .collect()
            .await;

        let result = BatchResult { entries };
        let succeeded = result.success_count();
        info!("Batch complete: {}/{} successful", succeeded, total);
        for (kind, count) in result.failure_breakdown() {
            info!("   {}: {}", kind, count);
        }
        self.observer.on_batch_complete(succeeded, total);
        result
    }
}

/// Reads payloads from a JSON array or from JSON lines.
///
/// In JSON-lines input, blank lines and lines starting with `#` are skipped.
/// Elements that are not objects become empty payloads and fail validation
/// when submitted.
///
/// # Errors
///
/// Returns the `serde_json` error for the first line (or the array) that is
/// not valid JSON.
pub fn parse_payloads(text: &str) -> Result<Vec<SubmissionPayload>, serde_json::Error> {
    if text.trim_start().starts_with('[') {
        return serde_json::from_str(text);
    }
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}
