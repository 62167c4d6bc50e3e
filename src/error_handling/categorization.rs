//! Error categorization and retry strategy.
//!
//! This module converts `reqwest` failures into the submission taxonomy and
//! produces the backoff schedule used between attempts.

use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;

use super::types::{SubmitError, TransportKind};

/// Creates the backoff schedule for a given unit.
///
/// The `k`-th delay (0-indexed) is `2^k * unit`: `unit, 2*unit, 4*unit, ...`.
/// There is no jitter and no cap; the iterator never ends, so the caller's
/// attempt budget bounds it. Delays have millisecond granularity.
pub fn get_retry_strategy(unit: Duration) -> impl Iterator<Item = Duration> {
    let unit_ms = u64::try_from(unit.as_millis()).unwrap_or(u64::MAX);
    // ExponentialBackoff::from_millis(2) yields 2*factor, 4*factor, ...
    std::iter::once(Duration::from_millis(unit_ms))
        .chain(ExponentialBackoff::from_millis(2).factor(unit_ms))
}

/// Categorizes a `reqwest::Error` into a `TransportKind`.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> TransportKind {
    if error.is_timeout() {
        TransportKind::Timeout
    } else if error.is_connect() {
        TransportKind::Connect
    } else if error.is_body() || error.is_decode() {
        TransportKind::Body
    } else if error.is_request() {
        TransportKind::Request
    } else {
        TransportKind::Other
    }
}

/// Wraps a `reqwest::Error` as a retriable transport failure.
pub fn transport_error(error: reqwest::Error) -> SubmitError {
    SubmitError::Transport {
        kind: categorize_reqwest_error(&error),
        message: error.to_string(),
    }
}
