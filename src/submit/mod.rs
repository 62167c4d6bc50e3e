//! Submission engine.
//!
//! This module provides:
//! - The payload type and its validation
//! - The response contract shared with the connectivity probe
//! - `ResultClient`, which runs the POST-redirect-GET protocol with retries
//! - Observer hooks for progress reporting

mod client;
mod observer;
mod outcome;
mod payload;
mod redirects;
mod response;

pub use client::ResultClient;
pub use observer::{LoggingObserver, NoopObserver, SubmissionObserver};
pub use outcome::SubmissionOutcome;
pub use payload::SubmissionPayload;
pub use response::{parse_response_body, ServerResponse, Verdict};
