//! Error handling.
//!
//! This module provides:
//! - The submission failure taxonomy (`SubmitError`) and its retriability rules
//! - Configuration and initialization errors
//! - Transport error categorization and the backoff schedule

mod categorization;
mod types;

// Re-export public API
pub use categorization::{get_retry_strategy, transport_error};
pub use types::{ConfigError, FailureKind, InitializationError, SubmitError, TransportKind};
