//! Terminal result of a submission.

use std::fmt;

use crate::error_handling::{FailureKind, SubmitError};

/// How a submission ended. Every `submit` call yields exactly one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// The server stored the record.
    Success {
        /// Sheet row the record landed in
        row: Option<i64>,
        /// Server-side processing time in seconds
        execution_time: Option<f64>,
    },
    /// The server answered but refused the record.
    ServerRejected {
        /// Machine-readable error code, if any
        code: Option<String>,
        /// Human-readable reason
        message: String,
    },
    /// The submission never got a usable answer.
    Failed(SubmitError),
}

impl SubmissionOutcome {
    /// True only for `Success`.
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success { .. })
    }

    /// Failure category, or `None` on success.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            SubmissionOutcome::Success { .. } => None,
            SubmissionOutcome::ServerRejected { .. } => Some(FailureKind::ServerRejected),
            SubmissionOutcome::Failed(err) => Some(err.kind()),
        }
    }
}

impl From<SubmitError> for SubmissionOutcome {
    fn from(err: SubmitError) -> Self {
        SubmissionOutcome::Failed(err)
    }
}

impl fmt::Display for SubmissionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionOutcome::Success {
                row,
                execution_time,
            } => {
                write!(f, "stored")?;
                if let Some(row) = row {
                    write!(f, " in row {row}")?;
                }
                if let Some(secs) = execution_time {
                    write!(f, " ({secs}s)")?;
                }
                Ok(())
            }
            SubmissionOutcome::ServerRejected {
                code: Some(code),
                message,
            } => write!(f, "rejected by server [{code}]: {message}"),
            SubmissionOutcome::ServerRejected {
                code: None,
                message,
            } => write!(f, "rejected by server: {message}"),
            SubmissionOutcome::Failed(err) => write!(f, "{err}"),
        }
    }
}
