//! Error type definitions.
//!
//! This module defines the submission failure taxonomy, configuration and
//! initialization errors, and the kind enums used for batch statistics.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// An invalid or missing configuration value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid configuration for `{field}`: {message}")]
pub struct ConfigError {
    /// Name of the offending field or setting
    pub field: &'static str,
    /// What is wrong and how to fix it
    pub message: String,
}

impl ConfigError {
    /// Creates an error for `field`.
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Network-level failure categories, derived from `reqwest::Error` predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum TransportKind {
    /// The request or response exceeded the timeout.
    Timeout,
    /// The connection could not be established.
    Connect,
    /// The request could not be sent.
    Request,
    /// The response body could not be read or decoded.
    Body,
    /// Any other transport failure.
    Other,
}

impl TransportKind {
    /// Human-readable label used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportKind::Timeout => "request timeout",
            TransportKind::Connect => "connection",
            TransportKind::Request => "request",
            TransportKind::Body => "response body",
            TransportKind::Other => "transport",
        }
    }
}

/// Why a submission failed.
///
/// Server-side rejections are not listed here; they are reported through
/// [`SubmissionOutcome::ServerRejected`](crate::SubmissionOutcome::ServerRejected).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    /// Required payload keys are missing or null. Raised before any network I/O.
    #[error("Missing required fields: {}", .missing.join(", "))]
    Validation {
        /// Required keys that were absent or null
        missing: Vec<&'static str>,
    },

    /// The endpoint redirected to the identity provider's sign-in page.
    #[error(
        "Access denied: redirected to login page ({location}). \
         The deployment may be blocking anonymous access; try authenticated mode"
    )]
    AuthDenied {
        /// Redirect target on the login host
        location: String,
    },

    /// The final response had a non-2xx status.
    #[error("HTTP error {status}")]
    Http {
        /// Final HTTP status code
        status: u16,
    },

    /// Timeout, connection failure, or another transport problem.
    #[error("{} failure: {message}", .kind.as_str())]
    Transport {
        /// Failure category
        kind: TransportKind,
        /// Underlying `reqwest` error text
        message: String,
    },

    /// The final response body was not a valid JSON response object.
    #[error("invalid response body: {detail}")]
    InvalidBody {
        /// Parse error plus a preview of the body
        detail: String,
    },

    /// The client's cancellation token fired.
    #[error("submission cancelled")]
    Cancelled,
}

impl SubmitError {
    /// Returns true when another attempt could produce a different result.
    pub fn is_retriable(&self) -> bool {
        match self {
            SubmitError::Transport { .. } | SubmitError::InvalidBody { .. } => true,
            SubmitError::Http { status } => *status >= 500,
            SubmitError::Validation { .. } | SubmitError::AuthDenied { .. } | SubmitError::Cancelled => {
                false
            }
        }
    }

    /// Statistics category of this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            SubmitError::Validation { .. } => FailureKind::Validation,
            SubmitError::AuthDenied { .. } => FailureKind::AuthDenied,
            SubmitError::Http { .. } => FailureKind::Http,
            SubmitError::Transport { .. } => FailureKind::Transport,
            SubmitError::InvalidBody { .. } => FailureKind::InvalidBody,
            SubmitError::Cancelled => FailureKind::Cancelled,
        }
    }
}

/// Failure categories for batch statistics, including server rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIterMacro)]
pub enum FailureKind {
    /// Missing or null required fields.
    Validation,
    /// Redirected to a sign-in page.
    AuthDenied,
    /// Non-2xx final status.
    Http,
    /// The server answered with a non-success status.
    ServerRejected,
    /// Timeout, connection or other network failure.
    Transport,
    /// Unparsable response body.
    InvalidBody,
    /// Cancelled before finishing.
    Cancelled,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FailureKind {
    /// Label used in batch summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Validation => "Validation error",
            FailureKind::AuthDenied => "Access denied (login redirect)",
            FailureKind::Http => "HTTP error",
            FailureKind::ServerRejected => "Rejected by server",
            FailureKind::Transport => "Transport error",
            FailureKind::InvalidBody => "Invalid response body",
            FailureKind::Cancelled => "Cancelled",
        }
    }
}
