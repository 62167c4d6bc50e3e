//! Configuration constants.
//!
//! This module defines the defaults used when building a [`ClientConfig`](super::ClientConfig)
//! and the fixed values of the wire contract.

// Retry strategy
/// Default number of attempts per submission (initial attempt + retries)
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default backoff unit in milliseconds.
///
/// Attempt `k` (0-indexed) waits `2^k` units before attempt `k + 1`.
pub const DEFAULT_BACKOFF_UNIT_MS: u64 = 1000;

// Network operation timeouts
/// Per-request timeout in seconds for submissions
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Per-request timeout in seconds for the connectivity probe
pub const PROBE_TIMEOUT_SECS: u64 = 15;

// Redirect handling
/// Maximum number of redirect hops the connectivity probe will follow
pub const MAX_REDIRECT_HOPS: usize = 10;
/// Hosts whose appearance as a redirect target means the request was bounced to a sign-in page
pub const DEFAULT_LOGIN_HOSTS: &[&str] = &["accounts.google.com"];

// Server error codes
/// Codes the server assigns to validation failures. Retrying cannot change these outcomes.
pub const DEFAULT_NON_RETRYABLE_CODES: &[&str] = &["INVALID_JSON", "MISSING_FIELDS"];

// Wire contract
/// Keys every submission payload must carry (non-null) before it is sent
pub const REQUIRED_FIELDS: &[&str] = &["id", "result", "score"];
/// `status` value the server uses for an accepted submission
pub const SUCCESS_STATUS: &str = "success";
/// Message reported when a rejection carries no `message` field
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

// Credential lookup
/// Environment variable / secret name holding the web app URL
pub const WEBAPP_URL_VAR: &str = "GAS_WEBAPP_URL";
/// Environment variable / secret name holding the bearer token
pub const AUTH_TOKEN_VAR: &str = "GAS_AUTH_TOKEN";

/// Default User-Agent string for HTTP requests.
pub const DEFAULT_USER_AGENT: &str = concat!("result_relay/", env!("CARGO_PKG_VERSION"));

// Console output limits
/// Maximum number of response body characters shown when a body fails to parse
pub const BODY_PREVIEW_CHARS: usize = 200;
/// Maximum number of URL characters shown in probe logs
pub const URL_PREVIEW_CHARS: usize = 50;
