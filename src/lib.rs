//! result_relay library: resilient submission of result records to a
//! redirecting web app endpoint.
//!
//! The endpoint answers a POST with a `302` to a content host, and the stored
//! result is read by following that redirect with a GET. [`ResultClient`]
//! runs that exchange with validation, login-redirect detection, bounded
//! retries with exponential backoff, and a typed terminal outcome.
//!
//! # Example
//!
//! ```no_run
//! use result_relay::{ClientConfig, ResultClient, SubmissionPayload};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::builder("https://script.google.com/macros/s/abc/exec").build()?;
//! let client = ResultClient::new(config)?;
//!
//! if client.test_connection().await {
//!     let outcome = client
//!         .submit(&SubmissionPayload::new(101, "Optimization Complete", 98.5))
//!         .await;
//!     println!("{outcome}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

mod batch;
pub mod config;
pub mod credentials;
mod error_handling;
pub mod initialization;
mod probe;
mod submit;
mod utils;

// Re-export public API
pub use batch::{parse_payloads, BatchEntry, BatchResult};
pub use config::{ClientConfig, ClientConfigBuilder, LogFormat, LogLevel};
pub use credentials::{
    ChainedCredentials, CredentialProvider, EnvCredentials, SecretFileCredentials,
    StaticCredentials,
};
pub use error_handling::{
    ConfigError, FailureKind, InitializationError, SubmitError, TransportKind,
};
pub use submit::{
    LoggingObserver, NoopObserver, ResultClient, ServerResponse, SubmissionObserver,
    SubmissionOutcome, SubmissionPayload, Verdict,
};
