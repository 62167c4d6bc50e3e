//! Command-line options.
//!
//! This struct is generated by `clap` from the field attributes. All options
//! have defaults matching [`ClientConfig`]'s, so a bare
//! `result_relay probe` works once the web app URL is configured.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::config::constants::{
    DEFAULT_BACKOFF_UNIT_MS, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS,
};
use crate::config::types::{ClientConfig, LogFormat, LogLevel};
use crate::credentials::{
    ChainedCredentials, CredentialProvider, EnvCredentials, SecretFileCredentials,
    StaticCredentials,
};
use crate::error_handling::ConfigError;

/// Command-line options and configuration.
///
/// # Examples
///
/// ```bash
/// # Check the deployment before a real run
/// result_relay probe
///
/// # Single submission with authentication
/// result_relay --use-auth submit --id 101 --result "Optimization Complete" --score 98.5
///
/// # Batch from a JSON-lines file, four items in flight
/// result_relay --concurrency 4 batch results.jsonl
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "result_relay",
    about = "Submits result records to a redirecting web app endpoint."
)]
pub struct Cli {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Web app URL (takes precedence over the secrets file and GAS_WEBAPP_URL)
    #[arg(long)]
    pub url: Option<String>,

    /// JSON secret store consulted before environment variables
    #[arg(long, value_parser)]
    pub secrets_file: Option<PathBuf>,

    /// Send a bearer token (GAS_AUTH_TOKEN) with submissions
    #[arg(long)]
    pub use_auth: bool,

    /// Total attempts per submission (initial attempt + retries)
    #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Backoff unit in milliseconds (attempt k waits 2^k units)
    #[arg(long, default_value_t = DEFAULT_BACKOFF_UNIT_MS)]
    pub backoff_ms: u64,

    /// Batch items in flight at once (1 keeps strict input order)
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,

    /// Redirect host that signals a sign-in page (repeatable; replaces the default)
    #[arg(long = "login-host")]
    pub login_hosts: Vec<String>,

    /// Server error code that must not be retried (repeatable; replaces the default)
    #[arg(long = "non-retryable-code")]
    pub non_retryable_codes: Vec<String>,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands of the `result_relay` binary.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send a diagnostic record and report whether the deployment answers
    Probe,
    /// Submit a single record
    Submit {
        /// Record id
        #[arg(long)]
        id: i64,
        /// Result text
        #[arg(long)]
        result: String,
        /// Numeric score
        #[arg(long)]
        score: f64,
    },
    /// Submit every record of a JSON array or JSON-lines file
    Batch {
        /// JSON array or JSON-lines file of records
        #[arg(value_parser)]
        file: PathBuf,
    },
    /// Probe, submit one sample record, then a three-record batch
    Demo,
}

impl Cli {
    /// Assembles the credential lookup chain: `--url`, then `--secrets-file`, then the environment.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the secrets file cannot be read or parsed.
    pub fn credential_provider(&self) -> Result<Box<dyn CredentialProvider>, ConfigError> {
        let mut providers: Vec<Box<dyn CredentialProvider>> = Vec::new();
        if let Some(url) = &self.url {
            providers.push(Box::new(StaticCredentials::new(url.clone())));
        }
        if let Some(path) = &self.secrets_file {
            providers.push(Box::new(SecretFileCredentials::load(path)?));
        }
        providers.push(Box::new(EnvCredentials::default()));
        Ok(Box::new(ChainedCredentials::new(providers)))
    }

    /// Builds the client configuration from the parsed options.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if no URL is configured or any option is out of range.
    pub fn client_config(
        &self,
        provider: &dyn CredentialProvider,
    ) -> Result<ClientConfig, ConfigError> {
        let mut builder = ClientConfig::from_credentials(provider, self.use_auth)?
            .max_retries(self.max_retries)
            .timeout(Duration::from_secs(self.timeout_seconds))
            .backoff_unit(Duration::from_millis(self.backoff_ms))
            .batch_concurrency(self.concurrency);
        if !self.login_hosts.is_empty() {
            builder = builder.login_hosts(self.login_hosts.iter().cloned());
        }
        if !self.non_retryable_codes.is_empty() {
            builder = builder.non_retryable_codes(self.non_retryable_codes.iter().cloned());
        }
        builder.build()
    }
}
