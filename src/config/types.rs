//! Configuration types.
//!
//! This module defines the logging enums shared with the CLI and the immutable
//! [`ClientConfig`] consumed by the submission engine.

use std::collections::HashSet;
use std::time::Duration;

use clap::ValueEnum;
use log::{info, warn};
use secrecy::SecretString;
use url::Url;

use crate::config::constants::{
    DEFAULT_BACKOFF_UNIT_MS, DEFAULT_LOGIN_HOSTS, DEFAULT_MAX_RETRIES,
    DEFAULT_NON_RETRYABLE_CODES, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, PROBE_TIMEOUT_SECS,
};
use crate::credentials::CredentialProvider;
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace). Used with the `--log-level` CLI option.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Immutable client configuration.
///
/// Built once through [`ClientConfigBuilder`] and shared by every submission;
/// nothing in the engine mutates it mid-request.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use result_relay::ClientConfig;
///
/// let config = ClientConfig::builder("https://script.google.com/macros/s/abc/exec")
///     .max_retries(5)
///     .timeout(Duration::from_secs(10))
///     .build()
///     .expect("valid config");
/// assert_eq!(config.max_retries(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    url: Url,
    max_retries: u32,
    timeout: Duration,
    auth_token: Option<SecretString>,
    backoff_unit: Duration,
    login_hosts: Vec<String>,
    non_retryable_codes: HashSet<String>,
    probe_timeout: Duration,
    user_agent: String,
    batch_concurrency: usize,
}

impl ClientConfig {
    /// Starts a builder targeting `url` with every other field at its default.
    pub fn builder(url: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder::new(url)
    }

    /// Starts a builder from a credential provider.
    ///
    /// The bearer token is only requested when `use_auth` is set; a missing token
    /// in that case is logged and the client falls back to anonymous access.
    ///
    /// # Errors
    ///
    /// Returns the provider's `ConfigError` when no web app URL is configured.
    pub fn from_credentials(
        provider: &dyn CredentialProvider,
        use_auth: bool,
    ) -> Result<ClientConfigBuilder, ConfigError> {
        let url = provider.webapp_url()?;
        let mut builder = ClientConfigBuilder::new(url.as_str());

        if use_auth {
            match provider.auth_token() {
                Some(token) => {
                    info!("Authenticated mode enabled ({})", provider.name());
                    builder = builder.auth_token(token);
                }
                None => {
                    warn!(
                        "Authentication requested but {} supplied no token; continuing anonymously",
                        provider.name()
                    );
                }
            }
        }

        Ok(builder)
    }

    /// Target web app URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Total number of attempts per submission (always at least 1).
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Bearer token, if authenticated mode is enabled.
    pub fn auth_token(&self) -> Option<&SecretString> {
        self.auth_token.as_ref()
    }

    /// Base delay of the exponential backoff.
    pub fn backoff_unit(&self) -> Duration {
        self.backoff_unit
    }

    /// Hosts treated as the identity provider's sign-in page.
    pub fn login_hosts(&self) -> &[String] {
        &self.login_hosts
    }

    /// Timeout used by the connectivity probe.
    pub fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    /// User-Agent header sent with every request.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Number of batch items in flight at once (1 = strictly sequential).
    pub fn batch_concurrency(&self) -> usize {
        self.batch_concurrency
    }

    /// Returns true when a redirect to `target` means anonymous access was refused.
    pub fn is_login_redirect(&self, target: &Url) -> bool {
        matches_login_host(&self.login_hosts, target)
    }

    /// Returns true when the server `code` marks a rejection that retrying cannot fix.
    pub fn is_non_retryable_code(&self, code: &str) -> bool {
        self.non_retryable_codes.contains(code)
    }
}

/// Matches `target`'s host against `hosts`, exactly or as a subdomain.
pub(crate) fn matches_login_host(hosts: &[String], target: &Url) -> bool {
    let Some(host) = target.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();
    hosts.iter().any(|login| {
        host == *login
            || host
                .strip_suffix(login.as_str())
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

/// Builder for [`ClientConfig`].
///
/// Every field has a default; [`build`](Self::build) validates the whole set.
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    url: String,
    max_retries: u32,
    timeout: Duration,
    auth_token: Option<SecretString>,
    backoff_unit: Duration,
    login_hosts: Vec<String>,
    non_retryable_codes: Vec<String>,
    probe_timeout: Duration,
    user_agent: String,
    batch_concurrency: usize,
}

impl ClientConfigBuilder {
    fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_retries: DEFAULT_MAX_RETRIES,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            auth_token: None,
            backoff_unit: Duration::from_millis(DEFAULT_BACKOFF_UNIT_MS),
            login_hosts: DEFAULT_LOGIN_HOSTS.iter().map(|h| h.to_string()).collect(),
            non_retryable_codes: DEFAULT_NON_RETRYABLE_CODES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            probe_timeout: Duration::from_secs(PROBE_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            batch_concurrency: 1,
        }
    }

    /// Total attempts per submission (initial try + retries).
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Per-request timeout (default 30 s).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Bearer token sent with each POST.
    pub fn auth_token(mut self, token: impl Into<SecretString>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Backoff unit; delays have millisecond granularity.
    pub fn backoff_unit(mut self, unit: Duration) -> Self {
        self.backoff_unit = unit;
        self
    }

    /// Replaces the login host list.
    pub fn login_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.login_hosts = hosts.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the non-retryable server code set.
    pub fn non_retryable_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.non_retryable_codes = codes.into_iter().map(Into::into).collect();
        self
    }

    /// Timeout for the connectivity probe (default 15 s).
    pub fn probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// User-Agent header for both HTTP clients.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Batch items in flight at once (default 1, strictly sequential).
    pub fn batch_concurrency(mut self, concurrency: usize) -> Self {
        self.batch_concurrency = concurrency;
        self
    }

    /// Validates and freezes the configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the first invalid field.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let url = Url::parse(self.url.trim())
            .map_err(|e| ConfigError::new("url", format!("`{}` is not a valid URL: {e}", self.url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::new(
                "url",
                format!("scheme must be http or https, got `{}`", url.scheme()),
            ));
        }
        if self.max_retries == 0 {
            return Err(ConfigError::new(
                "max_retries",
                "must be greater than 0 (it counts the initial attempt)",
            ));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::new("timeout", "must be greater than 0"));
        }
        if self.probe_timeout.is_zero() {
            return Err(ConfigError::new("probe_timeout", "must be greater than 0"));
        }
        if self.batch_concurrency == 0 {
            return Err(ConfigError::new(
                "batch_concurrency",
                "must be greater than 0 (1 processes items sequentially)",
            ));
        }

        let mut login_hosts = Vec::with_capacity(self.login_hosts.len());
        for host in self.login_hosts {
            let host = host.trim().trim_end_matches('.').to_ascii_lowercase();
            if host.is_empty() {
                return Err(ConfigError::new("login_hosts", "host entries cannot be empty"));
            }
            login_hosts.push(host);
        }

        let non_retryable_codes = self
            .non_retryable_codes
            .into_iter()
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty())
            .collect();

        Ok(ClientConfig {
            url,
            max_retries: self.max_retries,
            timeout: self.timeout,
            auth_token: self.auth_token,
            backoff_unit: self.backoff_unit,
            login_hosts,
            non_retryable_codes,
            probe_timeout: self.probe_timeout,
            user_agent: self.user_agent,
            batch_concurrency: self.batch_concurrency,
        })
    }
}
