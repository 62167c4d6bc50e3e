//! Credential lookup.
//!
//! The submission engine never reads secrets itself; it receives a URL and an
//! optional bearer token from a [`CredentialProvider`] chosen at startup:
//! - [`EnvCredentials`]: environment variables (`GAS_WEBAPP_URL`, `GAS_AUTH_TOKEN`)
//! - [`SecretFileCredentials`]: a JSON secret store file
//! - [`StaticCredentials`]: values supplied directly (CLI flags, tests)
//! - [`ChainedCredentials`]: first provider that answers wins

mod chain;
mod env;
mod secret_file;

use secrecy::SecretString;
use url::Url;

use crate::error_handling::ConfigError;

pub use chain::ChainedCredentials;
pub use env::EnvCredentials;
pub use secret_file::SecretFileCredentials;

/// Source of the target URL and bearer token.
pub trait CredentialProvider: Send + Sync {
    /// Short label used in log messages.
    fn name(&self) -> &'static str;

    /// The web app URL.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when the URL is unset or unparsable.
    fn webapp_url(&self) -> Result<Url, ConfigError>;

    /// The bearer token. Absence means unauthenticated mode; this never fails.
    fn auth_token(&self) -> Option<SecretString>;
}

/// Credentials supplied directly.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    url: String,
    token: Option<SecretString>,
}

impl StaticCredentials {
    /// Credentials for `url` with no bearer token.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: None,
        }
    }

    /// Adds a bearer token.
    pub fn with_token(mut self, token: impl Into<SecretString>) -> Self {
        self.token = Some(token.into());
        self
    }
}

impl CredentialProvider for StaticCredentials {
    fn name(&self) -> &'static str {
        "static credentials"
    }

    fn webapp_url(&self) -> Result<Url, ConfigError> {
        parse_webapp_url(&self.url, "--url")
    }

    fn auth_token(&self) -> Option<SecretString> {
        self.token.clone()
    }
}

/// Parses a URL read from `source`, rejecting blank values.
pub(crate) fn parse_webapp_url(raw: &str, source: &str) -> Result<Url, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ConfigError::new(
            "webapp_url",
            format!("{source} is set but empty"),
        ));
    }
    Url::parse(raw).map_err(|e| {
        ConfigError::new(
            "webapp_url",
            format!("{source} is not a valid URL ({e}); it should end with /exec"),
        )
    })
}
