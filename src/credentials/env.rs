//! Environment-variable credentials.

use std::fmt;
use std::sync::Arc;

use secrecy::SecretString;
use url::Url;

use super::{parse_webapp_url, CredentialProvider};
use crate::config::{AUTH_TOKEN_VAR, WEBAPP_URL_VAR};
use crate::error_handling::ConfigError;

type VarLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Reads the URL and token from environment variables.
///
/// Blank values count as unset.
#[derive(Clone)]
pub struct EnvCredentials {
    url_var: String,
    token_var: String,
    lookup: VarLookup,
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::with_vars(WEBAPP_URL_VAR, AUTH_TOKEN_VAR)
    }
}

impl fmt::Debug for EnvCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvCredentials")
            .field("url_var", &self.url_var)
            .field("token_var", &self.token_var)
            .finish_non_exhaustive()
    }
}

impl EnvCredentials {
    /// Reads from custom variable names instead of `GAS_WEBAPP_URL` / `GAS_AUTH_TOKEN`.
    pub fn with_vars(url_var: impl Into<String>, token_var: impl Into<String>) -> Self {
        Self::with_lookup(url_var, token_var, |var| std::env::var(var).ok())
    }

    /// Resolves variable names through `lookup` instead of the process environment.
    pub fn with_lookup<F>(url_var: impl Into<String>, token_var: impl Into<String>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            url_var: url_var.into(),
            token_var: token_var.into(),
            lookup: Arc::new(lookup),
        }
    }

    fn var(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|value| !value.trim().is_empty())
    }
}

impl CredentialProvider for EnvCredentials {
    fn name(&self) -> &'static str {
        "environment"
    }

    fn webapp_url(&self) -> Result<Url, ConfigError> {
        match self.var(&self.url_var) {
            Some(raw) => parse_webapp_url(&raw, &self.url_var),
            None => Err(ConfigError::new(
                "webapp_url",
                format!(
                    "{} not configured; export {}=<your web app URL> or add it to a secrets file",
                    self.url_var, self.url_var
                ),
            )),
        }
    }

    fn auth_token(&self) -> Option<SecretString> {
        self.var(&self.token_var).map(SecretString::from)
    }
}
