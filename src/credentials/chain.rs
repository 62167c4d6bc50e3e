//! Ordered fallback across providers.

use log::debug;
use secrecy::SecretString;
use url::Url;

use super::CredentialProvider;
use crate::error_handling::ConfigError;

/// Asks each provider in order; the first answer wins.
///
/// The URL lookup reports the last provider's error when nobody has a URL,
/// which for the CLI chain is the environment lookup with its setup hint.
pub struct ChainedCredentials {
    providers: Vec<Box<dyn CredentialProvider>>,
}

impl ChainedCredentials {
    /// Creates a chain that consults `providers` in order.
    pub fn new(providers: Vec<Box<dyn CredentialProvider>>) -> Self {
        Self { providers }
    }
}

impl CredentialProvider for ChainedCredentials {
    fn name(&self) -> &'static str {
        "credential chain"
    }

    fn webapp_url(&self) -> Result<Url, ConfigError> {
        let mut last_err = ConfigError::new("webapp_url", "no credential providers configured");
        for provider in &self.providers {
            match provider.webapp_url() {
                Ok(url) => {
                    debug!("Web app URL supplied by {}", provider.name());
                    return Ok(url);
                }
                Err(e) => {
                    debug!("{} has no usable web app URL: {}", provider.name(), e);
                    last_err = e;
                }
            }
        }
        Err(last_err)
    }

    fn auth_token(&self) -> Option<SecretString> {
        self.providers.iter().find_map(|provider| provider.auth_token())
    }
}
