//! JSON secret store credentials.
//!
//! The store is a flat JSON object of string values, e.g.
//! `{"GAS_WEBAPP_URL": "https://...", "GAS_AUTH_TOKEN": "ya29..."}`.
//! Non-string values are ignored.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde_json::Value;
use url::Url;

use super::{parse_webapp_url, CredentialProvider};
use crate::config::{AUTH_TOKEN_VAR, WEBAPP_URL_VAR};
use crate::error_handling::ConfigError;

/// Credentials loaded once from a JSON secret store file.
#[derive(Debug)]
pub struct SecretFileCredentials {
    path: PathBuf,
    secrets: HashMap<String, SecretString>,
    url_key: String,
    token_key: String,
}

impl SecretFileCredentials {
    /// Reads and parses the secret store.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or is not a JSON object.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(
                "secrets_file",
                format!("cannot read {}: {e}", path.display()),
            )
        })?;
        Self::from_json(path, &text)
    }

    fn from_json(path: &Path, text: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(text).map_err(|e| {
            ConfigError::new(
                "secrets_file",
                format!("{} is not valid JSON: {e}", path.display()),
            )
        })?;
        let Value::Object(map) = value else {
            return Err(ConfigError::new(
                "secrets_file",
                format!("{} must contain a JSON object", path.display()),
            ));
        };

        let secrets = map
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(s) if !s.trim().is_empty() => Some((key, SecretString::from(s))),
                _ => None,
            })
            .collect();

        Ok(Self {
            path: path.to_path_buf(),
            secrets,
            url_key: WEBAPP_URL_VAR.to_string(),
            token_key: AUTH_TOKEN_VAR.to_string(),
        })
    }

    /// Overrides the secret names looked up for the URL and token.
    pub fn with_keys(mut self, url_key: impl Into<String>, token_key: impl Into<String>) -> Self {
        self.url_key = url_key.into();
        self.token_key = token_key.into();
        self
    }
}

impl CredentialProvider for SecretFileCredentials {
    fn name(&self) -> &'static str {
        "secrets file"
    }

    fn webapp_url(&self) -> Result<Url, ConfigError> {
        use secrecy::ExposeSecret;

        match self.secrets.get(&self.url_key) {
            Some(raw) => parse_webapp_url(raw.expose_secret(), &self.url_key),
            None => Err(ConfigError::new(
                "webapp_url",
                format!("{} has no `{}` entry", self.path.display(), self.url_key),
            )),
        }
    }

    fn auth_token(&self) -> Option<SecretString> {
        self.secrets.get(&self.token_key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_store(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(contents.as_bytes()).expect("Failed to write store");
        file.flush().expect("Failed to flush store");
        file
    }

    #[test]
    fn test_load_reads_url_and_token() {
        let file = write_store(
            r#"{"GAS_WEBAPP_URL": "https://script.google.com/macros/s/abc/exec", "GAS_AUTH_TOKEN": "ya29.x", "OTHER": 5}"#,
        );
        let creds = SecretFileCredentials::load(file.path()).unwrap();
        assert_eq!(
            creds.webapp_url().unwrap().as_str(),
            "https://script.google.com/macros/s/abc/exec"
        );
        assert_eq!(creds.auth_token().unwrap().expose_secret(), "ya29.x");
    }

    #[test]
    fn test_missing_entries() {
        let file = write_store(r#"{"GAS_AUTH_TOKEN": ""}"#);
        let creds = SecretFileCredentials::load(file.path()).unwrap();
        let err = creds.webapp_url().unwrap_err();
        assert!(err.message.contains("GAS_WEBAPP_URL"));
        assert!(creds.auth_token().is_none());
    }

    #[test]
    fn test_custom_keys() {
        let file = write_store(r#"{"url": "https://example.com/exec", "token": "t"}"#);
        let creds = SecretFileCredentials::load(file.path())
            .unwrap()
            .with_keys("url", "token");
        assert!(creds.webapp_url().is_ok());
        assert!(creds.auth_token().is_some());
    }

    #[test]
    fn test_load_rejects_non_object_and_bad_json() {
        let file = write_store("[1, 2, 3]");
        let err = SecretFileCredentials::load(file.path()).unwrap_err();
        assert_eq!(err.field, "secrets_file");
        assert!(err.message.contains("JSON object"));

        let file = write_store("{not json");
        let err = SecretFileCredentials::load(file.path()).unwrap_err();
        assert!(err.message.contains("not valid JSON"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SecretFileCredentials::load(dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.field, "secrets_file");
        assert!(err.message.contains("cannot read"));
    }
}
