//! HTTP client initialization.
//!
//! This module provides functions to initialize HTTP clients with proper
//! configuration for requests and redirect handling.

use reqwest::redirect::Policy;
use reqwest::ClientBuilder;

use crate::config::{matches_login_host, ClientConfig, MAX_REDIRECT_HOPS};

/// Initializes the client used by the submission engine.
///
/// Redirects are disabled so the engine can inspect the `302` from the POST
/// and decide between the login page and the content URL itself.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_submit_client(config: &ClientConfig) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .redirect(Policy::none())
        .timeout(config.timeout())
        .user_agent(config.user_agent())
        .build()
}

/// Initializes the client used by the connectivity probe.
///
/// Redirects are followed automatically (up to `MAX_REDIRECT_HOPS`), except
/// into a login host: the chain stops there and the probe sees the redirect
/// response instead of a sign-in page.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_probe_client(config: &ClientConfig) -> Result<reqwest::Client, reqwest::Error> {
    let login_hosts = config.login_hosts().to_vec();
    let policy = Policy::custom(move |attempt| {
        if matches_login_host(&login_hosts, attempt.url()) {
            attempt.stop()
        } else if attempt.previous().len() >= MAX_REDIRECT_HOPS {
            attempt.error("too many redirects")
        } else {
            attempt.follow()
        }
    });

    ClientBuilder::new()
        .redirect(policy)
        .timeout(config.probe_timeout())
        .user_agent(config.user_agent())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_submit_client_does_not_follow_redirects() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .respond_with(
                wiremock::ResponseTemplate::new(302)
                    .insert_header("Location", format!("{}/content", server.uri())),
            )
            .mount(&server)
            .await;

        let config = ClientConfig::builder(server.uri())
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        let client = init_submit_client(&config).unwrap();
        let response = client.post(server.uri()).send().await.unwrap();

        assert_eq!(response.status().as_u16(), 302);
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_probe_client_stops_at_login_host() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .respond_with(
                wiremock::ResponseTemplate::new(302)
                    .insert_header("Location", "https://accounts.google.com/ServiceLogin"),
            )
            .mount(&server)
            .await;

        let config = ClientConfig::builder(server.uri()).build().unwrap();
        let client = init_probe_client(&config).unwrap();
        let response = client.post(server.uri()).send().await.unwrap();

        // The redirect itself is returned; accounts.google.com is never contacted
        assert_eq!(response.status().as_u16(), 302);
    }
}
