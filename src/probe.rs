//! Connectivity probe.
//!
//! Sends the fixed diagnostic record once and reports whether the deployment
//! answered with a success. No retries; redirects are followed by the probe
//! client, which stops short of the sign-in page.

use log::{error, info, warn};
use secrecy::ExposeSecret;

use crate::config::{BODY_PREVIEW_CHARS, URL_PREVIEW_CHARS};
use crate::submit::{parse_response_body, ResultClient, SubmissionPayload, Verdict};
use crate::utils::truncate_preview;

const TROUBLESHOOTING: &[&str] = &[
    "Is the Web App URL correct? (should end with /exec)",
    "Is Web App access set to 'Anyone'?",
    "Does the target sheet exist?",
    "Is the Apps Script deployment active?",
    "Check the Apps Script execution logs for errors",
];

impl ResultClient {
    /// Returns `true` only when the endpoint answers `200` with a success body.
    ///
    /// Never panics or returns an error; every failure is logged and becomes
    /// `false`. Calling it repeatedly against a healthy endpoint keeps
    /// returning `true`.
    pub async fn test_connection(&self) -> bool {
        info!("Testing connection to web app");
        info!(
            "URL: {}",
            truncate_preview(self.config.url().as_str(), URL_PREVIEW_CHARS)
        );

        let passed = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                warn!("Connection test cancelled");
                false
            }
            passed = self.probe() => passed,
        };
        if !passed {
            log_troubleshooting();
        }
        passed
    }

    async fn probe(&self) -> bool {
        let payload = SubmissionPayload::diagnostic();
        let mut request = self
            .probe_client
            .post(self.config.url().clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload.to_body());
        // reqwest drops Authorization when a redirect leaves the original host
        if let Some(token) = self.config.auth_token() {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Connection test FAILED: {}", e);
                return false;
            }
        };

        let status = response.status();
        info!("Status code: {}", status.as_u16());
        if status.as_u16() != 200 {
            error!("Non-200 status code");
            return false;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                error!("Connection test FAILED while reading body: {}", e);
                return false;
            }
        };

        match parse_response_body(&body) {
            Ok(response) => {
                info!("Response: {:?}", response);
                match response.interpret() {
                    Verdict::Accepted { .. } => {
                        info!("Connection test PASSED");
                        true
                    }
                    Verdict::Rejected { message, .. } => {
                        warn!("Server returned: {}", message);
                        false
                    }
                }
            }
            Err(_) => {
                warn!("Response is not valid JSON");
                warn!("   Body preview: {}", truncate_preview(&body, BODY_PREVIEW_CHARS));
                false
            }
        }
    }
}

fn log_troubleshooting() {
    info!("Troubleshooting checklist:");
    for (i, item) in TROUBLESHOOTING.iter().enumerate() {
        info!("  {}. {}", i + 1, item);
    }
}
