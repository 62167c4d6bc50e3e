//! The submission state machine.

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use reqwest::header::CONTENT_TYPE;
use secrecy::ExposeSecret;
use tokio_util::sync::CancellationToken;

use super::observer::{NoopObserver, SubmissionObserver};
use super::outcome::SubmissionOutcome;
use super::payload::SubmissionPayload;
use super::redirects::redirect_target;
use super::response::{parse_response_body, Verdict};
use crate::config::{ClientConfig, URL_PREVIEW_CHARS};
use crate::error_handling::{get_retry_strategy, transport_error, InitializationError, SubmitError};
use crate::initialization::{init_probe_client, init_submit_client};
use crate::utils::truncate_preview;

/// Result of one attempt: either the submission is over, or it may be retried
/// and `outcome` is what to report if no attempts remain.
enum Attempt {
    Done(SubmissionOutcome),
    Retry(SubmissionOutcome),
}

/// Client for the result endpoint.
///
/// Owns an immutable [`ClientConfig`] and two HTTP clients built once at
/// construction: one with redirects disabled for submissions and one that
/// follows redirects for the connectivity probe.
pub struct ResultClient {
    pub(crate) config: ClientConfig,
    pub(crate) client: reqwest::Client,
    pub(crate) probe_client: reqwest::Client,
    pub(crate) observer: Arc<dyn SubmissionObserver>,
    pub(crate) cancel: CancellationToken,
}

impl ResultClient {
    /// Builds the HTTP clients for `config`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if a client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, InitializationError> {
        let client = init_submit_client(&config)?;
        let probe_client = init_probe_client(&config)?;
        Ok(Self {
            config,
            client,
            probe_client,
            observer: Arc::new(NoopObserver),
            cancel: CancellationToken::new(),
        })
    }

    /// Reports progress to `observer` instead of discarding it.
    pub fn with_observer(mut self, observer: Arc<dyn SubmissionObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Makes in-flight and future submissions stop when `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Submits one payload and returns its terminal outcome.
    ///
    /// The payload is validated first; an invalid payload fails without any
    /// network I/O. Otherwise up to `max_retries` attempts are made, sleeping
    /// `2^k` backoff units after failed attempt `k` (0-indexed) and never
    /// after the last one. A login redirect, a success, a non-retryable server
    /// code, or a 4xx ends the submission immediately.
    pub async fn submit(&self, payload: &SubmissionPayload) -> SubmissionOutcome {
        let outcome = self.run(payload).await;
        self.observer.on_outcome(&outcome);
        outcome
    }

    async fn run(&self, payload: &SubmissionPayload) -> SubmissionOutcome {
        if let Err(e) = payload.validate() {
            return e.into();
        }

        let body = payload.to_body();
        let max_attempts = self.config.max_retries();
        let mut delays = get_retry_strategy(self.config.backoff_unit());
        let mut attempt = 1;

        loop {
            if self.cancel.is_cancelled() {
                return SubmitError::Cancelled.into();
            }
            self.observer.on_attempt(attempt, max_attempts);

            let result = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return SubmitError::Cancelled.into(),
                result = self.attempt(&body) => result,
            };
            let last = match result {
                Attempt::Done(outcome) => return outcome,
                Attempt::Retry(outcome) => outcome,
            };
            if attempt >= max_attempts {
                return last;
            }

            let delay = delays.next().unwrap_or(Duration::ZERO);
            debug!("Attempt {} failed ({}), retrying in {:?}", attempt, last, delay);
            self.observer.on_retry(attempt, delay, &last);
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return SubmitError::Cancelled.into(),
                _ = tokio::time::sleep(delay) => {}
            }
            attempt += 1;
        }
    }

    async fn attempt(&self, body: &[u8]) -> Attempt {
        match self.dispatch(body).await {
            Ok(text) => self.interpret_body(&text),
            Err(e) if e.is_retriable() => Attempt::Retry(e.into()),
            Err(e) => Attempt::Done(e.into()),
        }
    }

    /// POSTs the body, follows a content redirect with a GET, and returns the
    /// final 2xx body text.
    async fn dispatch(&self, body: &[u8]) -> Result<String, SubmitError> {
        let url = self.config.url();
        let mut request = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_vec());
        if let Some(token) = self.config.auth_token() {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await.map_err(transport_error)?;
        let response = match redirect_target(response.status(), response.headers(), url) {
            Some(target) if self.config.is_login_redirect(&target) => {
                return Err(SubmitError::AuthDenied {
                    location: target.to_string(),
                });
            }
            Some(target) => {
                debug!(
                    "Following redirect to {}",
                    truncate_preview(target.as_str(), URL_PREVIEW_CHARS)
                );
                // The content host must not see the bearer token
                self.client.get(target).send().await.map_err(transport_error)?
            }
            None => response,
        };

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Http {
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(transport_error)
    }

    fn interpret_body(&self, text: &str) -> Attempt {
        let response = match parse_response_body(text) {
            Ok(response) => response,
            Err(e) => return Attempt::Retry(e.into()),
        };

        match response.interpret() {
            Verdict::Accepted {
                row,
                execution_time,
            } => Attempt::Done(SubmissionOutcome::Success {
                row,
                execution_time,
            }),
            Verdict::Rejected { code, message } => {
                let terminal = code
                    .as_deref()
                    .is_some_and(|c| self.config.is_non_retryable_code(c));
                let outcome = SubmissionOutcome::ServerRejected { code, message };
                if terminal {
                    Attempt::Done(outcome)
                } else {
                    Attempt::Retry(outcome)
                }
            }
        }
    }
}
