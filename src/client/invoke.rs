//! Submit-then-poll invocation of remote prediction functions.
//!
//! A submission either completes immediately (`200`), is deferred (`202` with a
//! job id in the `nvcf-reqid` header), or fails. Deferred jobs are polled on the
//! status endpoint until a success body or a terminal error status arrives.
//!
//! ```text
//! SUBMITTED --200--> DONE
//! SUBMITTED --202--> POLLING --200--> DONE
//!                    POLLING --400/401/404/422/500--> FAILED
//!                    POLLING --other--> sleep, POLLING
//! SUBMITTED --other--> FAILED
//! ```

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::client::config::ClientConfig;
use crate::error::{FoldingError, Result};

/// Response header carrying the deferred job id
pub const REQUEST_ID_HEADER: &str = "nvcf-reqid";
/// Request header asking the provider to hold status queries open
pub const POLL_SECONDS_HEADER: &str = "nvcf-poll-seconds";
/// Poll statuses after which the job will never succeed
pub const TERMINAL_POLL_STATUSES: [u16; 5] = [400, 401, 404, 422, 500];

/// Client for long-running remote inference functions.
///
/// Stateless between invocations: concurrent calls share only the connection
/// pool. Dropping an in-flight [`InvocationClient::invoke`] future releases its
/// connection, but the job keeps running on the provider; there is no remote
/// cancellation.
#[derive(Debug, Clone)]
pub struct InvocationClient {
    config: ClientConfig,
    http: Client,
}

impl InvocationClient {
    /// Create a client from an explicit configuration
    ///
    /// # Errors
    ///
    /// Returns `FoldingError::Request` if the API key is not a valid header value
    /// or the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(POLL_SECONDS_HEADER, HeaderValue::from(config.poll_seconds));

        if !config.api_key.is_empty() {
            let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .map_err(|_| FoldingError::Request("API key is not a valid header value".into()))?;
            auth.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth);
        }

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| FoldingError::Request(e.to_string()))?;

        Ok(Self { config, http })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Submit `payload` to `url` and resolve it to the provider's JSON result.
    ///
    /// `provider` names the remote model in error messages and logs.
    ///
    /// # Errors
    ///
    /// - `FoldingError::Provider` for a definitive error status at submission or while polling
    /// - `FoldingError::Timeout` when one exchange exceeds the request timeout, or an
    ///   opt-in polling bound is reached
    /// - `FoldingError::Connection` when the provider cannot be reached
    /// - `FoldingError::Decode` when a success body is not JSON
    pub async fn invoke(
        &self,
        provider: &str,
        url: &str,
        payload: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        debug!("Submitting {} request to {}", provider, url);

        let response = self
            .http
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| FoldingError::from_transport(&e, provider))?;

        match response.status() {
            StatusCode::OK => self.read_body(response, provider).await,
            StatusCode::ACCEPTED => {
                let job_id = response
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
                    .ok_or_else(|| FoldingError::Provider {
                        status: StatusCode::ACCEPTED.as_u16(),
                        message: format!(
                            "{provider} API accepted the request without a {REQUEST_ID_HEADER} header"
                        ),
                        body: None,
                    })?;

                info!("{} job {} accepted, polling for result", provider, job_id);
                self.poll(provider, &job_id).await
            }
            status => {
                let body = read_error_body(response, provider).await;
                warn!("{} API rejected submission with {}", provider, status);
                Err(FoldingError::provider(
                    status.as_u16(),
                    &format!("{provider} API error"),
                    &body,
                ))
            }
        }
    }

    /// Query the status endpoint until the job reaches a terminal state
    async fn poll(&self, provider: &str, job_id: &str) -> Result<serde_json::Value> {
        let url = self.config.status_url_for(job_id);
        let started = Instant::now();
        let mut polls: u32 = 0;

        loop {
            polls += 1;
            let response = self
                .http
                .get(&url)
                .send()
                .await
                .map_err(|e| FoldingError::from_transport(&e, provider))?;

            let status = response.status();
            debug!("{} job {} poll #{}: {}", provider, job_id, polls, status);

            if status == StatusCode::OK {
                info!("{} job {} finished after {} polls", provider, job_id, polls);
                return self.read_body(response, provider).await;
            }

            if TERMINAL_POLL_STATUSES.contains(&status.as_u16()) {
                let body = read_error_body(response, provider).await;
                warn!("{} job {} failed with {}", provider, job_id, status);
                return Err(FoldingError::provider(
                    status.as_u16(),
                    "Error while waiting for function",
                    &body,
                ));
            }

            if self.config.max_polls.is_some_and(|max| polls >= max) {
                return Err(FoldingError::Timeout(format!(
                    "{provider} job {job_id} still running after {polls} status queries"
                )));
            }
            if let Some(max_wait) = self.config.max_wait {
                if wait_exceeded(started.elapsed(), self.config.poll_interval, max_wait) {
                    return Err(FoldingError::Timeout(format!(
                        "{provider} job {job_id} still running after {:?}",
                        started.elapsed()
                    )));
                }
            }

            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    async fn read_body(&self, response: Response, provider: &str) -> Result<serde_json::Value> {
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| FoldingError::from_transport(&e, provider))?;

        if self.config.debug {
            debug!("{} API response: {}", provider, body);
        }

        Ok(body)
    }
}

/// Whether sleeping another `interval` after `elapsed` would pass `max_wait`
fn wait_exceeded(elapsed: Duration, interval: Duration, max_wait: Duration) -> bool {
    elapsed
        .checked_add(interval)
        .map_or(true, |next| next > max_wait)
}

/// Body text of an error response; an unreadable body is logged and reported as empty
async fn read_error_body(response: Response, provider: &str) -> String {
    match response.text().await {
        Ok(body) => body,
        Err(e) => {
            debug!("Failed to read {} error response body: {}", provider, e);
            String::new()
        }
    }
}
