//! HttpFetcher for ontology documents
//!
//! Blocking GET with a retry policy:
//! - retries on configured status codes (default 500, 502, 504)
//! - retries on connect errors and timeouts
//! - exponential backoff `factor * 2^(attempt - 1)`

use std::thread::sleep;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, warn};

const DEFAULT_USER_AGENT: &str = concat!("ontology2smw/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Timed out fetching {url}: {message}")]
    Timeout { url: String, message: String },

    #[error("Connection to {url} failed: {message}")]
    Connect { url: String, message: String },

    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },
}

impl FetchError {
    fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        let url = url.to_string();
        let message = err.to_string();
        if err.is_timeout() {
            FetchError::Timeout { url, message }
        } else if err.is_connect() {
            FetchError::Connect { url, message }
        } else {
            FetchError::Request { url, message }
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Timeout { .. } | FetchError::Connect { .. })
    }
}

/// When and how often a failed GET is repeated
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub retries: u32,
    pub backoff_factor: Duration,
    pub status_forcelist: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            backoff_factor: Duration::from_millis(300),
            status_forcelist: vec![500, 502, 504],
        }
    }
}

impl RetryPolicy {
    pub fn should_retry_status(&self, status: StatusCode) -> bool {
        self.status_forcelist.contains(&status.as_u16())
    }

    /// Delay before retry number `attempt` (1-based)
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        let step = 1u32 << attempt.saturating_sub(1).min(16);
        self.backoff_factor.saturating_mul(step)
    }
}

/// Body and headers of a successful GET
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    policy: RetryPolicy,
}

impl HttpFetcher {
    /// Fetcher whose requests each time out after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| FetchError::Request {
                url: String::new(),
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            policy: RetryPolicy::default(),
        })
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// GET `url` asking for `accept`; non-success statuses are errors
    pub fn get(&self, url: &str, accept: &str) -> Result<FetchedDocument, FetchError> {
        let mut attempt = 0u32;

        loop {
            let outcome = self
                .client
                .get(url)
                .header(ACCEPT, accept)
                .send()
                .map_err(|e| FetchError::from_reqwest(url, e));

            let retry = match outcome {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let content_type = response
                            .headers()
                            .get(CONTENT_TYPE)
                            .and_then(|value| value.to_str().ok())
                            .map(str::to_string);
                        let body = response
                            .bytes()
                            .map_err(|e| FetchError::from_reqwest(url, e))?
                            .to_vec();

                        debug!(url, status = status.as_u16(), bytes = body.len(), "fetched document");
                        return Ok(FetchedDocument {
                            url: url.to_string(),
                            status: status.as_u16(),
                            content_type,
                            body,
                        });
                    }

                    let err = FetchError::Status {
                        url: url.to_string(),
                        status: status.as_u16(),
                    };
                    if !self.policy.should_retry_status(status) {
                        return Err(err);
                    }
                    err
                }
                Err(err) if err.is_retryable() => err,
                Err(err) => return Err(err),
            };

            attempt += 1;
            if attempt > self.policy.retries {
                return Err(retry);
            }

            let delay = self.policy.retry_delay(attempt);
            warn!(url, attempt, delay_ms = delay.as_millis() as u64, error = %retry, "retrying GET");
            sleep(delay);
        }
    }

    /// Whether `url` serves `content_type`.
    ///
    /// Any failure (status, timeout, connection) counts as not resolvable,
    /// and so does a response declaring any other content type.
    pub fn probe(&self, url: &str, content_type: &str) -> bool {
        match self.get(url, content_type) {
            Ok(document) => document.content_type.as_deref() == Some(content_type),
            Err(err) => {
                debug!(url, error = %err, "probe failed");
                false
            }
        }
    }
}
