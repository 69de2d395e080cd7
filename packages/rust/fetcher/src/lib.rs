//! Resilient HTTP fetching with bounded retry and exponential backoff.
//!
//! The harvest pipeline only needs "GET this URL, give me the body or tell me
//! it failed". [`Fetch`] is that seam; [`HttpFetcher`] implements it over
//! `reqwest` with a [`RetryPolicy`] that absorbs rate limiting, gateway errors
//! and transport failures.

mod retry;

use std::future::Future;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use url::Url;

use reviewharvest_shared::{HarvestError, HttpConfig, Result};

pub use retry::{RetryPolicy, is_retryable_status};

/// Accept header sent with every request.
const ACCEPT_JSON: &str = "application/json,text/plain,*/*";

// ---------------------------------------------------------------------------
// FetchError
// ---------------------------------------------------------------------------

/// Why a fetch produced no body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The final attempt failed below HTTP: connect, timeout or body read.
    #[error("{url}: transport failure after {attempts} attempts: {message}")]
    Transport {
        url: String,
        attempts: u32,
        message: String,
    },

    /// A non-retryable HTTP status; no further attempts were made.
    #[error("{url}: HTTP {status}")]
    Status { url: String, status: u16 },

    /// Every attempt budget was spent and the final one hit a retryable status.
    #[error("{url}: gave up after {attempts} attempts (last: HTTP {status})")]
    Exhausted {
        url: String,
        attempts: u32,
        status: u16,
    },
}

/// Outcome of one failed but retryable attempt.
#[derive(Debug)]
enum AttemptFailure {
    Transport(String),
    Status(StatusCode),
}

impl std::fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => f.write_str(message),
            Self::Status(status) => write!(f, "HTTP {status}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Fetch trait
// ---------------------------------------------------------------------------

/// Body-or-failure GET, the only network primitive the pipeline uses.
pub trait Fetch {
    /// GET `url` with `query` appended. Never panics; every failure path is a
    /// [`FetchError`].
    fn fetch(
        &self,
        url: &Url,
        query: &[(&str, &str)],
    ) -> impl Future<Output = std::result::Result<String, FetchError>> + Send;
}

// ---------------------------------------------------------------------------
// HttpFetcher
// ---------------------------------------------------------------------------

/// `reqwest`-backed fetcher with retry/backoff.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    policy: RetryPolicy,
}

impl HttpFetcher {
    /// Build a fetcher from the `[http]` config section.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| HarvestError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            policy: RetryPolicy::from(config),
        })
    }

    /// Replace the retry policy.
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(
        &self,
        url: &Url,
        query: &[(&str, &str)],
    ) -> std::result::Result<String, FetchError> {
        let target = with_query(url, query);
        let max_attempts = self.policy.max_attempts.max(1);
        let mut last = AttemptFailure::Transport(String::from("no attempt made"));

        for attempt in 0..max_attempts {
            debug!(url = %target, attempt, "GET");

            match self.client.get(target.clone()).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status == StatusCode::OK {
                        match response.text().await {
                            Ok(body) => return Ok(body),
                            Err(e) => {
                                last = AttemptFailure::Transport(format!("body read failed: {e}"))
                            }
                        }
                    } else if is_retryable_status(status.as_u16()) {
                        last = AttemptFailure::Status(status);
                    } else {
                        debug!(url = %target, %status, "non-retryable status");
                        return Err(FetchError::Status {
                            url: target.to_string(),
                            status: status.as_u16(),
                        });
                    }
                }
                Err(e) => last = AttemptFailure::Transport(e.to_string()),
            }

            if attempt + 1 < max_attempts {
                let delay = self.policy.backoff(attempt);
                warn!(
                    url = %target,
                    attempt = attempt + 1,
                    backoff_ms = delay.as_millis() as u64,
                    reason = %last,
                    "request failed, retrying after backoff"
                );
                tokio::time::sleep(delay).await;
            }
        }

        let url = target.to_string();
        Err(match last {
            AttemptFailure::Transport(message) => FetchError::Transport {
                url,
                attempts: max_attempts,
                message,
            },
            AttemptFailure::Status(status) => FetchError::Exhausted {
                url,
                attempts: max_attempts,
                status: status.as_u16(),
            },
        })
    }
}

/// Append query pairs to a URL, keeping any it already has.
fn with_query(url: &Url, query: &[(&str, &str)]) -> Url {
    let mut target = url.clone();
    if !query.is_empty() {
        target.query_pairs_mut().extend_pairs(query);
    }
    target
}
