//! HTTP transport with retry and backoff
//!
//! This module handles all HTTP requests for the harvester:
//! - Building a client with a fixed browser-like user agent
//! - GET requests with bounded retries on transient failure
//! - Exponential backoff between attempts
//! - Error classification
//!
//! The retry policy is a cross-cutting concern attached here, not duplicated
//! per call site.

use crate::config::USER_AGENT;
use reqwest::{Client, Method, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Status codes treated as transient: rate limiting and server-side errors
const RETRY_STATUS: [u16; 5] = [429, 500, 502, 503, 504];

/// A response that completed at the HTTP level, whatever its status
#[derive(Debug)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Connection-level failure: no usable response was ever received
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request to {url} timed out after {attempts} attempt(s)")]
    Timeout { url: String, attempts: u32 },

    #[error("Connection to {url} failed after {attempts} attempt(s): {source}")]
    Connect {
        url: String,
        attempts: u32,
        source: reqwest::Error,
    },

    #[error("Request to {url} failed: {source}")]
    Other { url: String, source: reqwest::Error },
}

/// Retry tuning for transient failures
///
/// `max_attempts` is the total attempt count, first try included. Backoff
/// before retry n is `backoff_factor * 2^(n-1)`: with the 0.5s default the
/// delays run 0.5s, 1s, 2s, ...
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_factor: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_factor: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Delay before the retry following completed attempt `attempt` (1-based)
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.backoff_factor * 2u32.pow(attempt.saturating_sub(1))
    }
}

/// Whether a status code should be retried
pub fn is_retryable_status(status: StatusCode) -> bool {
    RETRY_STATUS.contains(&status.as_u16())
}

/// Retries are restricted to idempotent read methods. No state-mutating
/// request exists in this system, but the constraint holds for extensibility.
pub fn is_idempotent(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD)
}

/// Builds the HTTP client used for all page fetches
///
/// Uses a fixed browser User-Agent to avoid trivial blocking, and enables
/// gzip/brotli. Connections may be pooled across requests; that is internal
/// to the client and invisible to callers.
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL, retrying transient failures with exponential backoff
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | HTTP 429 / 5xx in retry set | Retry up to `max_attempts`, then return last response |
/// | Timeout | Retry up to `max_attempts`, then `TransportError::Timeout` |
/// | Connection failure | Retry up to `max_attempts`, then `TransportError::Connect` |
/// | Any other status (404, ...) | Returned immediately, no retry |
/// | Non-idempotent method | Single attempt, whatever the outcome |
///
/// A completed response is always handed back to the caller with its status
/// code; disposition of non-200 statuses is the caller's decision.
pub async fn fetch_with_retry(
    client: &Client,
    method: Method,
    url: &str,
    policy: &RetryPolicy,
) -> Result<FetchedPage, TransportError> {
    let retryable_method = is_idempotent(&method);
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        let may_retry = retryable_method && attempt < max_attempts;

        match client.request(method.clone(), url).send().await {
            Ok(response) => {
                let status = response.status();

                if is_retryable_status(status) && may_retry {
                    tracing::debug!(
                        "HTTP {} from {} (attempt {}/{}), backing off",
                        status.as_u16(),
                        url,
                        attempt,
                        max_attempts
                    );
                    tokio::time::sleep(policy.backoff_delay(attempt)).await;
                    attempt += 1;
                    continue;
                }

                // Body read failures after headers are treated like any
                // other connection-level failure.
                match response.text().await {
                    Ok(body) => {
                        return Ok(FetchedPage {
                            status: status.as_u16(),
                            body,
                        })
                    }
                    Err(e) if may_retry => {
                        tracing::debug!("Body read failed for {}: {}, retrying", url, e);
                        tokio::time::sleep(policy.backoff_delay(attempt)).await;
                        attempt += 1;
                    }
                    Err(e) => {
                        return Err(TransportError::Other {
                            url: url.to_string(),
                            source: e,
                        })
                    }
                }
            }

            Err(e) if (e.is_timeout() || e.is_connect()) && may_retry => {
                tracing::debug!(
                    "Transient failure for {} (attempt {}/{}): {}",
                    url,
                    attempt,
                    max_attempts,
                    e
                );
                tokio::time::sleep(policy.backoff_delay(attempt)).await;
                attempt += 1;
            }

            Err(e) => {
                let url = url.to_string();
                return Err(if e.is_timeout() {
                    TransportError::Timeout { url, attempts: attempt }
                } else if e.is_connect() {
                    TransportError::Connect {
                        url,
                        attempts: attempt,
                        source: e,
                    }
                } else {
                    TransportError::Other { url, source: e }
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(Duration::from_secs(15));
        assert!(client.is_ok());
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_delay(1), Duration::from_millis(500));
        assert_eq!(policy.backoff_delay(2), Duration::from_millis(1000));
        assert_eq!(policy.backoff_delay(3), Duration::from_millis(2000));
    }

    #[test]
    fn test_retryable_statuses() {
        for code in [429u16, 500, 502, 503, 504] {
            assert!(is_retryable_status(StatusCode::from_u16(code).unwrap()));
        }
        for code in [200u16, 301, 404, 410, 501] {
            assert!(!is_retryable_status(StatusCode::from_u16(code).unwrap()));
        }
    }

    #[test]
    fn test_idempotent_methods_only() {
        assert!(is_idempotent(&Method::GET));
        assert!(is_idempotent(&Method::HEAD));
        assert!(!is_idempotent(&Method::POST));
        assert!(!is_idempotent(&Method::PUT));
        assert!(!is_idempotent(&Method::DELETE));
    }

    #[test]
    fn test_fetched_page_success() {
        let ok = FetchedPage {
            status: 200,
            body: String::new(),
        };
        let not_found = FetchedPage {
            status: 404,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!not_found.is_success());
    }

    // Retry sequencing against live responses is covered by the wiremock
    // integration tests.
}
