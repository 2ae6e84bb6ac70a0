// Shared transport configuration for building reqwest::Client instances.
//
// Timeout, user agent, default headers, and the throttle retry policy
// live here so the client module only deals with request mechanics.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::HeaderMap;

use crate::error::Error;

/// Status code the Statuspage API answers with when a caller should back off.
pub const THROTTLE_STATUS: u16 = 420;

/// Linear retry policy applied to throttled responses.
///
/// The wait before retry `n` (1-based) is `min_wait * n`, clamped to
/// `[min_wait, max_wait]`. Only responses whose status equals
/// `retry_status` are retried; transport errors never are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub min_wait: Duration,
    pub max_wait: Duration,
    pub retry_status: u16,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 10,
            min_wait: Duration::from_secs(30),
            max_wait: Duration::from_secs(120),
            retry_status: THROTTLE_STATUS,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Wait before the given retry attempt (1-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.min_wait
            .saturating_mul(retry.max(1))
            .clamp(self.min_wait, self.max_wait.max(self.min_wait))
    }

    /// Whether a response with this status should be retried.
    pub fn should_retry(&self, status: StatusCode) -> bool {
        status.as_u16() == self.retry_status
    }
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub user_agent: String,
    pub retry: RetryPolicy,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!("statuspage-provider/", env!("CARGO_PKG_VERSION")).to_owned(),
            retry: RetryPolicy::default(),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` carrying the given default headers.
    ///
    /// Used by [`StatuspageClient`](crate::StatuspageClient) to inject the
    /// `Authorization: OAuth <key>` header on every request.
    pub fn build_client_with_headers(&self, headers: HeaderMap) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| Error::ClientBuild(e.to_string()))
    }

    /// Replace the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}
