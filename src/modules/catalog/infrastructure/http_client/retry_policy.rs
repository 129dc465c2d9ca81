//! Retry and backoff rules for catalog requests.

use std::time::Duration;

/// Configuration for HTTP retry behavior
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Base delay between retries (will be adjusted based on headers)
    pub base_delay: Duration,
    /// Maximum delay to wait (prevents excessive waits)
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl RetryPolicy {
    /// TMDB allows short bursts; a couple of quick retries covers transient 5xx.
    pub fn tmdb() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
        }
    }

    /// Calculate delay for next retry attempt
    pub fn calculate_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        // If server provided Retry-After header, respect it
        if let Some(server_delay) = retry_after {
            return server_delay.min(self.max_delay);
        }

        let multiplier = self.backoff_multiplier.powi(attempt as i32);
        let delay = Duration::from_millis((self.base_delay.as_millis() as f64 * multiplier) as u64);
        delay.min(self.max_delay)
    }
}

/// Information extracted from HTTP 429 responses
#[derive(Debug, Clone, Default)]
pub struct RateLimitInfo {
    /// How long to wait before next request (from Retry-After header)
    pub retry_after: Option<Duration>,
    /// Number of requests remaining (from X-RateLimit-Remaining header)
    pub remaining: Option<u32>,
}

impl RateLimitInfo {
    pub fn from_headers(headers: &reqwest::header::HeaderMap) -> Self {
        let retry_after = headers
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_secs);

        let remaining = headers
            .get("x-ratelimit-remaining")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.trim().parse::<u32>().ok());

        Self {
            retry_after,
            remaining,
        }
    }
}

/// Statuses worth another attempt.
pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 425 | 429 | 500..=599)
}

/// Network errors are potentially retryable
pub fn is_retryable_error(error: &reqwest::Error) -> bool {
    match error.status() {
        Some(status) => is_retryable_status(status.as_u16()),
        None => error.is_timeout() || error.is_connect(),
    }
}
