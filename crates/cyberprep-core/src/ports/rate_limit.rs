//! Rate limiting port.

use async_trait::async_trait;
use std::time::Duration;

/// Rate limiter trait - abstraction over rate limiting backends.
///
/// Checking is infallible: a backend either lets the request through or
/// rejects it with a retry hint.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Count a request from `client_key` against `route_key` and decide on it.
    async fn check(&self, client_key: &str, route_key: &str) -> RateDecision;
}

/// Outcome of a rate limit or cooldown check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    Rejected { retry_after_secs: u64 },
}

impl RateDecision {
    /// Build a rejection from the time left until the window closes,
    /// rounding partial seconds up.
    pub fn rejected_for(remaining: Duration) -> Self {
        let millis = remaining.as_millis();
        let secs = millis.div_ceil(1000);
        RateDecision::Rejected {
            retry_after_secs: u64::try_from(secs).unwrap_or(u64::MAX),
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, RateDecision::Allowed)
    }
}
