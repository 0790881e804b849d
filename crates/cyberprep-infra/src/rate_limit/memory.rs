//! In-memory fixed-window rate limiter.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

use cyberprep_core::ports::{RateDecision, RateLimiter};

/// Allowed number of requests per window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    pub max_requests: u32,
    pub window: Duration,
}

impl Quota {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }
}

impl Default for Quota {
    fn default() -> Self {
        Self::new(60, Duration::from_secs(60))
    }
}

/// In-memory rate limiter configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Quota for routes without an override.
    pub default_quota: Quota,
    /// Per-route overrides, keyed by exact request path.
    pub route_quotas: HashMap<String, Quota>,
    /// Path prefixes that are never limited (static assets and the like).
    pub exempt_prefixes: Vec<String>,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            default_quota: Quota::default(),
            route_quotas: HashMap::new(),
            exempt_prefixes: [
                "/_next",
                "/static",
                "/favicon.ico",
                "/robots.txt",
                "/sitemap.xml",
                "/public",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl RateLimitConfig {
    pub fn with_default_quota(mut self, quota: Quota) -> Self {
        self.default_quota = quota;
        self
    }

    pub fn with_route_quota(mut self, route: impl Into<String>, quota: Quota) -> Self {
        self.route_quotas.insert(route.into(), quota);
        self
    }

    fn quota_for(&self, route_key: &str) -> Quota {
        self.route_quotas
            .get(route_key)
            .copied()
            .unwrap_or(self.default_quota)
    }

    fn is_exempt(&self, route_key: &str) -> bool {
        self.exempt_prefixes
            .iter()
            .any(|prefix| route_key.starts_with(prefix.as_str()))
    }
}

struct Bucket {
    count: u32,
    window_start: Instant,
}

/// Fixed-window counter keyed by `(client, route)`.
///
/// State lives for the life of the process and is never persisted.
/// Buckets are never evicted either, so the map grows with the number of
/// distinct clients seen.
pub struct InMemoryRateLimiter {
    config: RateLimitConfig,
    buckets: Mutex<HashMap<(String, String), Bucket>>,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            buckets: Mutex::new(HashMap::new()),
        }
    }

    /// Check a request as if it arrived at `now`.
    ///
    /// Rejected requests still increment the counter, so hammering the
    /// route does not shorten the wait.
    pub async fn check_at(&self, client_key: &str, route_key: &str, now: Instant) -> RateDecision {
        if self.config.is_exempt(route_key) {
            return RateDecision::Allowed;
        }

        let quota = self.config.quota_for(route_key);
        let mut buckets = self.buckets.lock().await;

        match buckets.entry((client_key.to_owned(), route_key.to_owned())) {
            Entry::Vacant(slot) => {
                slot.insert(Bucket {
                    count: 1,
                    window_start: now,
                });
                RateDecision::Allowed
            }
            Entry::Occupied(mut slot) => {
                let bucket = slot.get_mut();

                if now.saturating_duration_since(bucket.window_start) >= quota.window {
                    bucket.count = 1;
                    bucket.window_start = now;
                    return RateDecision::Allowed;
                }

                bucket.count = bucket.count.saturating_add(1);
                if bucket.count > quota.max_requests {
                    // Windows too long to represent as an Instant wait the full window.
                    let remaining = bucket
                        .window_start
                        .checked_add(quota.window)
                        .map_or(quota.window, |end| end.saturating_duration_since(now));
                    RateDecision::rejected_for(remaining)
                } else {
                    RateDecision::Allowed
                }
            }
        }
    }

    /// Number of `(client, route)` buckets currently held.
    pub async fn tracked_keys(&self) -> usize {
        self.buckets.lock().await.len()
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, client_key: &str, route_key: &str) -> RateDecision {
        let decision = self.check_at(client_key, route_key, Instant::now()).await;
        if !decision.is_allowed() {
            tracing::debug!(client = %client_key, route = %route_key, "Rate limit window exhausted");
        }
        decision
    }
}
