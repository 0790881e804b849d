//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use cyberprep_infra::{Quota, RateLimitConfig};

use crate::handlers::{PROPOSE_ROUTE, REPORT_ROUTE};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the collection and cooldown files.
    pub data_dir: PathBuf,
    pub rate_limit: RateLimitConfig,
    /// Minimum time between two accepted proposals from one client.
    pub propose_cooldown: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let default_quota = Quota::new(
            env_or("RATE_LIMIT_MAX_REQUESTS", 60),
            Duration::from_secs(env_or("RATE_LIMIT_WINDOW_SECS", 60)),
        );
        let submission_quota = Quota::new(
            env_or("SUBMISSION_LIMIT_MAX_REQUESTS", 1),
            Duration::from_secs(env_or("SUBMISSION_LIMIT_WINDOW_SECS", 60)),
        );

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env_or("PORT", 8080),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            rate_limit: submission_rate_limits(default_quota, submission_quota),
            propose_cooldown: Duration::from_secs(env_or("PROPOSE_COOLDOWN_SECS", 60)),
        }
    }
}

/// Default quota for every route, with the stricter quota on both write routes.
pub fn submission_rate_limits(default_quota: Quota, submission_quota: Quota) -> RateLimitConfig {
    RateLimitConfig::default()
        .with_default_quota(default_quota)
        .with_route_quota(PROPOSE_ROUTE, submission_quota)
        .with_route_quota(REPORT_ROUTE, submission_quota)
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    parse_or(env::var(key).ok(), default)
}

/// Parse `raw`, keeping `default` when it is unset or does not parse.
fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}
