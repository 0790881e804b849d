//! # CyberPrep Infrastructure
//!
//! Concrete implementations of the ports defined in `cyberprep-core`.
//!
//! - `rate_limit` - process-local fixed-window limiter keyed by client and route
//! - `collection` - append-only collections stored as JSON array files
//! - `cooldown` - durable per-client cooldown stored as a JSON object file

pub mod collection;
pub mod cooldown;
pub mod rate_limit;

mod json_store;

pub use collection::JsonFileCollection;
pub use cooldown::JsonFileCooldown;
pub use rate_limit::{InMemoryRateLimiter, Quota, RateLimitConfig};
