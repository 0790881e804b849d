//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod collection;
mod cooldown;
mod rate_limit;

pub use collection::Collection;
pub use cooldown::{Admission, Cooldown};
pub use rate_limit::{RateDecision, RateLimiter};
