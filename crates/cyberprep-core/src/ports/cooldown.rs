use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;

use super::RateDecision;
use crate::error::StoreError;

/// The write a cooldown guards. It only runs once the client has been admitted.
pub type Admission<'a> = Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + 'a>>;

/// Per-client cooldown between accepted submissions.
///
/// Unlike [`super::RateLimiter`], a cooldown only advances when a submission
/// is accepted, and durable implementations survive restarts.
#[async_trait]
pub trait Cooldown: Send + Sync {
    /// Decide whether `client_key` may submit now. Does not record anything.
    async fn check(&self, client_key: &str) -> RateDecision;

    /// Check `client_key`, run `admit` if allowed, and record the acceptance
    /// once `admit` succeeds.
    ///
    /// Check, write and record happen as one step: concurrent gates for the
    /// same client admit at most one of them. When `admit` fails its error is
    /// returned and nothing is recorded.
    async fn gate(&self, client_key: &str, admit: Admission<'_>)
        -> Result<RateDecision, StoreError>;
}
