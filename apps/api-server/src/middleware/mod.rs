//! Middleware modules.

pub mod client_key;
pub mod error;
pub mod rate_limit;

pub use client_key::ClientKey;
pub use error::{AppError, AppResult};
pub use rate_limit::RateLimitMiddleware;
