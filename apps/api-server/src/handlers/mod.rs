//! HTTP handlers and route configuration.

mod health;
mod propose;
mod report;

#[cfg(test)]
mod tests;

use actix_web::web;
use serde_json::Value;
use std::sync::Arc;

use cyberprep_core::ports::RateLimiter;

use crate::middleware::{AppError, RateLimitMiddleware};

pub const PROPOSE_ROUTE: &str = "/api/propose-question";
pub const REPORT_ROUTE: &str = "/api/report-question";

/// Configure all application routes.
///
/// Everything under `/api` passes through the rate limiter first.
pub fn configure_routes(cfg: &mut web::ServiceConfig, limiter: Arc<dyn RateLimiter>) {
    cfg.service(
        web::scope("/api")
            .wrap(RateLimitMiddleware::new(limiter))
            .route("/health", web::get().to(health::health_check))
            .route("/propose-question", web::post().to(propose::propose_question))
            .route("/report-question", web::post().to(report::report_question)),
    );
}

/// Parse a raw request body. Anything that is not JSON is a client error.
fn parse_payload(body: &[u8]) -> Result<Value, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::InvalidPayload(e.to_string()))
}
