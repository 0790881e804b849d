//! Error handling - maps failures to the API's fixed error bodies.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header};
use cyberprep_shared::ErrorResponse;
use std::fmt;

/// Application-level error type.
///
/// Client-facing bodies never carry internal detail; the detail is only
/// logged.
#[derive(Debug)]
pub enum AppError {
    InvalidPayload(String),
    TooManyRequests { retry_after: u64 },
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidPayload(msg) => write!(f, "Invalid payload: {}", msg),
            AppError::TooManyRequests { retry_after } => {
                write!(f, "Too many requests, retry after {}s", retry_after)
            }
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            AppError::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::InvalidPayload(detail) => {
                tracing::debug!("Rejected payload: {}", detail);
                HttpResponse::BadRequest().json(ErrorResponse::invalid_payload())
            }
            AppError::TooManyRequests { retry_after } => HttpResponse::TooManyRequests()
                .insert_header((header::RETRY_AFTER, retry_after.to_string()))
                .json(ErrorResponse::too_many_requests(*retry_after)),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                HttpResponse::InternalServerError().json(ErrorResponse::server_error())
            }
        }
    }
}

impl From<cyberprep_core::DomainError> for AppError {
    fn from(err: cyberprep_core::DomainError) -> Self {
        match err {
            cyberprep_core::DomainError::Validation(msg) => AppError::InvalidPayload(msg),
        }
    }
}

impl From<cyberprep_core::StoreError> for AppError {
    fn from(err: cyberprep_core::StoreError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
