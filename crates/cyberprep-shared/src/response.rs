//! Response bodies returned by the API.

use serde::{Deserialize, Serialize};

/// Body of a `201 Created` answer to a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub success: bool,
}

impl CreatedResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Error body. `retryAfter` is only present on `429` answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(rename = "retryAfter", skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            retry_after: None,
        }
    }

    pub fn invalid_payload() -> Self {
        Self::new("Invalid payload")
    }

    pub fn too_many_requests(retry_after: u64) -> Self {
        Self {
            retry_after: Some(retry_after),
            ..Self::new("Too many requests")
        }
    }

    pub fn server_error() -> Self {
        Self::new("Server error")
    }
}
