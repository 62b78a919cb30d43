//! Error Types
//!
//! One error for everything that can fail between a button press and the backend.

use serde::Deserialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (network down, CORS, aborted fetch)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// Non-2xx response; `message` is whatever the backend said, if anything
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },

    #[error("failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("payload of {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { size: usize, limit: usize },

    /// Rejected client-side before any request was sent
    #[error("{0}")]
    Validation(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StorageError {
    #[error("local storage is not available")]
    Unavailable,
    #[error("quota exceeded writing {key}")]
    QuotaExceeded { key: String },
    #[error("{0}")]
    Other(String),
}

/// Error body shapes the backend produces (`HTTPException` uses `detail`)
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
    message: Option<String>,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Build a status error from a raw response body
    pub fn from_status(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            message: extract_message(body),
        }
    }

    /// Text for a notification: the server's message if it sent one
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Status { message: Some(m), .. } => m.clone(),
            Self::Validation(m) => m.clone(),
            Self::Timeout(_) => "Request timed out".to_string(),
            _ => fallback.to_string(),
        }
    }
}

fn extract_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        Some(serde_json::Value::String(s)) => Some(s),
        // FastAPI validation errors: [{"msg": ...}, ...]
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .find_map(|i| i.get("msg").and_then(|m| m.as_str()))
            .map(str::to_string),
        _ => parsed.message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_message_extracted() {
        let err = ApiError::from_status(404, r#"{"detail":"User not found"}"#);
        assert_eq!(err.user_message("fallback"), "User not found");
    }

    #[test]
    fn test_message_field_extracted() {
        let err = ApiError::from_status(400, r#"{"message":"Email already registered"}"#);
        assert_eq!(err.user_message("fallback"), "Email already registered");
    }

    #[test]
    fn test_validation_detail_array() {
        let body = r#"{"detail":[{"loc":["body","email"],"msg":"field required"}]}"#;
        let err = ApiError::from_status(422, body);
        assert_eq!(err.user_message("fallback"), "field required");
    }

    #[test]
    fn test_unparsable_body_uses_fallback() {
        let err = ApiError::from_status(500, "Internal Server Error");
        assert_eq!(err.user_message("Failed to load groups"), "Failed to load groups");
        assert!(err.to_string().contains("500"));
    }
}
