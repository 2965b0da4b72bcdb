//! Error types and API response structures

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the primary error type shared by every layer above the store:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details for debugging
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    /// Whether the caller may retry the same request unchanged
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a validation error bound to a single field
    pub fn invalid_field(field: &str, msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg).with_detail("field", field)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AlreadyExists, msg)
    }
}

/// Unified API error body
///
/// - `code`: Error code
/// - `message`: Human-readable message
/// - `details`: Additional error details (field, resource, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Numeric error code
    pub code: u16,
    /// Human-readable message
    pub message: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl ApiResponse {
    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::error(&self);

        // Log system errors
        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::OrderNotFound);
        assert_eq!(err.code, ErrorCode::OrderNotFound);
        assert_eq!(err.message, "Order not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::validation("Missing required fields")
            .with_detail("field", "name")
            .with_detail("reason", "required");

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "name");
        assert_eq!(details.get("reason").unwrap(), "required");
    }

    #[test]
    fn test_invalid_field_records_field() {
        let err = AppError::invalid_field("quantity", "quantity must be a decimal number");
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.unwrap().get("field").unwrap(), "quantity");
    }

    #[test]
    fn test_app_error_http_status() {
        assert_eq!(
            AppError::new(ErrorCode::OrderNotFound).http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::new(ErrorCode::OrderIdExhausted).http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert!(AppError::new(ErrorCode::OrderIdExhausted).is_retryable());
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::OrderNotFound, "Order ORD_2025_01_001 not found");
        assert_eq!(format!("{}", err), "Order ORD_2025_01_001 not found");
    }

    #[test]
    fn test_api_response_error() {
        let err = AppError::with_message(ErrorCode::SupplierNotFound, "Supplier 9 not found")
            .with_detail("id", 9);
        let response = ApiResponse::error(&err);

        assert_eq!(response.code, 7001);
        assert_eq!(response.message, "Supplier 9 not found");
        assert!(response.details.is_some());
    }

    #[test]
    fn test_api_response_serialize() {
        let err = AppError::new(ErrorCode::OrderIdExhausted);
        let json = serde_json::to_string(&ApiResponse::error(&err)).unwrap();
        assert!(json.contains("\"code\":4003"));
        assert!(!json.contains("details"));
    }
}
