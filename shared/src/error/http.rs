//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::OrderNotFound
            | Self::InventoryItemNotFound
            | Self::SupplierNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists => StatusCode::CONFLICT,

            // 503 Service Unavailable (transient errors, client can retry)
            Self::OrderIdExhausted => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_statuses() {
        assert_eq!(ErrorCode::NotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::OrderNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::InventoryItemNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::SupplierNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_client_errors() {
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::InvalidStatusCategory.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::OrderIdMismatch.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ErrorCode::AlreadyExists.http_status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::ValueOutOfRange.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_server_errors() {
        assert_eq!(
            ErrorCode::OrderIdExhausted.http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
