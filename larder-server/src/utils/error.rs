//! 统一错误处理
//!
//! Handlers and services return [`AppResult`]; the shared [`AppError`]
//! renders itself as an [`ApiResponse`] body with the status from its
//! [`ErrorCode`].
//!
//! # 使用示例
//!
//! ```ignore
//! Err(AppError::with_message(ErrorCode::OrderNotFound, "Order ORD_2025_01_001 not found"))
//! ```

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

use crate::db::repository::RepoError;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn repo_errors_keep_their_meaning() {
        let err: AppError = RepoError::Database("disk I/O error".into()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err: AppError = RepoError::Duplicate("order ORD_2025_01_001".into()).into();
        assert_eq!(err.http_status(), StatusCode::CONFLICT);

        let err: AppError = RepoError::NotFound("Supplier 3 not found".into()).into();
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
    }
}
