//! Repository Module
//!
//! Free async functions over a SQLite pool (or a transaction where the caller
//! needs several statements to commit together). Decimals and dates are stored
//! as TEXT and converted at this boundary.

pub mod inventory;
pub mod order;
pub mod order_sequence;
pub mod supplier;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            sqlx::Error::RowNotFound => RepoError::NotFound(err.to_string()),
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// TEXT 列 → Decimal
pub(crate) fn decode_decimal(column: &str, raw: &str) -> RepoResult<Decimal> {
    Decimal::from_str(raw)
        .map_err(|e| RepoError::Database(format!("Corrupt {column} value '{raw}': {e}")))
}

/// TEXT 列 → NaiveDate
pub(crate) fn decode_date(column: &str, raw: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| RepoError::Database(format!("Corrupt {column} value '{raw}': {e}")))
}

/// NaiveDate → TEXT 列
pub(crate) fn encode_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
