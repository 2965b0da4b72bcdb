//! Per-month order number counter
//!
//! One row per `(year, month)`. The first bump of a month seeds the counter
//! from the orders already created in that month, so databases that predate
//! the counter continue their numbering instead of restarting at 1.

use super::{RepoResult, encode_date};
use chrono::NaiveDate;
use sqlx::Sqlite;

/// Atomically advance the counter for `(year, month)` and return the new value
///
/// `month_start..month_end` bounds the `created` dates used to seed a new row.
/// Run inside a transaction together with the order insert so that the value
/// is never observed by two allocators.
pub async fn next_value<'e, E>(
    executor: E,
    year: i32,
    month: u32,
    month_start: NaiveDate,
    month_end: NaiveDate,
) -> RepoResult<i64>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let value: i64 = sqlx::query_scalar(
        "INSERT INTO order_sequence (year, month, last_value) \
         VALUES (?1, ?2, (SELECT COUNT(*) FROM orders WHERE created >= ?3 AND created < ?4) + 1) \
         ON CONFLICT(year, month) DO UPDATE SET last_value = last_value + 1 \
         RETURNING last_value",
    )
    .bind(year)
    .bind(month)
    .bind(encode_date(month_start))
    .bind(encode_date(month_end))
    .fetch_one(executor)
    .await?;
    Ok(value)
}

/// Current counter value, `None` before the first allocation of the month
pub async fn current_value<'e, E>(executor: E, year: i32, month: u32) -> RepoResult<Option<i64>>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let value: Option<i64> =
        sqlx::query_scalar("SELECT last_value FROM order_sequence WHERE year = ?1 AND month = ?2")
            .bind(year)
            .bind(month)
            .fetch_optional(executor)
            .await?;
    Ok(value)
}
