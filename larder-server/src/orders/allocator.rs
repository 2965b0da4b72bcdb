//! Order number allocation
//!
//! Each allocation is one SQLite transaction: bump the `(year, month)` counter,
//! format the number, insert the order. SQLite admits a single writer at a
//! time, so two requests can never observe the same counter value.
//!
//! The `orders` primary key still guards against ids that entered the table
//! some other way (an upsert with a hand-picked id). On a duplicate the bumped
//! counter is committed and the next value is tried, up to `max_attempts`.

use chrono::NaiveDate;
use shared::models::{Order, OrderNumber};
use sqlx::SqlitePool;

use crate::db::repository::order::OrderData;
use crate::db::repository::{RepoError, order, order_sequence};
use crate::utils::{AppError, AppResult, ErrorCode, time};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

#[derive(Clone)]
pub struct OrderIdAllocator {
    pool: SqlitePool,
    max_attempts: u32,
}

impl OrderIdAllocator {
    pub fn new(pool: SqlitePool, max_attempts: u32) -> Self {
        Self {
            pool,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Assign the next order number for `today`'s month and persist the order
    pub async fn allocate_and_insert(&self, data: OrderData, today: NaiveDate) -> AppResult<Order> {
        let (year, month) = time::year_month(today);
        let (month_start, month_end) = time::month_bounds(year, month)?;

        for attempt in 1..=self.max_attempts {
            let mut tx = self.pool.begin().await.map_err(RepoError::from)?;

            let sequence =
                order_sequence::next_value(&mut *tx, year, month, month_start, month_end).await?;
            let order_id = OrderNumber::new(year, month, sequence).to_string();
            let order = data.clone().into_order(order_id, today);

            match order::insert(&mut *tx, &order).await {
                Ok(()) => {
                    tx.commit().await.map_err(RepoError::from)?;
                    tracing::debug!(order_id = %order.order_id, attempt, "Order number allocated");
                    return Ok(order);
                }
                Err(RepoError::Duplicate(_)) => {
                    // Keep the bump so the next attempt starts past the taken id
                    tx.commit().await.map_err(RepoError::from)?;
                    tracing::warn!(
                        order_id = %order.order_id,
                        attempt,
                        max_attempts = self.max_attempts,
                        "Order number already taken, retrying"
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::error!(year, month, attempts = self.max_attempts, "Order number allocation exhausted");
        Err(AppError::with_message(
            ErrorCode::OrderIdExhausted,
            format!(
                "Could not allocate an order number for {year}-{month:02} after {} attempts",
                self.max_attempts
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use rust_decimal::Decimal;

    fn data() -> OrderData {
        OrderData {
            name: "Flour".into(),
            category: "Dry goods".into(),
            supplier: "Mill & Co".into(),
            delivery: NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
            status: "Pending".into(),
            quantity: Decimal::from(20),
            unit: "kg".into(),
            price: Decimal::new(3550, 2),
        }
    }

    async fn pool() -> (tempfile::TempDir, SqlitePool) {
        let dir = tempfile::tempdir().unwrap();
        let db = DbService::new(&dir.path().join("larder.db")).await.unwrap();
        (dir, db.pool)
    }

    #[tokio::test]
    async fn skips_numbers_that_are_already_taken() {
        let (_dir, pool) = pool().await;
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        // Squat on the first two numbers of a month the counter has not seen yet
        let old = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        for id in ["ORD_2025_01_001", "ORD_2025_01_002"] {
            order::insert(&pool, &data().into_order(id.into(), old))
                .await
                .unwrap();
        }

        let allocator = OrderIdAllocator::new(pool.clone(), DEFAULT_MAX_ATTEMPTS);
        let order = allocator.allocate_and_insert(data(), today).await.unwrap();

        assert_eq!(order.order_id, "ORD_2025_01_003");
        assert_eq!(order.created, today);
        let counter = order_sequence::current_value(&pool, 2025, 1).await.unwrap();
        assert_eq!(counter, Some(3));
    }

    #[tokio::test]
    async fn gives_up_after_the_attempt_bound() {
        let (_dir, pool) = pool().await;
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let old = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        for seq in 1..=3 {
            let taken = data().into_order(OrderNumber::new(2025, 1, seq).to_string(), old);
            order::insert(&pool, &taken).await.unwrap();
        }

        let allocator = OrderIdAllocator::new(pool.clone(), 2);
        let err = allocator.allocate_and_insert(data(), today).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderIdExhausted);
        assert!(err.is_retryable());

        // The bumps were kept, so a later attempt lands on a free number
        let order = allocator.allocate_and_insert(data(), today).await.unwrap();
        assert_eq!(order.order_id, "ORD_2025_01_004");
    }

    #[tokio::test]
    async fn attempt_bound_is_at_least_one() {
        let pool = SqlitePool::connect_lazy("sqlite::memory:").unwrap();
        assert_eq!(OrderIdAllocator::new(pool, 0).max_attempts(), 1);
    }
}
