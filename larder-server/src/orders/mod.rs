//! Order Lifecycle Manager
//!
//! Creation goes through the [`OrderIdAllocator`]; everything after that is
//! keyed by the allocated order number.
//!
//! `update` is an upsert by key: replacing an existing order keeps its
//! `created` date, and an unknown order number inserts a new order dated today.
//! The order number itself never changes.

pub mod allocator;

pub use allocator::OrderIdAllocator;

use chrono::NaiveDate;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use shared::models::{DeliveredRevenue, ORDER_STATUS_PENDING, Order, OrderDraft, OrderReplace};
use sqlx::SqlitePool;

use crate::db::repository::order;
use crate::db::repository::order::OrderData;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, parse_non_negative, parse_positive, validate_required_text,
    validate_text,
};
use crate::utils::{AppError, AppResult, ErrorCode, time};

fn order_not_found(order_id: &str) -> AppError {
    AppError::with_message(
        ErrorCode::OrderNotFound,
        format!("Order {order_id} not found"),
    )
    .with_detail("order_id", order_id)
}

/// Exact sum; overflow is reported as `ValueOutOfRange`
fn sum_prices(prices: &[Decimal]) -> AppResult<Decimal> {
    prices.iter().try_fold(Decimal::ZERO, |total, price| {
        total.checked_add(*price).ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ValueOutOfRange,
                "Delivered revenue exceeds the representable range",
            )
        })
    })
}

/// Validate a draft into storable fields
fn parse_draft(draft: OrderDraft) -> AppResult<OrderData> {
    validate_required_text(&draft.name, "name", MAX_NAME_LEN)?;
    validate_text(&draft.category, "category", MAX_NAME_LEN)?;
    validate_text(&draft.supplier, "supplier", MAX_NAME_LEN)?;
    validate_text(&draft.unit, "unit", MAX_SHORT_TEXT_LEN)?;
    let delivery = time::parse_date(&draft.delivery, "delivery")?;
    let quantity = parse_positive(&draft.quantity, "quantity")?;
    let price = parse_non_negative(&draft.price, "price")?;

    let status = match draft.status.as_deref().map(str::trim) {
        None | Some("") => ORDER_STATUS_PENDING.to_string(),
        Some(status) => {
            validate_text(status, "status", MAX_SHORT_TEXT_LEN)?;
            status.to_string()
        }
    };

    Ok(OrderData {
        name: draft.name.trim().to_string(),
        category: draft.category.trim().to_string(),
        supplier: draft.supplier.trim().to_string(),
        delivery,
        status,
        quantity,
        unit: draft.unit.trim().to_string(),
        price,
    })
}

#[derive(Clone)]
pub struct OrderService {
    pool: SqlitePool,
    allocator: OrderIdAllocator,
    tz: Tz,
}

impl OrderService {
    pub fn new(pool: SqlitePool, max_attempts: u32, tz: Tz) -> Self {
        Self {
            allocator: OrderIdAllocator::new(pool.clone(), max_attempts),
            pool,
            tz,
        }
    }

    fn today(&self) -> NaiveDate {
        time::today(self.tz)
    }

    pub async fn create(&self, draft: OrderDraft) -> AppResult<Order> {
        self.create_on(draft, self.today()).await
    }

    /// Create with an explicit business date (drives both `created` and the order number)
    pub async fn create_on(&self, draft: OrderDraft, today: NaiveDate) -> AppResult<Order> {
        let data = parse_draft(draft)?;
        let order = self.allocator.allocate_and_insert(data, today).await?;
        tracing::info!(order_id = %order.order_id, status = %order.status, "Order created");
        Ok(order)
    }

    pub async fn get(&self, order_id: &str) -> AppResult<Order> {
        order::find_by_id(&self.pool, order_id)
            .await?
            .ok_or_else(|| order_not_found(order_id))
    }

    pub async fn list_all(&self) -> AppResult<Vec<Order>> {
        Ok(order::find_all(&self.pool).await?)
    }

    pub async fn update(&self, order_id: &str, replace: OrderReplace) -> AppResult<Order> {
        self.update_on(order_id, replace, self.today()).await
    }

    /// Full replace by key, inserting when the key is new
    pub async fn update_on(
        &self,
        order_id: &str,
        replace: OrderReplace,
        today: NaiveDate,
    ) -> AppResult<Order> {
        let order_id = order_id.trim();
        validate_required_text(order_id, "order_id", MAX_SHORT_TEXT_LEN)?;
        if let Some(body_id) = replace.order_id.as_deref().map(str::trim)
            && !body_id.is_empty()
            && body_id != order_id
        {
            return Err(AppError::with_message(
                ErrorCode::OrderIdMismatch,
                format!("Order number cannot change from {order_id} to {body_id}"),
            )
            .with_detail("field", "order_id"));
        }

        let data = parse_draft(replace.fields)?;
        let order = order::upsert(&self.pool, order_id, data, today).await?;
        tracing::info!(order_id = %order.order_id, status = %order.status, "Order saved");
        Ok(order)
    }

    /// Idempotent; returns whether a row was removed
    pub async fn delete(&self, order_id: &str) -> AppResult<bool> {
        let removed = order::delete(&self.pool, order_id).await?;
        if removed {
            tracing::info!(order_id, "Order deleted");
        }
        Ok(removed)
    }

    /// Sum of `price` over orders whose status is exactly "Delivered"
    pub async fn total_delivered_revenue(&self) -> AppResult<DeliveredRevenue> {
        let prices = order::delivered_prices(&self.pool).await?;
        let delivered_orders = prices.len() as i64;
        let total = sum_prices(&prices)?;
        Ok(DeliveredRevenue {
            total,
            delivered_orders,
        })
    }
}
