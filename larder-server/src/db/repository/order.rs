//! Purchase Order Repository

use super::{RepoError, RepoResult, decode_date, decode_decimal, encode_date};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::{ORDER_STATUS_DELIVERED, Order};
use sqlx::{Sqlite, SqlitePool};

const COLUMNS: &str =
    "order_id, name, category, supplier, created, delivery, status, quantity, unit, price";

/// Parsed, validated order fields (everything except `order_id` and `created`)
#[derive(Debug, Clone, PartialEq)]
pub struct OrderData {
    pub name: String,
    pub category: String,
    pub supplier: String,
    pub delivery: NaiveDate,
    pub status: String,
    pub quantity: Decimal,
    pub unit: String,
    pub price: Decimal,
}

impl OrderData {
    pub fn into_order(self, order_id: String, created: NaiveDate) -> Order {
        Order {
            order_id,
            name: self.name,
            category: self.category,
            supplier: self.supplier,
            created,
            delivery: self.delivery,
            status: self.status,
            quantity: self.quantity,
            unit: self.unit,
            price: self.price,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    order_id: String,
    name: String,
    category: String,
    supplier: String,
    created: String,
    delivery: String,
    status: String,
    quantity: String,
    unit: String,
    price: String,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepoError;

    fn try_from(row: OrderRow) -> RepoResult<Self> {
        Ok(Order {
            created: decode_date("created", &row.created)?,
            delivery: decode_date("delivery", &row.delivery)?,
            quantity: decode_decimal("quantity", &row.quantity)?,
            price: decode_decimal("price", &row.price)?,
            order_id: row.order_id,
            name: row.name,
            category: row.category,
            supplier: row.supplier,
            status: row.status,
            unit: row.unit,
        })
    }
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Order>> {
    let rows = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {COLUMNS} FROM orders ORDER BY created DESC, order_id DESC"
    ))
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(Order::try_from).collect()
}

pub async fn find_by_id(pool: &SqlitePool, order_id: &str) -> RepoResult<Option<Order>> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {COLUMNS} FROM orders WHERE order_id = ?"
    ))
    .bind(order_id)
    .fetch_optional(pool)
    .await?;
    row.map(Order::try_from).transpose()
}

/// Insert a fully-formed order
///
/// A taken `order_id` surfaces as [`RepoError::Duplicate`].
pub async fn insert<'e, E>(executor: E, order: &Order) -> RepoResult<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO orders (order_id, name, category, supplier, created, delivery, status, quantity, unit, price) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    )
    .bind(&order.order_id)
    .bind(&order.name)
    .bind(&order.category)
    .bind(&order.supplier)
    .bind(encode_date(order.created))
    .bind(encode_date(order.delivery))
    .bind(&order.status)
    .bind(order.quantity.to_string())
    .bind(&order.unit)
    .bind(order.price.to_string())
    .execute(executor)
    .await?;
    Ok(())
}

/// Create-or-replace by `order_id`
///
/// An existing row keeps its `created` date; a new row gets `created_if_new`.
pub async fn upsert(
    pool: &SqlitePool,
    order_id: &str,
    data: OrderData,
    created_if_new: NaiveDate,
) -> RepoResult<Order> {
    sqlx::query(
        "INSERT INTO orders (order_id, name, category, supplier, created, delivery, status, quantity, unit, price) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10) \
         ON CONFLICT(order_id) DO UPDATE SET \
           name = excluded.name, category = excluded.category, supplier = excluded.supplier, \
           delivery = excluded.delivery, status = excluded.status, quantity = excluded.quantity, \
           unit = excluded.unit, price = excluded.price",
    )
    .bind(order_id)
    .bind(&data.name)
    .bind(&data.category)
    .bind(&data.supplier)
    .bind(encode_date(created_if_new))
    .bind(encode_date(data.delivery))
    .bind(&data.status)
    .bind(data.quantity.to_string())
    .bind(&data.unit)
    .bind(data.price.to_string())
    .execute(pool)
    .await?;
    find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| RepoError::Database(format!("Failed to save order {order_id}")))
}

/// Idempotent: deleting a missing id is not an error
pub async fn delete(pool: &SqlitePool, order_id: &str) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM orders WHERE order_id = ?")
        .bind(order_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Prices of orders whose status is exactly "Delivered"
///
/// Summed by the caller in decimal arithmetic; SQLite would sum TEXT as REAL.
pub async fn delivered_prices(pool: &SqlitePool) -> RepoResult<Vec<Decimal>> {
    let prices: Vec<String> = sqlx::query_scalar("SELECT price FROM orders WHERE status = ?")
        .bind(ORDER_STATUS_DELIVERED)
        .fetch_all(pool)
        .await?;
    prices
        .iter()
        .map(|raw| decode_decimal("price", raw))
        .collect()
}
