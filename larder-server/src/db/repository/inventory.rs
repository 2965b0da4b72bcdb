//! Inventory Item Repository

use super::{RepoError, RepoResult, decode_date, decode_decimal, encode_date};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::{InventoryItem, InventoryStatus};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, category, quantity, unit, status, expiration_date";

/// Parsed, validated item fields ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryItemData {
    pub name: String,
    pub category: String,
    pub quantity: Decimal,
    pub unit: String,
    pub status: InventoryStatus,
    pub expiration_date: NaiveDate,
}

#[derive(sqlx::FromRow)]
struct InventoryRow {
    id: i64,
    name: String,
    category: String,
    quantity: String,
    unit: String,
    status: String,
    expiration_date: String,
}

impl TryFrom<InventoryRow> for InventoryItem {
    type Error = RepoError;

    fn try_from(row: InventoryRow) -> RepoResult<Self> {
        let status = row
            .status
            .parse::<InventoryStatus>()
            .map_err(|e| RepoError::Database(e.message))?;
        Ok(InventoryItem {
            id: row.id,
            quantity: decode_decimal("quantity", &row.quantity)?,
            expiration_date: decode_date("expiration_date", &row.expiration_date)?,
            name: row.name,
            category: row.category,
            unit: row.unit,
            status,
        })
    }
}

fn into_items(rows: Vec<InventoryRow>) -> RepoResult<Vec<InventoryItem>> {
    rows.into_iter().map(InventoryItem::try_from).collect()
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<InventoryItem>> {
    let rows = sqlx::query_as::<_, InventoryRow>(&format!(
        "SELECT {COLUMNS} FROM inventory_item ORDER BY id"
    ))
    .fetch_all(pool)
    .await?;
    into_items(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<InventoryItem>> {
    let row = sqlx::query_as::<_, InventoryRow>(&format!(
        "SELECT {COLUMNS} FROM inventory_item WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.map(InventoryItem::try_from).transpose()
}

pub async fn find_by_status(
    pool: &SqlitePool,
    status: InventoryStatus,
) -> RepoResult<Vec<InventoryItem>> {
    let rows = sqlx::query_as::<_, InventoryRow>(&format!(
        "SELECT {COLUMNS} FROM inventory_item WHERE status = ? ORDER BY expiration_date, id"
    ))
    .bind(status.as_str())
    .fetch_all(pool)
    .await?;
    into_items(rows)
}

pub async fn count_by_status(pool: &SqlitePool, status: InventoryStatus) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM inventory_item WHERE status = ?")
        .bind(status.as_str())
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Items whose status is not Out of Stock
pub async fn count_available(pool: &SqlitePool) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM inventory_item WHERE status <> ?")
        .bind(InventoryStatus::OutOfStock.as_str())
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// `(status, count)` for every status present in the table
pub async fn count_grouped(pool: &SqlitePool) -> RepoResult<Vec<(InventoryStatus, i64)>> {
    let rows: Vec<(String, i64)> =
        sqlx::query_as("SELECT status, COUNT(*) FROM inventory_item GROUP BY status")
            .fetch_all(pool)
            .await?;
    rows.into_iter()
        .map(|(status, count)| {
            let status = status
                .parse::<InventoryStatus>()
                .map_err(|e| RepoError::Database(e.message))?;
            Ok((status, count))
        })
        .collect()
}

pub async fn create(pool: &SqlitePool, data: InventoryItemData) -> RepoResult<InventoryItem> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO inventory_item (name, category, quantity, unit, status, expiration_date) VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.category)
    .bind(data.quantity.to_string())
    .bind(&data.unit)
    .bind(data.status.as_str())
    .bind(encode_date(data.expiration_date))
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create inventory item".into()))
}

/// Replace every field of an existing item
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: InventoryItemData,
) -> RepoResult<InventoryItem> {
    let rows = sqlx::query(
        "UPDATE inventory_item SET name = ?1, category = ?2, quantity = ?3, unit = ?4, status = ?5, expiration_date = ?6 WHERE id = ?7",
    )
    .bind(&data.name)
    .bind(&data.category)
    .bind(data.quantity.to_string())
    .bind(&data.unit)
    .bind(data.status.as_str())
    .bind(encode_date(data.expiration_date))
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Inventory item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Inventory item {id} not found")))
}

/// Compare-and-set the status column against the snapshot it was computed from
///
/// The row is only touched while its quantity, expiry and status still match
/// `seen`; a concurrent write in between wins. Returns whether a row changed.
pub async fn update_status(
    pool: &SqlitePool,
    seen: &InventoryItem,
    status: InventoryStatus,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE inventory_item SET status = ?1 WHERE id = ?2 AND quantity = ?3 AND expiration_date = ?4 AND status = ?5",
    )
    .bind(status.as_str())
    .bind(seen.id)
    .bind(seen.quantity.to_string())
    .bind(encode_date(seen.expiration_date))
    .bind(seen.status.as_str())
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Idempotent: deleting a missing id is not an error
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM inventory_item WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
