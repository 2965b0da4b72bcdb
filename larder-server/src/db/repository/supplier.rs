//! Supplier Repository

use super::{RepoError, RepoResult};
use shared::models::{Supplier, SupplierInput, SupplierName, SupplierStatus};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, company, contact_person, email, mobile, address, status, categories";

#[derive(sqlx::FromRow)]
struct SupplierRow {
    id: i64,
    company: String,
    contact_person: String,
    email: String,
    mobile: String,
    address: String,
    status: String,
    /// JSON array of strings
    categories: String,
}

impl TryFrom<SupplierRow> for Supplier {
    type Error = RepoError;

    fn try_from(row: SupplierRow) -> RepoResult<Self> {
        let status = row
            .status
            .parse::<SupplierStatus>()
            .map_err(|e| RepoError::Database(e.message))?;
        let categories: Vec<String> = serde_json::from_str(&row.categories)
            .map_err(|e| RepoError::Database(format!("Corrupt supplier categories: {e}")))?;
        Ok(Supplier {
            id: row.id,
            company: row.company,
            contact_person: row.contact_person,
            email: row.email,
            mobile: row.mobile,
            address: row.address,
            status,
            categories,
        })
    }
}

fn encode_categories(categories: &[String]) -> RepoResult<String> {
    serde_json::to_string(categories)
        .map_err(|e| RepoError::Validation(format!("Invalid categories: {e}")))
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Supplier>> {
    let rows = sqlx::query_as::<_, SupplierRow>(&format!(
        "SELECT {COLUMNS} FROM supplier ORDER BY company, id"
    ))
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(Supplier::try_from).collect()
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Supplier>> {
    let row = sqlx::query_as::<_, SupplierRow>(&format!(
        "SELECT {COLUMNS} FROM supplier WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.map(Supplier::try_from).transpose()
}

/// Company names only, for pick lists
pub async fn find_names(pool: &SqlitePool) -> RepoResult<Vec<SupplierName>> {
    let names: Vec<String> = sqlx::query_scalar("SELECT company FROM supplier ORDER BY company")
        .fetch_all(pool)
        .await?;
    Ok(names
        .into_iter()
        .map(|company| SupplierName { company })
        .collect())
}

pub async fn create(pool: &SqlitePool, data: SupplierInput) -> RepoResult<Supplier> {
    let categories = encode_categories(&data.categories)?;
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO supplier (company, contact_person, email, mobile, address, status, categories) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING id",
    )
    .bind(&data.company)
    .bind(&data.contact_person)
    .bind(&data.email)
    .bind(&data.mobile)
    .bind(&data.address)
    .bind(data.status.as_str())
    .bind(categories)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create supplier".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: SupplierInput) -> RepoResult<Supplier> {
    let categories = encode_categories(&data.categories)?;
    let rows = sqlx::query(
        "UPDATE supplier SET company = ?1, contact_person = ?2, email = ?3, mobile = ?4, address = ?5, status = ?6, categories = ?7 WHERE id = ?8",
    )
    .bind(&data.company)
    .bind(&data.contact_person)
    .bind(&data.email)
    .bind(&data.mobile)
    .bind(&data.address)
    .bind(data.status.as_str())
    .bind(categories)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Supplier {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Supplier {id} not found")))
}

/// Idempotent: deleting a missing id is not an error
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM supplier WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
