//! Inventory Status Engine
//!
//! Owns the inventory item lifecycle: parses text payloads, keeps the stored
//! status in line with the [`StatusPolicy`], and answers the per-status counts
//! and lists used by the dashboard.

pub mod status;

pub use status::StatusPolicy;

use chrono::NaiveDate;
use chrono_tz::Tz;
use shared::models::{InventoryItem, InventoryItemInput, InventoryStatus, InventorySummary};
use sqlx::SqlitePool;

use crate::db::repository::{RepoError, inventory};
use crate::db::repository::inventory::InventoryItemData;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, parse_non_negative, validate_required_text, validate_text,
};
use crate::utils::{AppError, AppResult, ErrorCode, time};

fn item_not_found(id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::InventoryItemNotFound,
        format!("Inventory item {id} not found"),
    )
    .with_detail("id", id)
}

#[derive(Clone)]
pub struct InventoryService {
    pool: SqlitePool,
    policy: StatusPolicy,
    tz: Tz,
}

impl InventoryService {
    pub fn new(pool: SqlitePool, policy: StatusPolicy, tz: Tz) -> Self {
        Self { pool, policy, tz }
    }

    fn today(&self) -> NaiveDate {
        time::today(self.tz)
    }

    /// Validate a payload and settle the status to store
    fn prepare(&self, input: InventoryItemInput, today: NaiveDate) -> AppResult<InventoryItemData> {
        validate_required_text(&input.name, "name", MAX_NAME_LEN)?;
        validate_text(&input.category, "category", MAX_NAME_LEN)?;
        validate_text(&input.unit, "unit", MAX_SHORT_TEXT_LEN)?;
        let quantity = parse_non_negative(&input.quantity, "quantity")?;
        let expiration_date = time::parse_date(&input.expiration_date, "expiration_date")?;
        let requested = match input.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(label) => Some(label.parse::<InventoryStatus>()?),
        };
        let status = self
            .policy
            .resolve(requested, quantity, expiration_date, today);

        Ok(InventoryItemData {
            name: input.name.trim().to_string(),
            category: input.category.trim().to_string(),
            quantity,
            unit: input.unit.trim().to_string(),
            status,
            expiration_date,
        })
    }

    pub async fn list_all(&self) -> AppResult<Vec<InventoryItem>> {
        Ok(inventory::find_all(&self.pool).await?)
    }

    pub async fn get(&self, id: i64) -> AppResult<InventoryItem> {
        inventory::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| item_not_found(id))
    }

    pub async fn create(&self, input: InventoryItemInput) -> AppResult<InventoryItem> {
        self.create_on(input, self.today()).await
    }

    /// Create with an explicit business date for status derivation
    pub async fn create_on(
        &self,
        input: InventoryItemInput,
        today: NaiveDate,
    ) -> AppResult<InventoryItem> {
        let data = self.prepare(input, today)?;
        let item = inventory::create(&self.pool, data).await?;
        tracing::info!(item_id = item.id, status = %item.status, "Inventory item created");
        Ok(item)
    }

    /// Full replace of an existing item; unknown ids are NotFound
    pub async fn update(&self, id: i64, input: InventoryItemInput) -> AppResult<InventoryItem> {
        self.update_on(id, input, self.today()).await
    }

    pub async fn update_on(
        &self,
        id: i64,
        input: InventoryItemInput,
        today: NaiveDate,
    ) -> AppResult<InventoryItem> {
        let data = self.prepare(input, today)?;
        let item = inventory::update(&self.pool, id, data)
            .await
            .map_err(|e| match e {
                RepoError::NotFound(_) => item_not_found(id),
                other => other.into(),
            })?;
        tracing::info!(item_id = id, status = %item.status, "Inventory item updated");
        Ok(item)
    }

    /// Idempotent; returns whether a row was removed
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let removed = inventory::delete(&self.pool, id).await?;
        if removed {
            tracing::info!(item_id = id, "Inventory item deleted");
        }
        Ok(removed)
    }

    // ── Aggregates ──────────────────────────────────────────────────

    /// Count one of the alert categories (Low Stock / Expiring Soon)
    pub async fn count_by_status(&self, status: InventoryStatus) -> AppResult<i64> {
        if !status.is_countable() {
            return Err(AppError::with_message(
                ErrorCode::InvalidStatusCategory,
                format!("'{status}' cannot be counted; use Low Stock or Expiring Soon"),
            )
            .with_detail("status", status.as_str()));
        }
        Ok(inventory::count_by_status(&self.pool, status).await?)
    }

    pub async fn count_low_stock(&self) -> AppResult<i64> {
        self.count_by_status(InventoryStatus::LowStock).await
    }

    pub async fn count_expiring_soon(&self) -> AppResult<i64> {
        self.count_by_status(InventoryStatus::ExpiringSoon).await
    }

    /// Everything except Out of Stock
    pub async fn count_available(&self) -> AppResult<i64> {
        Ok(inventory::count_available(&self.pool).await?)
    }

    pub async fn list_by_status(&self, status: InventoryStatus) -> AppResult<Vec<InventoryItem>> {
        Ok(inventory::find_by_status(&self.pool, status).await?)
    }

    pub async fn list_low_stock(&self) -> AppResult<Vec<InventoryItem>> {
        self.list_by_status(InventoryStatus::LowStock).await
    }

    pub async fn list_expiring_soon(&self) -> AppResult<Vec<InventoryItem>> {
        self.list_by_status(InventoryStatus::ExpiringSoon).await
    }

    pub async fn list_out_of_stock(&self) -> AppResult<Vec<InventoryItem>> {
        self.list_by_status(InventoryStatus::OutOfStock).await
    }

    pub async fn summary(&self) -> AppResult<InventorySummary> {
        let counts = inventory::count_grouped(&self.pool).await?;
        Ok(InventorySummary::from_counts(counts))
    }

    // ── Expiry check ────────────────────────────────────────────────

    /// Recompute every stored status against today; returns rows changed
    pub async fn refresh_statuses(&self) -> AppResult<u64> {
        self.refresh_statuses_on(self.today()).await
    }

    pub async fn refresh_statuses_on(&self, today: NaiveDate) -> AppResult<u64> {
        let items = inventory::find_all(&self.pool).await?;
        let mut changed = 0;
        for item in items {
            let status = self
                .policy
                .classify(item.quantity, item.expiration_date, today);
            if status != item.status && inventory::update_status(&self.pool, &item, status).await? {
                tracing::debug!(item_id = item.id, from = %item.status, to = %status, "Inventory status refreshed");
                changed += 1;
            }
        }
        tracing::info!(changed, %today, "Inventory statuses refreshed");
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(name: &str, quantity: &str, expires: &str) -> InventoryItemInput {
        InventoryItemInput {
            name: name.to_string(),
            category: "Dairy".to_string(),
            quantity: quantity.to_string(),
            unit: "kg".to_string(),
            status: None,
            expiration_date: expires.to_string(),
        }
    }

    async fn service(policy: StatusPolicy) -> (tempfile::TempDir, InventoryService) {
        let dir = tempfile::tempdir().unwrap();
        let db = DbService::new(&dir.path().join("larder.db")).await.unwrap();
        (dir, InventoryService::new(db.pool, policy, Tz::UTC))
    }

    #[tokio::test]
    async fn invalid_payloads_write_nothing() {
        let (_dir, svc) = service(StatusPolicy::default()).await;
        let today = date(2025, 3, 1);

        for bad in [
            input("", "1", "2025-06-01"),
            input("Milk", "-1", "2025-06-01"),
            input("Milk", "lots", "2025-06-01"),
            input("Milk", "1", "June"),
        ] {
            let err = svc.create_on(bad, today).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationFailed);
        }
        let mut unknown_status = input("Milk", "1", "2025-06-01");
        unknown_status.status = Some("Plenty".into());
        let err = svc.create_on(unknown_status, today).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInventoryStatus);

        assert!(svc.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn refresh_moves_items_into_expiring_soon() {
        let (_dir, svc) = service(StatusPolicy::default()).await;
        let item = svc
            .create_on(input("Yogurt", "40", "2025-03-20"), date(2025, 3, 1))
            .await
            .unwrap();
        assert_eq!(item.status, InventoryStatus::InStock);

        assert_eq!(svc.refresh_statuses_on(date(2025, 3, 2)).await.unwrap(), 0);
        assert_eq!(svc.refresh_statuses_on(date(2025, 3, 15)).await.unwrap(), 1);
        assert_eq!(svc.get(item.id).await.unwrap().status, InventoryStatus::ExpiringSoon);
        assert_eq!(svc.refresh_statuses_on(date(2025, 3, 15)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn client_status_is_kept_when_derivation_is_off() {
        let policy = StatusPolicy {
            derive_status: false,
            ..StatusPolicy::default()
        };
        let (_dir, svc) = service(policy).await;
        let mut payload = input("Rice", "500", "2027-01-01");
        payload.status = Some("Low Stock".into());
        let item = svc.create_on(payload, date(2025, 3, 1)).await.unwrap();
        assert_eq!(item.status, InventoryStatus::LowStock);
    }

    #[tokio::test]
    async fn refresh_never_writes_over_a_newer_row() {
        let (_dir, svc) = service(StatusPolicy::default()).await;
        let item = svc
            .create_on(input("Cream", "40", "2025-03-05"), date(2025, 1, 1))
            .await
            .unwrap();
        assert_eq!(item.status, InventoryStatus::InStock);

        // Snapshot read by a refresh before a concurrent update lands
        let seen = svc.get(item.id).await.unwrap();
        let updated = svc
            .update_on(item.id, input("Cream", "0", "2025-03-05"), date(2025, 3, 1))
            .await
            .unwrap();
        assert_eq!(updated.status, InventoryStatus::OutOfStock);

        let written = inventory::update_status(&svc.pool, &seen, InventoryStatus::ExpiringSoon)
            .await
            .unwrap();
        assert!(!written);
        assert_eq!(svc.get(item.id).await.unwrap(), updated);
    }
}
