//! 库存状态分类
//!
//! Status is a cache of `(quantity, expiration_date)` against the configured
//! thresholds. Rules are checked in order and the first match wins:
//!
//! 1. `quantity == 0` → Out of Stock
//! 2. `expiration_date <= today + window` → Expiring Soon (expired items too)
//! 3. `quantity <= low_stock_threshold` → Low Stock
//! 4. otherwise → In Stock

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use shared::models::InventoryStatus;

pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;
pub const DEFAULT_EXPIRY_WINDOW_DAYS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusPolicy {
    /// Quantities at or below this are Low Stock
    pub low_stock_threshold: Decimal,
    /// Items expiring within this many days are Expiring Soon
    pub expiry_window_days: u32,
    /// Recompute status on every mutation, ignoring client-sent values
    pub derive_status: bool,
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self {
            low_stock_threshold: Decimal::from(DEFAULT_LOW_STOCK_THRESHOLD),
            expiry_window_days: DEFAULT_EXPIRY_WINDOW_DAYS,
            derive_status: true,
        }
    }
}

impl StatusPolicy {
    pub fn classify(
        &self,
        quantity: Decimal,
        expiration_date: NaiveDate,
        today: NaiveDate,
    ) -> InventoryStatus {
        if quantity.is_zero() {
            return InventoryStatus::OutOfStock;
        }
        // Saturate at the calendar edge: everything counts as expiring then.
        let horizon = today
            .checked_add_days(Days::new(u64::from(self.expiry_window_days)))
            .unwrap_or(NaiveDate::MAX);
        if expiration_date <= horizon {
            InventoryStatus::ExpiringSoon
        } else if quantity <= self.low_stock_threshold {
            InventoryStatus::LowStock
        } else {
            InventoryStatus::InStock
        }
    }

    /// Status to store for a create or update
    ///
    /// A client status is honoured only when derivation is switched off.
    pub fn resolve(
        &self,
        requested: Option<InventoryStatus>,
        quantity: Decimal,
        expiration_date: NaiveDate,
        today: NaiveDate,
    ) -> InventoryStatus {
        match requested {
            Some(status) if !self.derive_status => status,
            _ => self.classify(quantity, expiration_date, today),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2025, 3, 1)
    }

    #[test]
    fn zero_quantity_wins_over_expiry() {
        let policy = StatusPolicy::default();
        let status = policy.classify(Decimal::ZERO, date(2025, 3, 2), today());
        assert_eq!(status, InventoryStatus::OutOfStock);
    }

    #[test]
    fn expiry_window_is_inclusive_and_covers_expired_items() {
        let policy = StatusPolicy::default();
        let qty = Decimal::from(50);
        assert_eq!(
            policy.classify(qty, date(2025, 3, 8), today()),
            InventoryStatus::ExpiringSoon
        );
        assert_eq!(
            policy.classify(qty, date(2025, 2, 1), today()),
            InventoryStatus::ExpiringSoon
        );
        assert_eq!(
            policy.classify(qty, date(2025, 3, 9), today()),
            InventoryStatus::InStock
        );
    }

    #[test]
    fn low_stock_threshold_is_inclusive() {
        let policy = StatusPolicy::default();
        let far = date(2026, 1, 1);
        assert_eq!(
            policy.classify(Decimal::from(10), far, today()),
            InventoryStatus::LowStock
        );
        assert_eq!(
            policy.classify(Decimal::new(1001, 2), far, today()),
            InventoryStatus::InStock
        );
    }

    #[test]
    fn expiring_beats_low_stock() {
        let policy = StatusPolicy::default();
        assert_eq!(
            policy.classify(Decimal::ONE, today(), today()),
            InventoryStatus::ExpiringSoon
        );
    }

    #[test]
    fn resolve_ignores_client_status_when_deriving() {
        let policy = StatusPolicy::default();
        let status = policy.resolve(
            Some(InventoryStatus::InStock),
            Decimal::ZERO,
            date(2026, 1, 1),
            today(),
        );
        assert_eq!(status, InventoryStatus::OutOfStock);
    }

    #[test]
    fn resolve_keeps_client_status_when_derivation_is_off() {
        let policy = StatusPolicy {
            derive_status: false,
            ..StatusPolicy::default()
        };
        let far = date(2026, 1, 1);
        assert_eq!(
            policy.resolve(Some(InventoryStatus::LowStock), Decimal::from(99), far, today()),
            InventoryStatus::LowStock
        );
        assert_eq!(
            policy.resolve(None, Decimal::from(99), far, today()),
            InventoryStatus::InStock
        );
    }
}
