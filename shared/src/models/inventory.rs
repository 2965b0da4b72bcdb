//! Inventory Model (库存)

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, ErrorCode};

/// Inventory status
///
/// Serialized with the human-readable labels used by the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InventoryStatus {
    #[default]
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "Expiring Soon")]
    ExpiringSoon,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl InventoryStatus {
    pub const ALL: [InventoryStatus; 4] = [
        Self::InStock,
        Self::LowStock,
        Self::ExpiringSoon,
        Self::OutOfStock,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::LowStock => "Low Stock",
            Self::ExpiringSoon => "Expiring Soon",
            Self::OutOfStock => "Out of Stock",
        }
    }

    /// Only the alert categories can be counted individually
    pub const fn is_countable(&self) -> bool {
        matches!(self, Self::LowStock | Self::ExpiringSoon)
    }
}

impl fmt::Display for InventoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InventoryStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::InvalidInventoryStatus,
                    format!("Unknown inventory status: {s}"),
                )
                .with_detail("field", "status")
            })
    }
}

/// Inventory item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: i64,
    pub name: String,
    pub category: String,
    /// Amount on hand, never negative
    pub quantity: Decimal,
    pub unit: String,
    pub status: InventoryStatus,
    pub expiration_date: NaiveDate,
}

/// Create / replace inventory item payload
///
/// Numbers and dates arrive as text and are validated by the server before
/// anything is written. `status` is only honoured when status derivation is
/// disabled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryItemInput {
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub quantity: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(alias = "exp_date")]
    pub expiration_date: String,
}

/// Per-status counts for the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub total: i64,
    pub in_stock: i64,
    pub low_stock: i64,
    pub expiring_soon: i64,
    pub out_of_stock: i64,
    /// total - out_of_stock
    pub available: i64,
}

impl InventorySummary {
    /// Build from `(status, count)` pairs
    pub fn from_counts(counts: impl IntoIterator<Item = (InventoryStatus, i64)>) -> Self {
        let mut summary = Self::default();
        for (status, count) in counts {
            match status {
                InventoryStatus::InStock => summary.in_stock += count,
                InventoryStatus::LowStock => summary.low_stock += count,
                InventoryStatus::ExpiringSoon => summary.expiring_soon += count,
                InventoryStatus::OutOfStock => summary.out_of_stock += count,
            }
            summary.total += count;
        }
        summary.available = summary.total - summary.out_of_stock;
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_in_stock() {
        assert_eq!(InventoryStatus::default(), InventoryStatus::InStock);
    }

    #[test]
    fn status_labels_round_trip_through_serde() {
        let json = serde_json::to_string(&InventoryStatus::ExpiringSoon).unwrap();
        assert_eq!(json, "\"Expiring Soon\"");
        let parsed: InventoryStatus = serde_json::from_str("\"Out of Stock\"").unwrap();
        assert_eq!(parsed, InventoryStatus::OutOfStock);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = "Nearly Gone".parse::<InventoryStatus>().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInventoryStatus);
        assert!(serde_json::from_str::<InventoryStatus>("\"low stock\"").is_err());
    }

    #[test]
    fn only_alert_statuses_are_countable() {
        assert!(InventoryStatus::LowStock.is_countable());
        assert!(InventoryStatus::ExpiringSoon.is_countable());
        assert!(!InventoryStatus::InStock.is_countable());
        assert!(!InventoryStatus::OutOfStock.is_countable());
    }

    #[test]
    fn summary_available_excludes_out_of_stock() {
        let summary = InventorySummary::from_counts([
            (InventoryStatus::InStock, 4),
            (InventoryStatus::LowStock, 2),
            (InventoryStatus::ExpiringSoon, 1),
            (InventoryStatus::OutOfStock, 3),
        ]);
        assert_eq!(summary.total, 10);
        assert_eq!(summary.available, 7);
        assert_eq!(summary.available, summary.total - summary.out_of_stock);
    }

    #[test]
    fn input_accepts_legacy_exp_date_key() {
        let input: InventoryItemInput = serde_json::from_str(
            r#"{"name":"Milk","quantity":"3.5","exp_date":"2025-02-01"}"#,
        )
        .unwrap();
        assert_eq!(input.expiration_date, "2025-02-01");
        assert!(input.status.is_none());
    }
}
