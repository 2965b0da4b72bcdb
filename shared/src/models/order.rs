//! Purchase Order Model (采购订单)

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, ErrorCode};

/// Status that counts toward delivered revenue
pub const ORDER_STATUS_DELIVERED: &str = "Delivered";

/// Status assigned when a draft does not carry one
pub const ORDER_STATUS_PENDING: &str = "Pending";

/// Month-scoped order number: `ORD_<year>_<month:02>_<sequence:03>`
///
/// The sequence is zero-padded to three digits and simply grows wider past
/// 999 (`ORD_2025_01_1000`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderNumber {
    pub year: i32,
    pub month: u32,
    pub sequence: i64,
}

impl OrderNumber {
    pub const PREFIX: &'static str = "ORD";

    pub fn new(year: i32, month: u32, sequence: i64) -> Self {
        Self {
            year,
            month,
            sequence,
        }
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{:02}_{:03}",
            Self::PREFIX,
            self.year,
            self.month,
            self.sequence
        )
    }
}

impl FromStr for OrderNumber {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            AppError::with_message(
                ErrorCode::InvalidFormat,
                format!("Invalid order number: {s}"),
            )
        };

        let mut parts = s.split('_');
        if parts.next() != Some(Self::PREFIX) {
            return Err(invalid());
        }
        let (Some(year), Some(month), Some(sequence), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        if year.len() != 4 || month.len() != 2 || sequence.len() < 3 {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        let sequence: i64 = sequence.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) || sequence < 1 {
            return Err(invalid());
        }
        Ok(Self::new(year, month, sequence))
    }
}

/// Purchase order entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Primary key, assigned once at creation
    pub order_id: String,
    pub name: String,
    pub category: String,
    pub supplier: String,
    /// Server date at creation, never client-controlled
    pub created: NaiveDate,
    /// Expected or actual delivery date
    pub delivery: NaiveDate,
    /// Free-text lifecycle marker ("Pending", "Delivered", ...)
    pub status: String,
    pub quantity: Decimal,
    pub unit: String,
    /// Amount for the whole order
    pub price: Decimal,
}

impl Order {
    pub fn is_delivered(&self) -> bool {
        self.status == ORDER_STATUS_DELIVERED
    }
}

/// Create order payload
///
/// Any `order_id` or `created` sent by the client is not part of the draft
/// and is dropped during deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderDraft {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub supplier: String,
    pub delivery: String,
    #[serde(default)]
    pub status: Option<String>,
    pub quantity: String,
    #[serde(default)]
    pub unit: String,
    pub price: String,
}

/// Full replacement payload for `PUT /api/orders/{order_id}`
///
/// `order_id` is optional and, when present, must equal the path identifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderReplace {
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(flatten)]
    pub fields: OrderDraft,
}

/// Delivered revenue aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveredRevenue {
    /// Sum of `price` over delivered orders, zero when there are none
    pub total: Decimal,
    pub delivered_orders: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_month_and_sequence_with_padding() {
        assert_eq!(OrderNumber::new(2025, 1, 7).to_string(), "ORD_2025_01_007");
        assert_eq!(OrderNumber::new(2025, 12, 123).to_string(), "ORD_2025_12_123");
    }

    #[test]
    fn sequence_grows_wider_instead_of_truncating() {
        assert_eq!(OrderNumber::new(2025, 1, 1000).to_string(), "ORD_2025_01_1000");
    }

    #[test]
    fn parses_formatted_numbers() {
        let parsed: OrderNumber = "ORD_2025_01_1000".parse().unwrap();
        assert_eq!(parsed, OrderNumber::new(2025, 1, 1000));
        let parsed: OrderNumber = "ORD_2024_12_042".parse().unwrap();
        assert_eq!(parsed.month, 12);
        assert_eq!(parsed.sequence, 42);
    }

    #[test]
    fn rejects_malformed_numbers() {
        for bad in [
            "",
            "ORD_2025_01",
            "ORD_2025_1_001",
            "ORD_2025_13_001",
            "ORD_2025_01_01",
            "ORD_2025_01_000",
            "PO_2025_01_001",
            "ORD_2025_01_001_x",
        ] {
            let err = bad.parse::<OrderNumber>().unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidFormat, "{bad}");
        }
    }

    #[test]
    fn order_numbers_sort_by_sequence_within_a_month() {
        let a = OrderNumber::new(2025, 1, 9);
        let b = OrderNumber::new(2025, 1, 10);
        assert!(a < b);
    }

    #[test]
    fn draft_ignores_client_identifier_and_created() {
        let draft: OrderDraft = serde_json::from_str(
            r#"{"order_id":"ORD_1999_01_001","created":"1999-01-01","name":"Flour",
                "delivery":"2025-01-10","quantity":"20","price":"35.50"}"#,
        )
        .unwrap();
        assert_eq!(draft.name, "Flour");
        assert!(draft.status.is_none());
    }

    #[test]
    fn replace_payload_carries_optional_identifier() {
        let replace: OrderReplace = serde_json::from_str(
            r#"{"order_id":"ORD_2025_01_001","name":"Flour",
                "delivery":"2025-01-10","quantity":"20","price":"35.50","status":"Delivered"}"#,
        )
        .unwrap();
        assert_eq!(replace.order_id.as_deref(), Some("ORD_2025_01_001"));
        assert_eq!(replace.fields.status.as_deref(), Some("Delivered"));
    }
}
