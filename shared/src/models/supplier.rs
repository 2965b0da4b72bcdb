//! Supplier Model (供应商)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, ErrorCode};

/// Supplier status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupplierStatus {
    #[default]
    Active,
    Inactive,
    Pending,
}

impl SupplierStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Pending => "Pending",
        }
    }
}

impl fmt::Display for SupplierStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SupplierStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "Inactive" => Ok(Self::Inactive),
            "Pending" => Ok(Self::Pending),
            other => Err(AppError::with_message(
                ErrorCode::InvalidSupplierStatus,
                format!("Unknown supplier status: {other}"),
            )),
        }
    }
}

/// Supplier entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    pub company: String,
    pub contact_person: String,
    pub email: String,
    pub mobile: String,
    pub address: String,
    pub status: SupplierStatus,
    /// Free-text tags ("Dairy", "Produce", ...)
    pub categories: Vec<String>,
}

/// Create / replace supplier payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupplierInput {
    pub company: String,
    #[serde(default)]
    pub contact_person: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub status: SupplierStatus,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Company-name projection for pick lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierName {
    pub company: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_status_defaults_to_active() {
        let input: SupplierInput = serde_json::from_str(r#"{"company":"Green Farms"}"#).unwrap();
        assert_eq!(input.status, SupplierStatus::Active);
        assert_eq!(SupplierStatus::default(), SupplierStatus::Active);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = "Dormant".parse::<SupplierStatus>().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSupplierStatus);
    }
}
