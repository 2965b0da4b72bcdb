//! Unified error codes for the Larder services
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 6xxx: Inventory errors
//! - 7xxx: Supplier errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid format
    InvalidFormat = 6,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order identifier does not match the addressed order
    OrderIdMismatch = 4002,
    /// Order identifier allocation kept colliding
    OrderIdExhausted = 4003,

    // ==================== 6xxx: Inventory ====================
    /// Inventory item not found
    InventoryItemNotFound = 6001,
    /// Unknown inventory status label
    InvalidInventoryStatus = 6002,
    /// Status cannot be used for counting
    InvalidStatusCategory = 6003,

    // ==================== 7xxx: Supplier ====================
    /// Supplier not found
    SupplierNotFound = 7001,
    /// Unknown supplier status label
    InvalidSupplierStatus = 7002,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default human-readable message for this code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            Self::Success => "Operation completed successfully",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidFormat => "Invalid format",
            Self::ValueOutOfRange => "Value out of range",

            // Order
            Self::OrderNotFound => "Order not found",
            Self::OrderIdMismatch => "Order identifier cannot be changed",
            Self::OrderIdExhausted => "Could not allocate a unique order identifier",

            // Inventory
            Self::InventoryItemNotFound => "Inventory item not found",
            Self::InvalidInventoryStatus => "Invalid inventory status",
            Self::InvalidStatusCategory => "Status is not a countable category",

            // Supplier
            Self::SupplierNotFound => "Supplier not found",
            Self::InvalidSupplierStatus => "Invalid supplier status",

            // System
            Self::DatabaseError => "Database error",
        }
    }

    /// Whether a client may retry the same request unchanged
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::OrderIdExhausted | Self::DatabaseError)
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            6 => Ok(ErrorCode::InvalidFormat),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderIdMismatch),
            4003 => Ok(ErrorCode::OrderIdExhausted),

            // Inventory
            6001 => Ok(ErrorCode::InventoryItemNotFound),
            6002 => Ok(ErrorCode::InvalidInventoryStatus),
            6003 => Ok(ErrorCode::InvalidStatusCategory),

            // Supplier
            7001 => Ok(ErrorCode::SupplierNotFound),
            7002 => Ok(ErrorCode::InvalidSupplierStatus),

            // System
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
