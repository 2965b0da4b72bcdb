//! Input validation helpers
//!
//! Centralized text length constants and parsing for the text-typed request
//! payloads. Every failure names the field (`ValidationFailed`, or
//! `ValueOutOfRange` for oversized amounts), and nothing is written until a
//! payload has been fully parsed.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::utils::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: item, order, company, category, unit
pub const MAX_NAME_LEN: usize = 200;

/// Short identifiers: phone, status labels, order numbers
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Amount limits ───────────────────────────────────────────────────

/// Largest magnitude accepted for quantities and prices
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

// ── Text ────────────────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::invalid_field(
            field,
            format!("{field} must not be empty"),
        ));
    }
    validate_text(value, field, max_len)
}

/// Validate that a string, possibly empty, is within the length limit.
pub fn validate_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    let chars = value.chars().count();
    if chars > max_len {
        return Err(AppError::invalid_field(
            field,
            format!("{field} is too long ({chars} chars, max {max_len})"),
        ));
    }
    Ok(())
}

// ── Numbers ─────────────────────────────────────────────────────────

/// Parse a decimal amount sent as text
///
/// The scale the client sent is kept (`"35.50"` stays `35.50`); negative zero
/// collapses to zero. Magnitudes above [`MAX_AMOUNT`] are rejected so that
/// sums over stored amounts stay representable.
pub fn parse_decimal(value: &str, field: &str) -> Result<Decimal, AppError> {
    let amount = Decimal::from_str(value.trim()).map_err(|_| {
        AppError::invalid_field(field, format!("{field} must be a decimal number, got '{value}'"))
    })?;
    if amount.abs() > Decimal::from(MAX_AMOUNT) {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} must not exceed {MAX_AMOUNT}, got {amount}"),
        )
        .with_detail("field", field));
    }
    Ok(if amount.is_zero() { Decimal::ZERO } else { amount })
}

/// Parse an amount that must be >= 0
pub fn parse_non_negative(value: &str, field: &str) -> Result<Decimal, AppError> {
    let amount = parse_decimal(value, field)?;
    if amount.is_sign_negative() {
        return Err(AppError::invalid_field(
            field,
            format!("{field} must not be negative, got {amount}"),
        ));
    }
    Ok(amount)
}

/// Parse an amount that must be > 0
pub fn parse_positive(value: &str, field: &str) -> Result<Decimal, AppError> {
    let amount = parse_decimal(value, field)?;
    if amount <= Decimal::ZERO {
        return Err(AppError::invalid_field(
            field,
            format!("{field} must be greater than zero, got {amount}"),
        ));
    }
    Ok(amount)
}
