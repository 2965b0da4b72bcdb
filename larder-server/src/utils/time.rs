//! 时间工具函数 (业务时区日期)
//!
//! "Today" is always taken in the configured business timezone so that order
//! numbers and expiry windows roll over at local midnight, not UTC midnight.

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str, field: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::invalid_field(field, format!("{field} must be a date (YYYY-MM-DD), got '{date}'"))
    })
}

/// 当前业务日期
pub fn today(tz: Tz) -> NaiveDate {
    chrono::Utc::now().with_timezone(&tz).date_naive()
}

/// First day of `(year, month)` and first day of the following month
///
/// The pair bounds a half-open `[start, end)` range, so December rolls into
/// January of the next year.
pub fn month_bounds(year: i32, month: u32) -> AppResult<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::validation(format!("Invalid month {year}-{month}")))?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .ok_or_else(|| AppError::validation(format!("Invalid month {next_year}-{next_month}")))?;
    Ok((start, end))
}

/// `(year, month)` of a date
pub fn year_month(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    #[test]
    fn parses_iso_dates() {
        let date = parse_date(" 2025-01-31 ", "delivery").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
    }

    #[test]
    fn rejects_malformed_dates_as_validation_errors() {
        for bad in ["", "31/01/2025", "2025-02-30", "tomorrow"] {
            let err = parse_date(bad, "delivery").unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationFailed);
        }
    }

    #[test]
    fn december_rolls_into_next_year() {
        let (start, end) = month_bounds(2024, 12).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn rejects_invalid_month() {
        assert!(month_bounds(2025, 13).is_err());
        assert!(month_bounds(2025, 0).is_err());
    }
}
