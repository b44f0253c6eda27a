//! Time helpers
//!
//! Entities store `created_at`/`updated_at` as Unix millis; repositories
//! only ever receive `i64` timestamps.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;

use super::{AppError, AppResult};

/// Current Unix time in milliseconds.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// Parse a date string (YYYY-MM-DD).
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {date}")))
}
