//! Input validation helpers
//!
//! Centralized text length constants and validation functions for the plain
//! CRUD payloads. (Reservation intake has its own rule pipeline in
//! [`crate::booking::validate`].)

use crate::utils::AppError;

/// Entity names: table names and other short display strings.
pub const MAX_NAME_LEN: usize = 200;

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}
