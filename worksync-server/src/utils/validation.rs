//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement.

use shared::models::Role;

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Person names, designations
pub const MAX_NAME_LEN: usize = 200;

/// Worksheet task labels
pub const MAX_TASK_LEN: usize = 100;

/// Bank account numbers and other short identifiers
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// URLs / photo paths
pub const MAX_URL_LEN: usize = 2048;

/// Contact form body
pub const MAX_DETAILS_LEN: usize = 5000;

// ── Numeric limits ──────────────────────────────────────────────────

/// Hours in one worksheet entry
pub const MAX_HOURS_PER_ENTRY: f64 = 24.0;

/// Hourly rate upper bound
pub const MAX_SALARY: f64 = 1_000_000.0;

// ── Validation helpers ──────────────────────────────────────────────

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

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate worked hours: finite, > 0, at most 24 per entry.
pub fn validate_hours(hours: f64) -> Result<(), AppError> {
    if !hours.is_finite() || hours <= 0.0 {
        return Err(AppError::validation(format!(
            "hours_worked must be a positive number, got {hours}"
        )));
    }
    if hours > MAX_HOURS_PER_ENTRY {
        return Err(AppError::validation(format!(
            "hours_worked exceeds {MAX_HOURS_PER_ENTRY}, got {hours}"
        )));
    }
    Ok(())
}

/// Validate an hourly rate: finite, non-negative, bounded.
pub fn validate_salary(salary: f64) -> Result<(), AppError> {
    if !salary.is_finite() || salary < 0.0 {
        return Err(AppError::validation(format!(
            "salary must be a non-negative number, got {salary}"
        )));
    }
    if salary > MAX_SALARY {
        return Err(AppError::validation(format!(
            "salary exceeds maximum allowed ({MAX_SALARY}), got {salary}"
        )));
    }
    Ok(())
}

/// Minimal email shape check; the identity provider owns real verification.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    validate_required_text(email, "email", MAX_EMAIL_LEN)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(AppError::validation(format!("Invalid email: {email}"))),
    }
}

/// Contact form senders describe themselves as `employee` or `hr`.
pub fn validate_contact_designation(designation: Role) -> Result<(), AppError> {
    match designation {
        Role::Employee | Role::Hr => Ok(()),
        Role::Admin => Err(AppError::validation(
            "designation must be employee or hr",
        )),
    }
}
