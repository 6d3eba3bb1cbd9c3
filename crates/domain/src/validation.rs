// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Longest accepted name, in characters.
const MAX_NAME_LENGTH: usize = 100;

/// Validates an employee display name.
///
/// # Errors
///
/// Returns an error if the trimmed name is empty or longer than 100 characters.
pub fn validate_name(name: &str) -> Result<(), DomainError> {
    let trimmed: &str = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::InvalidName(format!(
            "Name cannot exceed {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validates the shape of an email address.
///
/// Only structure is checked: one `@`, a non-empty local part, and a
/// dotted domain with no whitespace. Matching is case-sensitive elsewhere,
/// so the value is not normalized.
///
/// # Errors
///
/// Returns an error if the address is malformed.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let invalid = || DomainError::InvalidEmail(format!("'{email}' is not a valid email address"));

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels_ok: bool = domain.split('.').count() >= 2 && domain.split('.').all(|l| !l.is_empty());
    if !labels_ok {
        return Err(invalid());
    }
    Ok(())
}

/// Validates a reference-data name (department, skill, ...).
///
/// # Errors
///
/// Returns an error if the trimmed name is empty or too long.
pub fn validate_catalog_name(name: &str) -> Result<(), DomainError> {
    let trimmed: &str = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidCatalogName(String::from(
            "Name cannot be empty",
        )));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::InvalidCatalogName(format!(
            "Name cannot exceed {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validates an annual day allotment.
///
/// # Errors
///
/// Returns `DomainError::InvalidDayCount` unless `days` is within 0-366.
pub fn validate_day_count(days: i64) -> Result<(), DomainError> {
    if !(0..=366).contains(&days) {
        return Err(DomainError::InvalidDayCount(days));
    }
    Ok(())
}
