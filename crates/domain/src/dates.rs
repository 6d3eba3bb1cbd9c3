// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage formats for dates and timestamps.
//!
//! Dates are `YYYY-MM-DD`. Timestamps are RFC 3339 in UTC.

use crate::error::DomainError;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Formats a timestamp as RFC 3339 in UTC.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimestamp` if the value cannot be represented.
pub fn format_timestamp(value: OffsetDateTime) -> Result<String, DomainError> {
    value
        .to_offset(UtcOffset::UTC)
        .format(&Rfc3339)
        .map_err(|e| DomainError::InvalidTimestamp(e.to_string()))
}

/// Parses an RFC 3339 timestamp.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimestamp` if the string is malformed.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, DomainError> {
    OffsetDateTime::parse(value, &Rfc3339)
        .map_err(|e| DomainError::InvalidTimestamp(format!("'{value}': {e}")))
}

/// The current instant formatted for storage.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimestamp` if formatting fails.
pub fn now_timestamp() -> Result<String, DomainError> {
    format_timestamp(OffsetDateTime::now_utc())
}
