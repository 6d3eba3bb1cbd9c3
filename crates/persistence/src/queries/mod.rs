// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `employees`: Employee lookups, listings and scope candidates
//! - `salary`: Salary ledger reads
//! - `skills`: Employee skills
//! - `documents`: Uploaded document metadata
//! - `leave`: Leave types, balances and requests
//! - `attendance`: Attendance rows
//! - `notifications`: Inbox reads and unread counts
//! - `catalog`: Reference catalogs
//! - `projects`: Projects and assignments
//! - `logs`: System log
//! - `dashboard`: Aggregations

pub mod attendance;
pub mod catalog;
pub mod dashboard;
pub mod documents;
pub mod employees;
pub mod leave;
pub mod logs;
pub mod notifications;
pub mod projects;
pub mod salary;
pub mod skills;

use std::fmt::Display;
use std::str::FromStr;

use crate::error::PersistenceError;

/// Parses a value stored as text back into its typed form.
///
/// A failure here means the row was written outside this crate.
///
/// # Errors
///
/// Returns `QueryFailed` naming the column when the value does not parse.
pub fn parse_stored<T>(value: &str, column: &str) -> Result<T, PersistenceError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .parse::<T>()
        .map_err(|e| PersistenceError::QueryFailed(format!("Unreadable {column} '{value}': {e}")))
}
