// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::SqliteConnection;
use hrdesk_domain::AttendanceStatus;

use crate::data_models::AttendanceData;
use crate::diesel_schema::attendance;
use crate::error::PersistenceError;
use crate::queries::parse_stored;

#[derive(Queryable, Selectable)]
#[diesel(table_name = attendance)]
struct AttendanceRow {
    id: i64,
    employee_id: i64,
    date: String,
    check_in: Option<String>,
    check_out: Option<String>,
    status: String,
    note: Option<String>,
}

impl AttendanceRow {
    fn into_data(self) -> Result<AttendanceData, PersistenceError> {
        Ok(AttendanceData {
            status: parse_stored::<AttendanceStatus>(&self.status, "attendance status")?,
            id: self.id,
            employee_id: self.employee_id,
            date: self.date,
            check_in: self.check_in,
            check_out: self.check_out,
            note: self.note,
        })
    }
}

/// Retrieves the attendance row of an employee for a date.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no row exists.
pub fn find_attendance_on(
    conn: &mut SqliteConnection,
    employee_id: i64,
    date: &str,
) -> Result<Option<AttendanceData>, PersistenceError> {
    let row: Option<AttendanceRow> = attendance::table
        .filter(attendance::employee_id.eq(employee_id))
        .filter(attendance::date.eq(date))
        .select(AttendanceRow::as_select())
        .first(conn)
        .optional()?;
    row.map(AttendanceRow::into_data).transpose()
}

/// Retrieves an attendance row by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the row is not found.
pub fn find_attendance(
    conn: &mut SqliteConnection,
    attendance_id: i64,
) -> Result<Option<AttendanceData>, PersistenceError> {
    let row: Option<AttendanceRow> = attendance::table
        .filter(attendance::id.eq(attendance_id))
        .select(AttendanceRow::as_select())
        .first(conn)
        .optional()?;
    row.map(AttendanceRow::into_data).transpose()
}

/// Lists an employee's attendance, newest date first.
///
/// Both bounds are inclusive `YYYY-MM-DD` dates.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_attendance(
    conn: &mut SqliteConnection,
    employee_id: i64,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<Vec<AttendanceData>, PersistenceError> {
    let mut query = attendance::table
        .filter(attendance::employee_id.eq(employee_id))
        .into_boxed();
    if let Some(from) = from {
        query = query.filter(attendance::date.ge(from.to_string()));
    }
    if let Some(to) = to {
        query = query.filter(attendance::date.le(to.to_string()));
    }

    let rows: Vec<AttendanceRow> = query
        .select(AttendanceRow::as_select())
        .order(attendance::date.desc())
        .load(conn)?;
    rows.into_iter().map(AttendanceRow::into_data).collect()
}

/// Counts attendance rows by status for a set of employees within a date range.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_by_status(
    conn: &mut SqliteConnection,
    employee_ids: &[i64],
    from: &str,
    to: &str,
) -> Result<BTreeMap<String, i64>, PersistenceError> {
    if employee_ids.is_empty() {
        return Ok(BTreeMap::new());
    }
    let rows: Vec<(String, i64)> = attendance::table
        .filter(attendance::employee_id.eq_any(employee_ids))
        .filter(attendance::date.ge(from))
        .filter(attendance::date.le(to))
        .group_by(attendance::status)
        .select((attendance::status, count_star()))
        .load(conn)?;
    Ok(rows.into_iter().collect())
}
