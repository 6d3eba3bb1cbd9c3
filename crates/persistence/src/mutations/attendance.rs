// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attendance mutations.
//!
//! There is at most one row per employee per date, enforced by a unique
//! index. Writers look the row up first and update it when present.

use diesel::prelude::*;
use diesel::SqliteConnection;
use hrdesk_domain::AttendanceStatus;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::AttendanceUpdate;
use crate::diesel_schema::attendance;
use crate::error::PersistenceError;

/// Inserts an attendance row.
///
/// # Errors
///
/// Returns `UniqueViolation` if a row already exists for the date.
pub fn insert_attendance(
    conn: &mut SqliteConnection,
    employee_id: i64,
    date: &str,
    check_in: Option<&str>,
    status: AttendanceStatus,
    note: Option<&str>,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(attendance::table)
        .values((
            attendance::employee_id.eq(employee_id),
            attendance::date.eq(date),
            attendance::check_in.eq(check_in),
            attendance::status.eq(status.as_str()),
            attendance::note.eq(note),
        ))
        .execute(conn)?;

    let attendance_id: i64 = conn.get_last_insert_rowid()?;
    info!(attendance_id, employee_id, date, status = status.as_str(), "Attendance recorded");
    Ok(attendance_id)
}

/// Records a check-in on an existing row that has none.
///
/// Returns the number of rows updated.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn record_check_in(
    conn: &mut SqliteConnection,
    attendance_id: i64,
    check_in: &str,
    status: AttendanceStatus,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(
        attendance::table
            .filter(attendance::id.eq(attendance_id))
            .filter(attendance::check_in.is_null()),
    )
    .set((
        attendance::check_in.eq(Some(check_in)),
        attendance::status.eq(status.as_str()),
    ))
    .execute(conn)?)
}

/// Records a check-out on a row that has a check-in and no check-out.
///
/// Returns the number of rows updated.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn record_check_out(
    conn: &mut SqliteConnection,
    attendance_id: i64,
    check_out: &str,
    status: AttendanceStatus,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(
        attendance::table
            .filter(attendance::id.eq(attendance_id))
            .filter(attendance::check_in.is_not_null())
            .filter(attendance::check_out.is_null()),
    )
    .set((
        attendance::check_out.eq(Some(check_out)),
        attendance::status.eq(status.as_str()),
    ))
    .execute(conn)?)
}

#[derive(AsChangeset)]
#[diesel(table_name = attendance)]
struct AttendanceChangeset<'a> {
    status: Option<&'static str>,
    note: Option<&'a str>,
}

/// Applies a supervisor edit. Returns the number of rows updated.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_attendance(
    conn: &mut SqliteConnection,
    attendance_id: i64,
    update: &AttendanceUpdate,
) -> Result<usize, PersistenceError> {
    if update.status.is_none() && update.note.is_none() {
        let count: i64 = attendance::table
            .filter(attendance::id.eq(attendance_id))
            .count()
            .get_result(conn)?;
        return Ok(usize::from(count > 0));
    }

    Ok(diesel::update(attendance::table.filter(attendance::id.eq(attendance_id)))
        .set(AttendanceChangeset {
            status: update.status.map(|s| s.as_str()),
            note: update.note.as_deref(),
        })
        .execute(conn)?)
}

/// Marks a date as leave for an employee, clearing any clock times.
///
/// Updates the existing row for the date or inserts one.
///
/// # Errors
///
/// Returns an error if the lookup or write fails.
pub fn mark_on_leave(
    conn: &mut SqliteConnection,
    employee_id: i64,
    date: &str,
    note: &str,
) -> Result<(), PersistenceError> {
    let existing: Option<i64> = attendance::table
        .filter(attendance::employee_id.eq(employee_id))
        .filter(attendance::date.eq(date))
        .select(attendance::id)
        .first(conn)
        .optional()?;

    let status: &str = AttendanceStatus::OnLeave.as_str();
    match existing {
        Some(attendance_id) => {
            diesel::update(attendance::table.filter(attendance::id.eq(attendance_id)))
                .set((
                    attendance::status.eq(status),
                    attendance::note.eq(Some(note)),
                    attendance::check_in.eq(None::<String>),
                    attendance::check_out.eq(None::<String>),
                ))
                .execute(conn)?;
        }
        None => {
            diesel::insert_into(attendance::table)
                .values((
                    attendance::employee_id.eq(employee_id),
                    attendance::date.eq(date),
                    attendance::status.eq(status),
                    attendance::note.eq(Some(note)),
                ))
                .on_conflict((attendance::employee_id, attendance::date))
                .do_update()
                .set((
                    attendance::status.eq(status),
                    attendance::note.eq(Some(note)),
                    attendance::check_in.eq(None::<String>),
                    attendance::check_out.eq(None::<String>),
                ))
                .execute(conn)?;
        }
    }

    debug!(employee_id, date, "Attendance marked on leave");
    Ok(())
}
