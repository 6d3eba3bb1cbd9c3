// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave balance and request mutations.
//!
//! Status changes and balance debits are conditional updates: they only
//! touch rows still in the expected state and report how many rows they
//! changed, so the caller can detect a lost race and roll back.

use diesel::prelude::*;
use diesel::SqliteConnection;
use hrdesk_domain::{LeaveStatus, format_date};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::NewLeaveRequest;
use crate::diesel_schema::{leave_balances, leave_requests, leave_types};
use crate::error::PersistenceError;

/// Creates a balance for every leave type using its default allotment.
///
/// Existing balances for the year are left untouched.
///
/// # Errors
///
/// Returns an error if a query or insert fails.
pub fn create_default_balances(
    conn: &mut SqliteConnection,
    employee_id: i64,
    year: i32,
) -> Result<usize, PersistenceError> {
    let allotments: Vec<(i64, i64)> = leave_types::table
        .select((leave_types::id, leave_types::default_days))
        .load(conn)?;

    let mut created: usize = 0;
    for (leave_type_id, default_days) in allotments {
        created += diesel::insert_into(leave_balances::table)
            .values((
                leave_balances::employee_id.eq(employee_id),
                leave_balances::leave_type_id.eq(leave_type_id),
                leave_balances::year.eq(year),
                leave_balances::total_days.eq(default_days),
                leave_balances::used_days.eq(0_i64),
            ))
            .on_conflict((
                leave_balances::employee_id,
                leave_balances::leave_type_id,
                leave_balances::year,
            ))
            .do_nothing()
            .execute(conn)?;
    }

    debug!(employee_id, year, created, "Default leave balances created");
    Ok(created)
}

/// Sets the allotment of a balance, creating the row if needed.
///
/// The caller checks the new total against `used_days` first.
///
/// # Errors
///
/// Returns an error if the upsert fails.
pub fn upsert_balance_total(
    conn: &mut SqliteConnection,
    employee_id: i64,
    leave_type_id: i64,
    year: i32,
    total_days: i64,
) -> Result<(), PersistenceError> {
    diesel::insert_into(leave_balances::table)
        .values((
            leave_balances::employee_id.eq(employee_id),
            leave_balances::leave_type_id.eq(leave_type_id),
            leave_balances::year.eq(year),
            leave_balances::total_days.eq(total_days),
            leave_balances::used_days.eq(0_i64),
        ))
        .on_conflict((
            leave_balances::employee_id,
            leave_balances::leave_type_id,
            leave_balances::year,
        ))
        .do_update()
        .set(leave_balances::total_days.eq(total_days))
        .execute(conn)?;

    info!(employee_id, leave_type_id, year, total_days, "Leave allotment set");
    Ok(())
}

/// Inserts a pending leave request.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_leave_request(
    conn: &mut SqliteConnection,
    request: &NewLeaveRequest,
    total_days: i64,
    now: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(leave_requests::table)
        .values((
            leave_requests::employee_id.eq(request.employee_id),
            leave_requests::leave_type_id.eq(request.leave_type_id),
            leave_requests::start_date.eq(format_date(request.range.start())),
            leave_requests::end_date.eq(format_date(request.range.end())),
            leave_requests::total_days.eq(total_days),
            leave_requests::reason.eq(request.reason.as_deref()),
            leave_requests::status.eq(LeaveStatus::Pending.as_str()),
            leave_requests::created_at.eq(now),
        ))
        .execute(conn)?;

    let request_id: i64 = conn.get_last_insert_rowid()?;
    info!(request_id, employee_id = request.employee_id, "Leave request submitted");
    Ok(request_id)
}

/// Cancels a request if it is still pending. Returns the number of rows updated.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn cancel_pending_request(
    conn: &mut SqliteConnection,
    request_id: i64,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(
        leave_requests::table
            .filter(leave_requests::id.eq(request_id))
            .filter(leave_requests::status.eq(LeaveStatus::Pending.as_str())),
    )
    .set(leave_requests::status.eq(LeaveStatus::Cancelled.as_str()))
    .execute(conn)?)
}

/// Records a decision on a request if it is still pending.
///
/// Returns the number of rows updated; zero means another decision won.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `request_id` - The request being decided
/// * `status` - `Approved` or `Rejected`
/// * `decided_by` - The deciding supervisor
/// * `comment` - Optional comment for the owner
/// * `now` - Decision timestamp
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn decide_pending_request(
    conn: &mut SqliteConnection,
    request_id: i64,
    status: LeaveStatus,
    decided_by: i64,
    comment: Option<&str>,
    now: &str,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(
        leave_requests::table
            .filter(leave_requests::id.eq(request_id))
            .filter(leave_requests::status.eq(LeaveStatus::Pending.as_str())),
    )
    .set((
        leave_requests::status.eq(status.as_str()),
        leave_requests::approved_by.eq(Some(decided_by)),
        leave_requests::approved_at.eq(Some(now)),
        leave_requests::comment.eq(comment),
    ))
    .execute(conn)?)
}

/// Adds `days` to `used_days` only if the balance still covers them.
///
/// Returns the number of rows updated; zero means the balance is missing
/// or insufficient.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn debit_balance(
    conn: &mut SqliteConnection,
    employee_id: i64,
    leave_type_id: i64,
    year: i32,
    days: i64,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(
        leave_balances::table
            .filter(leave_balances::employee_id.eq(employee_id))
            .filter(leave_balances::leave_type_id.eq(leave_type_id))
            .filter(leave_balances::year.eq(year))
            .filter((leave_balances::used_days + days).le(leave_balances::total_days)),
    )
    .set(leave_balances::used_days.eq(leave_balances::used_days + days))
    .execute(conn)?)
}
