// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave type, balance and request queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use hrdesk::{ExistingRequest, LeaveRequestSnapshot};
use hrdesk_domain::{DateRange, LeaveBalance, LeaveStatus, parse_date};
use tracing::debug;

use crate::data_models::{LeaveBalanceData, LeaveRequestData, LeaveTypeData, Page, PageRequest};
use crate::diesel_schema::{employees, leave_balances, leave_requests, leave_types};
use crate::error::PersistenceError;
use crate::queries::parse_stored;

#[derive(Queryable, Selectable)]
#[diesel(table_name = leave_types)]
struct LeaveTypeRow {
    id: i64,
    name: String,
    default_days: i64,
    description: Option<String>,
}

impl From<LeaveTypeRow> for LeaveTypeData {
    fn from(row: LeaveTypeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            default_days: row.default_days,
            description: row.description,
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = leave_requests)]
struct LeaveRequestRow {
    id: i64,
    employee_id: i64,
    leave_type_id: i64,
    start_date: String,
    end_date: String,
    total_days: i64,
    reason: Option<String>,
    status: String,
    approved_by: Option<i64>,
    approved_at: Option<String>,
    comment: Option<String>,
    created_at: String,
}

impl LeaveRequestRow {
    fn range(&self) -> Result<DateRange, PersistenceError> {
        let unreadable = |e: hrdesk_domain::DomainError| PersistenceError::QueryFailed(e.to_string());
        DateRange::new(
            parse_date(&self.start_date).map_err(unreadable)?,
            parse_date(&self.end_date).map_err(unreadable)?,
        )
        .map_err(unreadable)
    }

    fn into_data(
        self,
        employee_name: String,
        leave_type_name: String,
    ) -> Result<LeaveRequestData, PersistenceError> {
        Ok(LeaveRequestData {
            status: parse_stored::<LeaveStatus>(&self.status, "leave status")?,
            id: self.id,
            employee_id: self.employee_id,
            employee_name,
            leave_type_id: self.leave_type_id,
            leave_type_name,
            start_date: self.start_date,
            end_date: self.end_date,
            total_days: self.total_days,
            reason: self.reason,
            approved_by: self.approved_by,
            approved_at: self.approved_at,
            comment: self.comment,
            created_at: self.created_at,
        })
    }
}

type RequestWithNames = (LeaveRequestRow, String, String);
type BalanceTuple = (i64, i64, i64, String, i32, i64, i64);

fn into_data_list(rows: Vec<RequestWithNames>) -> Result<Vec<LeaveRequestData>, PersistenceError> {
    rows.into_iter()
        .map(|(row, employee_name, leave_type_name)| row.into_data(employee_name, leave_type_name))
        .collect()
}

/// Lists the leave catalog ordered by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_leave_types(conn: &mut SqliteConnection) -> Result<Vec<LeaveTypeData>, PersistenceError> {
    let rows: Vec<LeaveTypeRow> = leave_types::table
        .select(LeaveTypeRow::as_select())
        .order(leave_types::name.asc())
        .load(conn)?;
    Ok(rows.into_iter().map(LeaveTypeData::from).collect())
}

/// Retrieves a leave type by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the leave type is not found.
pub fn find_leave_type(
    conn: &mut SqliteConnection,
    leave_type_id: i64,
) -> Result<Option<LeaveTypeData>, PersistenceError> {
    let row: Option<LeaveTypeRow> = leave_types::table
        .filter(leave_types::id.eq(leave_type_id))
        .select(LeaveTypeRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.map(LeaveTypeData::from))
}

/// Lists an employee's balances for a year with leave type names.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_balances(
    conn: &mut SqliteConnection,
    employee_id: i64,
    year: i32,
) -> Result<Vec<LeaveBalanceData>, PersistenceError> {
    let rows: Vec<BalanceTuple> = leave_balances::table
        .inner_join(leave_types::table)
        .filter(leave_balances::employee_id.eq(employee_id))
        .filter(leave_balances::year.eq(year))
        .select((
            leave_balances::id,
            leave_balances::employee_id,
            leave_balances::leave_type_id,
            leave_types::name,
            leave_balances::year,
            leave_balances::total_days,
            leave_balances::used_days,
        ))
        .order(leave_types::name.asc())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(
            |(id, employee_id, leave_type_id, leave_type_name, year, total_days, used_days)| {
                LeaveBalanceData {
                    id,
                    employee_id,
                    leave_type_id,
                    leave_type_name,
                    year,
                    total_days,
                    used_days,
                    available_days: LeaveBalance::new(total_days, used_days).available_days(),
                }
            },
        )
        .collect())
}

/// Retrieves the balance for (employee, leave type, year).
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no balance row exists.
pub fn find_balance(
    conn: &mut SqliteConnection,
    employee_id: i64,
    leave_type_id: i64,
    year: i32,
) -> Result<Option<LeaveBalance>, PersistenceError> {
    debug!(employee_id, leave_type_id, year, "Looking up leave balance");

    let row: Option<(i64, i64)> = leave_balances::table
        .filter(leave_balances::employee_id.eq(employee_id))
        .filter(leave_balances::leave_type_id.eq(leave_type_id))
        .filter(leave_balances::year.eq(year))
        .select((leave_balances::total_days, leave_balances::used_days))
        .first(conn)
        .optional()?;
    Ok(row.map(|(total, used)| LeaveBalance::new(total, used)))
}

/// Retrieves a leave request with employee and leave type names.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the request is not found.
pub fn find_request(
    conn: &mut SqliteConnection,
    request_id: i64,
) -> Result<Option<LeaveRequestData>, PersistenceError> {
    let row: Option<RequestWithNames> = leave_requests::table
        .inner_join(employees::table)
        .inner_join(leave_types::table)
        .filter(leave_requests::id.eq(request_id))
        .select((
            LeaveRequestRow::as_select(),
            employees::name,
            leave_types::name,
        ))
        .first(conn)
        .optional()?;

    row.map(|(row, employee_name, leave_type_name)| row.into_data(employee_name, leave_type_name))
        .transpose()
}

/// Loads a request as seen by the cancel and process rules.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the request is not found.
pub fn find_request_snapshot(
    conn: &mut SqliteConnection,
    request_id: i64,
) -> Result<Option<LeaveRequestSnapshot>, PersistenceError> {
    let row: Option<(LeaveRequestRow, String)> = leave_requests::table
        .inner_join(leave_types::table)
        .filter(leave_requests::id.eq(request_id))
        .select((LeaveRequestRow::as_select(), leave_types::name))
        .first(conn)
        .optional()?;

    let Some((row, leave_type_name)) = row else {
        return Ok(None);
    };
    Ok(Some(LeaveRequestSnapshot {
        id: row.id,
        employee_id: row.employee_id,
        leave_type_id: row.leave_type_id,
        leave_type_name,
        range: row.range()?,
        total_days: row.total_days,
        status: parse_stored::<LeaveStatus>(&row.status, "leave status")?,
    }))
}

/// The employee's requests that still reserve dates (pending or approved).
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn reserving_requests(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Vec<ExistingRequest>, PersistenceError> {
    let rows: Vec<LeaveRequestRow> = leave_requests::table
        .filter(leave_requests::employee_id.eq(employee_id))
        .filter(leave_requests::status.eq_any([
            LeaveStatus::Pending.as_str(),
            LeaveStatus::Approved.as_str(),
        ]))
        .select(LeaveRequestRow::as_select())
        .load(conn)?;

    rows.iter()
        .map(|row| {
            Ok(ExistingRequest {
                id: row.id,
                range: row.range()?,
                status: parse_stored::<LeaveStatus>(&row.status, "leave status")?,
            })
        })
        .collect()
}

/// Lists an employee's own requests, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_requests_for_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
    status: Option<LeaveStatus>,
    page: PageRequest,
) -> Result<Page<LeaveRequestData>, PersistenceError> {
    let mut count_query = leave_requests::table
        .filter(leave_requests::employee_id.eq(employee_id))
        .into_boxed();
    let mut query = leave_requests::table
        .inner_join(employees::table)
        .inner_join(leave_types::table)
        .filter(leave_requests::employee_id.eq(employee_id))
        .into_boxed();
    if let Some(status) = status {
        count_query = count_query.filter(leave_requests::status.eq(status.as_str()));
        query = query.filter(leave_requests::status.eq(status.as_str()));
    }

    let total: i64 = count_query.count().get_result(conn)?;
    let rows: Vec<RequestWithNames> = query
        .select((
            LeaveRequestRow::as_select(),
            employees::name,
            leave_types::name,
        ))
        .order((leave_requests::created_at.desc(), leave_requests::id.desc()))
        .limit(page.per_page)
        .offset(page.offset())
        .load(conn)?;

    Ok(Page {
        items: into_data_list(rows)?,
        total,
        page: page.page,
        per_page: page.per_page,
    })
}

/// Pending requests owned by any of the given employees, oldest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_pending_for(
    conn: &mut SqliteConnection,
    employee_ids: &[i64],
) -> Result<Vec<LeaveRequestData>, PersistenceError> {
    if employee_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows: Vec<RequestWithNames> = leave_requests::table
        .inner_join(employees::table)
        .inner_join(leave_types::table)
        .filter(leave_requests::employee_id.eq_any(employee_ids))
        .filter(leave_requests::status.eq(LeaveStatus::Pending.as_str()))
        .select((
            LeaveRequestRow::as_select(),
            employees::name,
            leave_types::name,
        ))
        .order((leave_requests::created_at.asc(), leave_requests::id.asc()))
        .load(conn)?;
    into_data_list(rows)
}

/// Counts pending requests owned by any of the given employees.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_pending_for(
    conn: &mut SqliteConnection,
    employee_ids: &[i64],
) -> Result<i64, PersistenceError> {
    if employee_ids.is_empty() {
        return Ok(0);
    }
    Ok(leave_requests::table
        .filter(leave_requests::employee_id.eq_any(employee_ids))
        .filter(leave_requests::status.eq(LeaveStatus::Pending.as_str()))
        .count()
        .get_result(conn)?)
}

/// Employees whose approved leave covers the given date.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn on_leave_on(
    conn: &mut SqliteConnection,
    employee_ids: &[i64],
    date: &str,
) -> Result<Vec<i64>, PersistenceError> {
    if employee_ids.is_empty() {
        return Ok(Vec::new());
    }
    Ok(leave_requests::table
        .filter(leave_requests::employee_id.eq_any(employee_ids))
        .filter(leave_requests::status.eq(LeaveStatus::Approved.as_str()))
        .filter(leave_requests::start_date.le(date))
        .filter(leave_requests::end_date.ge(date))
        .select(leave_requests::employee_id)
        .distinct()
        .load(conn)?)
}
