// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Salary ledger queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use hrdesk_domain::{SalaryAmount, SalaryEntry, current_salary, parse_date, parse_timestamp};

use crate::data_models::SalaryRecordData;
use crate::diesel_schema::salary_history;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = salary_history)]
struct SalaryRow {
    id: i64,
    employee_id: i64,
    amount_cents: i64,
    effective_date: String,
    reason: Option<String>,
    created_by: Option<i64>,
    created_at: String,
}

impl SalaryRow {
    fn into_data(self) -> Result<SalaryRecordData, PersistenceError> {
        let amount: SalaryAmount = SalaryAmount::from_cents(self.amount_cents)
            .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
        Ok(SalaryRecordData {
            id: self.id,
            employee_id: self.employee_id,
            amount: amount.as_major(),
            amount_cents: self.amount_cents,
            effective_date: self.effective_date,
            reason: self.reason,
            created_by: self.created_by,
            created_at: self.created_at,
        })
    }

    fn entry(&self) -> Result<SalaryEntry, PersistenceError> {
        let unreadable = |e: hrdesk_domain::DomainError| PersistenceError::QueryFailed(e.to_string());
        Ok(SalaryEntry {
            id: self.id,
            amount: SalaryAmount::from_cents(self.amount_cents).map_err(unreadable)?,
            effective_date: parse_date(&self.effective_date).map_err(unreadable)?,
            recorded_at: parse_timestamp(&self.created_at).map_err(unreadable)?,
        })
    }
}

fn load_rows(conn: &mut SqliteConnection, employee_id: i64) -> Result<Vec<SalaryRow>, PersistenceError> {
    Ok(salary_history::table
        .filter(salary_history::employee_id.eq(employee_id))
        .select(SalaryRow::as_select())
        .order((
            salary_history::effective_date.desc(),
            salary_history::created_at.desc(),
            salary_history::id.desc(),
        ))
        .load(conn)?)
}

/// Lists an employee's salary ledger, newest effective date first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_salary_history(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Vec<SalaryRecordData>, PersistenceError> {
    load_rows(conn, employee_id)?
        .into_iter()
        .map(SalaryRow::into_data)
        .collect()
}

/// Resolves the current salary of an employee.
///
/// The current salary is the row with the latest effective date, then the
/// latest recording time, then the highest ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the employee has no salary rows.
pub fn find_current_salary(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Option<SalaryRecordData>, PersistenceError> {
    let rows: Vec<SalaryRow> = load_rows(conn, employee_id)?;
    let entries: Vec<SalaryEntry> = rows
        .iter()
        .map(SalaryRow::entry)
        .collect::<Result<_, _>>()?;

    let Some(current_id) = current_salary(&entries).map(|entry| entry.id) else {
        return Ok(None);
    };
    rows.into_iter()
        .find(|row| row.id == current_id)
        .map(SalaryRow::into_data)
        .transpose()
}

/// Retrieves one salary row by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the row is not found.
pub fn find_salary_record(
    conn: &mut SqliteConnection,
    salary_id: i64,
) -> Result<Option<SalaryRecordData>, PersistenceError> {
    let row: Option<SalaryRow> = salary_history::table
        .filter(salary_history::id.eq(salary_id))
        .select(SalaryRow::as_select())
        .first(conn)
        .optional()?;
    row.map(SalaryRow::into_data).transpose()
}
