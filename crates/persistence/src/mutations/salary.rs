// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use hrdesk_domain::format_date;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::NewSalaryRecord;
use crate::diesel_schema::salary_history;
use crate::error::PersistenceError;

/// Appends a salary row. Salary rows are never updated or deleted.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The employee being paid
/// * `record` - Amount, effective date and reason
/// * `created_by` - The recording employee, `None` for system writes
/// * `now` - Storage timestamp
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_salary_record(
    conn: &mut SqliteConnection,
    employee_id: i64,
    record: &NewSalaryRecord,
    created_by: Option<i64>,
    now: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(salary_history::table)
        .values((
            salary_history::employee_id.eq(employee_id),
            salary_history::amount_cents.eq(record.amount.cents()),
            salary_history::effective_date.eq(format_date(record.effective_date)),
            salary_history::reason.eq(record.reason.as_deref()),
            salary_history::created_by.eq(created_by),
            salary_history::created_at.eq(now),
        ))
        .execute(conn)?;

    let salary_id: i64 = conn.get_last_insert_rowid()?;
    info!(salary_id, employee_id, "Salary record appended");
    Ok(salary_id)
}
