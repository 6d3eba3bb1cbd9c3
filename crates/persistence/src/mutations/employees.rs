// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use hrdesk_domain::{EmployeeCode, Role, format_date};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{ContactUpdate, EmployeeUpdate, NewEmployee};
use crate::diesel_schema::employees;
use crate::error::PersistenceError;

/// Inserts an employee row.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `code` - The generated employee code
/// * `employee` - The validated registration input
/// * `password_hash` - The bcrypt hash of the initial password
/// * `now` - Storage timestamp for `created_at` and `updated_at`
///
/// # Errors
///
/// Returns `UniqueViolation` if the email or code is taken.
pub fn insert_employee(
    conn: &mut SqliteConnection,
    code: &EmployeeCode,
    employee: &NewEmployee,
    password_hash: &str,
    now: &str,
) -> Result<i64, PersistenceError> {
    let role_id: i64 = employee.role_id.unwrap_or(Role::REGULAR_EMPLOYEE_ID);

    diesel::insert_into(employees::table)
        .values((
            employees::employee_code.eq(code.to_string()),
            employees::name.eq(employee.name.trim()),
            employees::email.eq(employee.email.trim()),
            employees::password_hash.eq(password_hash),
            employees::phone.eq(employee.phone.as_deref()),
            employees::address.eq(employee.address.as_deref()),
            employees::emergency_contact.eq(employee.emergency_contact.as_deref()),
            employees::department_id.eq(employee.department_id),
            employees::designation_id.eq(employee.designation_id),
            employees::role_id.eq(role_id),
            employees::employee_type_id.eq(employee.employee_type_id),
            employees::is_supervisor.eq(i32::from(employee.is_supervisor)),
            employees::reports_to.eq(employee.reports_to),
            employees::is_active.eq(1),
            employees::hire_date.eq(format_date(employee.hire_date)),
            employees::created_at.eq(now),
            employees::updated_at.eq(now),
        ))
        .execute(conn)?;

    let employee_id: i64 = conn.get_last_insert_rowid()?;
    info!(employee_id, employee_code = %code, "Employee inserted");
    Ok(employee_id)
}

#[derive(AsChangeset)]
#[diesel(table_name = employees)]
struct EmployeeChangeset<'a> {
    name: Option<&'a str>,
    phone: Option<&'a str>,
    address: Option<&'a str>,
    emergency_contact: Option<&'a str>,
    department_id: Option<Option<i64>>,
    designation_id: Option<Option<i64>>,
    role_id: Option<i64>,
    employee_type_id: Option<Option<i64>>,
    is_supervisor: Option<i32>,
    reports_to: Option<Option<i64>>,
    updated_at: &'a str,
}

/// Applies self-service contact changes.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_contact(
    conn: &mut SqliteConnection,
    employee_id: i64,
    update: &ContactUpdate,
    now: &str,
) -> Result<usize, PersistenceError> {
    debug!(employee_id, "Updating contact fields");

    Ok(diesel::update(employees::table.filter(employees::id.eq(employee_id)))
        .set(EmployeeChangeset {
            name: None,
            phone: update.phone.as_deref(),
            address: update.address.as_deref(),
            emergency_contact: update.emergency_contact.as_deref(),
            department_id: None,
            designation_id: None,
            role_id: None,
            employee_type_id: None,
            is_supervisor: None,
            reports_to: None,
            updated_at: now,
        })
        .execute(conn)?)
}

/// Applies supervisor changes to an employee.
///
/// References must already be validated by the caller.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
    update: &EmployeeUpdate,
    now: &str,
) -> Result<usize, PersistenceError> {
    info!(employee_id, "Updating employee");

    Ok(diesel::update(employees::table.filter(employees::id.eq(employee_id)))
        .set(EmployeeChangeset {
            name: update.name.as_deref().map(str::trim),
            phone: update.phone.as_deref(),
            address: update.address.as_deref(),
            emergency_contact: update.emergency_contact.as_deref(),
            department_id: update.department_id,
            designation_id: update.designation_id,
            role_id: update.role_id,
            employee_type_id: update.employee_type_id,
            is_supervisor: update.is_supervisor.map(i32::from),
            reports_to: update.reports_to,
            updated_at: now,
        })
        .execute(conn)?)
}

/// Activates or deactivates an employee.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn set_active(
    conn: &mut SqliteConnection,
    employee_id: i64,
    is_active: bool,
    now: &str,
) -> Result<usize, PersistenceError> {
    info!(employee_id, is_active, "Changing employee status");

    Ok(diesel::update(employees::table.filter(employees::id.eq(employee_id)))
        .set((
            employees::is_active.eq(i32::from(is_active)),
            employees::updated_at.eq(now),
        ))
        .execute(conn)?)
}

/// Replaces an employee's password hash.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn set_password_hash(
    conn: &mut SqliteConnection,
    employee_id: i64,
    password_hash: &str,
    now: &str,
) -> Result<usize, PersistenceError> {
    info!(employee_id, "Replacing password hash");

    Ok(diesel::update(employees::table.filter(employees::id.eq(employee_id)))
        .set((
            employees::password_hash.eq(password_hash),
            employees::updated_at.eq(now),
        ))
        .execute(conn)?)
}

/// Points an employee's profile image at a stored file.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn set_profile_image(
    conn: &mut SqliteConnection,
    employee_id: i64,
    relative_path: &str,
    now: &str,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(employees::table.filter(employees::id.eq(employee_id)))
        .set((
            employees::profile_image.eq(relative_path),
            employees::updated_at.eq(now),
        ))
        .execute(conn)?)
}
