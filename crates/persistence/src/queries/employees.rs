// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee queries.
//!
//! Listings load bare employee rows first and then resolve catalog names
//! in one batch per catalog.

use std::collections::{BTreeSet, HashMap};

use diesel::prelude::*;
use diesel::SqliteConnection;
use diesel::sqlite::Sqlite;
use hrdesk_domain::{EmployeeCode, EmployeeProfile, Role};
use tracing::debug;

use crate::data_models::{
    CatalogKind, CredentialData, EmployeeData, EmployeeFilter, EmployeeRef, Page, PageRequest,
};
use crate::diesel_schema::employees;
use crate::error::PersistenceError;
use crate::queries::catalog::catalog_names;

/// Diesel Queryable struct for employee rows. The password hash is not selected.
#[derive(Queryable, Selectable)]
#[diesel(table_name = employees)]
struct EmployeeRow {
    id: i64,
    employee_code: String,
    name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>,
    emergency_contact: Option<String>,
    department_id: Option<i64>,
    designation_id: Option<i64>,
    role_id: i64,
    employee_type_id: Option<i64>,
    is_supervisor: i32,
    reports_to: Option<i64>,
    is_active: i32,
    hire_date: String,
    profile_image: Option<String>,
    created_at: String,
    updated_at: String,
}

/// Diesel Queryable struct for the columns needed by authorization.
#[derive(Queryable, Selectable)]
#[diesel(table_name = employees)]
struct ProfileRow {
    id: i64,
    role_id: i64,
    department_id: Option<i64>,
    is_supervisor: i32,
    reports_to: Option<i64>,
    is_active: i32,
}

impl From<ProfileRow> for EmployeeProfile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            role: Role::from_id(row.role_id),
            department_id: row.department_id,
            is_supervisor: row.is_supervisor != 0,
            reports_to: row.reports_to,
            is_active: row.is_active != 0,
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = employees)]
struct CredentialRow {
    id: i64,
    password_hash: String,
    is_active: i32,
}

impl From<CredentialRow> for CredentialData {
    fn from(row: CredentialRow) -> Self {
        Self {
            employee_id: row.id,
            password_hash: row.password_hash,
            is_active: row.is_active != 0,
        }
    }
}

fn distinct_ids(ids: impl Iterator<Item = Option<i64>>) -> Vec<i64> {
    ids.flatten().collect::<BTreeSet<i64>>().into_iter().collect()
}

/// Resolves catalog names for a batch of employee rows.
fn hydrate(
    conn: &mut SqliteConnection,
    rows: Vec<EmployeeRow>,
) -> Result<Vec<EmployeeData>, PersistenceError> {
    let departments: HashMap<i64, String> = catalog_names(
        conn,
        CatalogKind::Departments,
        &distinct_ids(rows.iter().map(|r| r.department_id)),
    )?;
    let designations: HashMap<i64, String> = catalog_names(
        conn,
        CatalogKind::Designations,
        &distinct_ids(rows.iter().map(|r| r.designation_id)),
    )?;
    let roles: HashMap<i64, String> = catalog_names(
        conn,
        CatalogKind::Roles,
        &distinct_ids(rows.iter().map(|r| Some(r.role_id))),
    )?;
    let employee_types: HashMap<i64, String> = catalog_names(
        conn,
        CatalogKind::EmployeeTypes,
        &distinct_ids(rows.iter().map(|r| r.employee_type_id)),
    )?;

    let name_of = |names: &HashMap<i64, String>, id: Option<i64>| -> Option<String> {
        id.and_then(|id| names.get(&id).cloned())
    };

    Ok(rows
        .into_iter()
        .map(|row| EmployeeData {
            department_name: name_of(&departments, row.department_id),
            designation_name: name_of(&designations, row.designation_id),
            role_name: name_of(&roles, Some(row.role_id)),
            employee_type_name: name_of(&employee_types, row.employee_type_id),
            role: Role::from_id(row.role_id),
            id: row.id,
            employee_code: row.employee_code,
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            emergency_contact: row.emergency_contact,
            department_id: row.department_id,
            designation_id: row.designation_id,
            role_id: row.role_id,
            employee_type_id: row.employee_type_id,
            is_supervisor: row.is_supervisor != 0,
            reports_to: row.reports_to,
            is_active: row.is_active != 0,
            hire_date: row.hire_date,
            profile_image: row.profile_image,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
        .collect())
}

/// Retrieves an employee by ID with catalog names resolved.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the employee is not found.
pub fn find_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Option<EmployeeData>, PersistenceError> {
    debug!(employee_id, "Looking up employee");

    let row: Option<EmployeeRow> = employees::table
        .filter(employees::id.eq(employee_id))
        .select(EmployeeRow::as_select())
        .first(conn)
        .optional()?;

    match row {
        Some(row) => Ok(hydrate(conn, vec![row])?.into_iter().next()),
        None => Ok(None),
    }
}

/// Retrieves the authorization profile of an employee.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the employee is not found.
pub fn find_profile(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Option<EmployeeProfile>, PersistenceError> {
    let result: Result<ProfileRow, diesel::result::Error> = employees::table
        .filter(employees::id.eq(employee_id))
        .select(ProfileRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(EmployeeProfile::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves login material by exact, case-sensitive email.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no employee has that email.
pub fn find_credentials_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<CredentialData>, PersistenceError> {
    debug!("Looking up credentials by email");

    let row: Option<CredentialRow> = employees::table
        .filter(employees::email.eq(email))
        .select(CredentialRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.map(CredentialData::from))
}

/// Retrieves login material by employee ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the employee is not found.
pub fn find_credentials_by_id(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Option<CredentialData>, PersistenceError> {
    let row: Option<CredentialRow> = employees::table
        .filter(employees::id.eq(employee_id))
        .select(CredentialRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.map(CredentialData::from))
}

/// Checks whether an email is already registered.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn email_exists(conn: &mut SqliteConnection, email: &str) -> Result<bool, PersistenceError> {
    let count: i64 = employees::table
        .filter(employees::email.eq(email))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Checks whether an employee exists.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn employee_exists(conn: &mut SqliteConnection, employee_id: i64) -> Result<bool, PersistenceError> {
    let count: i64 = employees::table
        .filter(employees::id.eq(employee_id))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Returns the `reports_to` of an employee, or `None` if the employee does not exist.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn manager_of(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Option<i64>, PersistenceError> {
    let manager: Option<Option<i64>> = employees::table
        .filter(employees::id.eq(employee_id))
        .select(employees::reports_to)
        .first(conn)
        .optional()?;
    Ok(manager.flatten())
}

/// Highest employee-code sequence issued for a year.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn highest_code_sequence(
    conn: &mut SqliteConnection,
    year: i32,
) -> Result<Option<u32>, PersistenceError> {
    let codes: Vec<String> = employees::table
        .filter(employees::employee_code.like(format!("{}%", EmployeeCode::year_prefix(year))))
        .select(employees::employee_code)
        .load(conn)?;

    Ok(codes
        .iter()
        .filter_map(|code| code.parse::<EmployeeCode>().ok())
        .filter(|code| code.year() == year)
        .map(|code| code.sequence())
        .max())
}

type EmployeeQuery = employees::BoxedQuery<'static, Sqlite>;

/// Employees the actor supervises: direct reports or department peers, never the actor.
fn scoped(actor: &EmployeeProfile) -> EmployeeQuery {
    let query: EmployeeQuery = employees::table
        .filter(employees::id.ne(actor.id))
        .into_boxed();
    match actor.department_id {
        Some(department_id) => query.filter(
            employees::reports_to
                .eq(actor.id)
                .or(employees::department_id.eq(department_id)),
        ),
        None => query.filter(employees::reports_to.eq(actor.id)),
    }
}

fn filtered(actor: &EmployeeProfile, filter: &EmployeeFilter) -> EmployeeQuery {
    let mut query: EmployeeQuery = scoped(actor);
    if let Some(department_id) = filter.department_id {
        query = query.filter(employees::department_id.eq(department_id));
    }
    if let Some(active) = filter.active {
        query = query.filter(employees::is_active.eq(i32::from(active)));
    }
    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern: String = format!("%{search}%");
        query = query.filter(
            employees::name
                .like(pattern.clone())
                .or(employees::email.like(pattern.clone()))
                .or(employees::employee_code.like(pattern)),
        );
    }
    query
}

/// Lists the employees within the actor's supervision scope.
///
/// The department filter narrows the scope and never widens it.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `actor` - The supervisor whose scope bounds the listing
/// * `filter` - Optional department, active and search filters
/// * `page` - Page to return
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_employees(
    conn: &mut SqliteConnection,
    actor: &EmployeeProfile,
    filter: &EmployeeFilter,
    page: PageRequest,
) -> Result<Page<EmployeeData>, PersistenceError> {
    let total: i64 = filtered(actor, filter).count().get_result(conn)?;

    let rows: Vec<EmployeeRow> = filtered(actor, filter)
        .select(EmployeeRow::as_select())
        .order(employees::name.asc())
        .limit(page.per_page)
        .offset(page.offset())
        .load(conn)?;

    Ok(Page {
        items: hydrate(conn, rows)?,
        total,
        page: page.page,
        per_page: page.per_page,
    })
}

/// Profiles of every active employee the actor supervises.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn team_profiles(
    conn: &mut SqliteConnection,
    actor: &EmployeeProfile,
) -> Result<Vec<EmployeeProfile>, PersistenceError> {
    let rows: Vec<ProfileRow> = scoped(actor)
        .filter(employees::is_active.eq(1))
        .select(ProfileRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(EmployeeProfile::from).collect())
}

/// Active supervisors that may be responsible for an employee.
///
/// Returns the employee's manager and the supervisors of the employee's
/// department. The final scope decision is made by the caller.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn supervisor_candidates(
    conn: &mut SqliteConnection,
    employee: &EmployeeProfile,
) -> Result<Vec<EmployeeProfile>, PersistenceError> {
    let mut query: EmployeeQuery = employees::table
        .filter(employees::is_supervisor.eq(1))
        .filter(employees::is_active.eq(1))
        .filter(employees::id.ne(employee.id))
        .into_boxed();
    query = match (employee.reports_to, employee.department_id) {
        (Some(manager), Some(department_id)) => query.filter(
            employees::id
                .eq(manager)
                .or(employees::department_id.eq(department_id)),
        ),
        (Some(manager), None) => query.filter(employees::id.eq(manager)),
        (None, Some(department_id)) => query.filter(employees::department_id.eq(department_id)),
        (None, None) => return Ok(Vec::new()),
    };

    let rows: Vec<ProfileRow> = query.select(ProfileRow::as_select()).load(conn)?;
    Ok(rows.into_iter().map(EmployeeProfile::from).collect())
}

/// Minimal references for a set of employees, ordered by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn employee_refs(
    conn: &mut SqliteConnection,
    ids: &[i64],
) -> Result<Vec<EmployeeRef>, PersistenceError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows: Vec<(i64, String, String)> = employees::table
        .filter(employees::id.eq_any(ids))
        .select((employees::id, employees::employee_code, employees::name))
        .order(employees::name.asc())
        .load(conn)?;
    Ok(rows
        .into_iter()
        .map(|(id, employee_code, name)| EmployeeRef {
            id,
            employee_code,
            name,
        })
        .collect())
}

/// Counts every employee. Used to detect an empty database.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_employees(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(employees::table.count().get_result(conn)?)
}

