// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use hrdesk_domain::format_date;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::{NewAssignment, NewProject, ProjectUpdate};
use crate::diesel_schema::{project_assignments, projects};
use crate::error::PersistenceError;

/// Inserts a project.
///
/// # Errors
///
/// Returns `UniqueViolation` if the name is taken.
pub fn insert_project(
    conn: &mut SqliteConnection,
    project: &NewProject,
    created_by: i64,
    now: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(projects::table)
        .values((
            projects::name.eq(project.name.trim()),
            projects::description.eq(project.description.as_deref()),
            projects::status.eq(project.status.as_str()),
            projects::start_date.eq(project.start_date.map(format_date)),
            projects::end_date.eq(project.end_date.map(format_date)),
            projects::created_by.eq(created_by),
            projects::created_at.eq(now),
        ))
        .execute(conn)?;

    let project_id: i64 = conn.get_last_insert_rowid()?;
    info!(project_id, name = %project.name, "Project created");
    Ok(project_id)
}

#[derive(AsChangeset)]
#[diesel(table_name = projects)]
struct ProjectChangeset<'a> {
    name: Option<&'a str>,
    description: Option<Option<&'a str>>,
    status: Option<&'static str>,
    start_date: Option<Option<String>>,
    end_date: Option<Option<String>>,
}

/// Applies project changes. Returns the number of rows updated.
///
/// # Errors
///
/// Returns `UniqueViolation` if the new name is taken.
pub fn update_project(
    conn: &mut SqliteConnection,
    project_id: i64,
    update: &ProjectUpdate,
) -> Result<usize, PersistenceError> {
    let changes: ProjectChangeset<'_> = ProjectChangeset {
        name: update.name.as_deref().map(str::trim),
        description: update.description.as_ref().map(Option::as_deref),
        status: update.status.map(|s| s.as_str()),
        start_date: update.start_date.map(|d| d.map(format_date)),
        end_date: update.end_date.map(|d| d.map(format_date)),
    };
    if changes.name.is_none()
        && changes.description.is_none()
        && changes.status.is_none()
        && changes.start_date.is_none()
        && changes.end_date.is_none()
    {
        let count: i64 = projects::table
            .filter(projects::id.eq(project_id))
            .count()
            .get_result(conn)?;
        return Ok(usize::from(count > 0));
    }

    let updated: usize = diesel::update(projects::table.filter(projects::id.eq(project_id)))
        .set(changes)
        .execute(conn)?;
    info!(project_id, updated, "Project updated");
    Ok(updated)
}

/// Assigns an employee to a project.
///
/// # Errors
///
/// Returns `UniqueViolation` if the employee is already assigned.
pub fn insert_assignment(
    conn: &mut SqliteConnection,
    project_id: i64,
    assignment: &NewAssignment,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(project_assignments::table)
        .values((
            project_assignments::project_id.eq(project_id),
            project_assignments::employee_id.eq(assignment.employee_id),
            project_assignments::role.eq(assignment.role.as_deref()),
            project_assignments::start_date.eq(assignment.start_date.map(format_date)),
            project_assignments::end_date.eq(assignment.end_date.map(format_date)),
        ))
        .execute(conn)?;

    let assignment_id: i64 = conn.get_last_insert_rowid()?;
    info!(project_id, employee_id = assignment.employee_id, "Employee assigned");
    Ok(assignment_id)
}

/// Removes an assignment. Returns the number of rows removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_assignment(
    conn: &mut SqliteConnection,
    project_id: i64,
    employee_id: i64,
) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(
        project_assignments::table
            .filter(project_assignments::project_id.eq(project_id))
            .filter(project_assignments::employee_id.eq(employee_id)),
    )
    .execute(conn)?)
}
