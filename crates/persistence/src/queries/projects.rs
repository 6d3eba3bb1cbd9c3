// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use hrdesk_domain::ProjectStatus;

use crate::data_models::{AssignmentData, ProjectData};
use crate::diesel_schema::{employees, project_assignments, projects};
use crate::error::PersistenceError;
use crate::queries::parse_stored;

#[derive(Queryable, Selectable)]
#[diesel(table_name = projects)]
struct ProjectRow {
    id: i64,
    name: String,
    description: Option<String>,
    status: String,
    start_date: Option<String>,
    end_date: Option<String>,
    created_by: i64,
    created_at: String,
}

impl ProjectRow {
    fn into_data(self) -> Result<ProjectData, PersistenceError> {
        Ok(ProjectData {
            status: parse_stored::<ProjectStatus>(&self.status, "project status")?,
            id: self.id,
            name: self.name,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
            created_by: self.created_by,
            created_at: self.created_at,
        })
    }
}

/// Lists projects by name. With `member` set, only projects that employee is assigned to.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_projects(
    conn: &mut SqliteConnection,
    member: Option<i64>,
) -> Result<Vec<ProjectData>, PersistenceError> {
    let rows: Vec<ProjectRow> = match member {
        Some(employee_id) => projects::table
            .inner_join(project_assignments::table)
            .filter(project_assignments::employee_id.eq(employee_id))
            .select(ProjectRow::as_select())
            .order(projects::name.asc())
            .load(conn)?,
        None => projects::table
            .select(ProjectRow::as_select())
            .order(projects::name.asc())
            .load(conn)?,
    };
    rows.into_iter().map(ProjectRow::into_data).collect()
}

/// Retrieves a project by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the project is not found.
pub fn find_project(
    conn: &mut SqliteConnection,
    project_id: i64,
) -> Result<Option<ProjectData>, PersistenceError> {
    let row: Option<ProjectRow> = projects::table
        .filter(projects::id.eq(project_id))
        .select(ProjectRow::as_select())
        .first(conn)
        .optional()?;
    row.map(ProjectRow::into_data).transpose()
}

type AssignmentTuple = (
    i64,
    i64,
    i64,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
);

/// Lists a project's assignments by employee name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_assignments(
    conn: &mut SqliteConnection,
    project_id: i64,
) -> Result<Vec<AssignmentData>, PersistenceError> {
    let rows: Vec<AssignmentTuple> = project_assignments::table
        .inner_join(employees::table)
        .filter(project_assignments::project_id.eq(project_id))
        .select((
            project_assignments::id,
            project_assignments::project_id,
            project_assignments::employee_id,
            employees::name,
            project_assignments::role,
            project_assignments::start_date,
            project_assignments::end_date,
        ))
        .order(employees::name.asc())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(
            |(id, project_id, employee_id, employee_name, role, start_date, end_date)| {
                AssignmentData {
                    id,
                    project_id,
                    employee_id,
                    employee_name,
                    role,
                    start_date,
                    end_date,
                }
            },
        )
        .collect())
}

/// Counts an employee's assignments on projects with the given status.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_projects_for(
    conn: &mut SqliteConnection,
    employee_id: i64,
    status: ProjectStatus,
) -> Result<i64, PersistenceError> {
    Ok(project_assignments::table
        .inner_join(projects::table)
        .filter(project_assignments::employee_id.eq(employee_id))
        .filter(projects::status.eq(status.as_str()))
        .count()
        .get_result(conn)?)
}
