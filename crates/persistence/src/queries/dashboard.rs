// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dashboard aggregations.
//!
//! "Today" is supplied by the caller as a company-local date.

use diesel::SqliteConnection;
use hrdesk_domain::{EmployeeProfile, ProjectStatus, format_date};
use time::Date;

use crate::data_models::{EmployeeDashboard, SupervisorDashboard};
use crate::error::PersistenceError;
use crate::queries::{attendance, employees, leave, notifications, projects, salary};

fn month_bounds(today: Date) -> (String, String) {
    let first: Date = today.replace_day(1).unwrap_or(today);
    let last: Date = today
        .replace_day(today.month().length(today.year()))
        .unwrap_or(today);
    (format_date(first), format_date(last))
}

/// Builds the dashboard an employee sees for themselves.
///
/// # Errors
///
/// Returns an error if any aggregate query fails.
pub fn employee_dashboard(
    conn: &mut SqliteConnection,
    employee_id: i64,
    today: Date,
) -> Result<EmployeeDashboard, PersistenceError> {
    let (month_start, month_end): (String, String) = month_bounds(today);

    Ok(EmployeeDashboard {
        leave_balances: leave::list_balances(conn, employee_id, today.year())?,
        pending_requests: leave::count_pending_for(conn, &[employee_id])?,
        attendance_this_month: attendance::count_by_status(
            conn,
            &[employee_id],
            &month_start,
            &month_end,
        )?,
        unread_notifications: notifications::unread_count(conn, employee_id)?,
        active_projects: projects::count_projects_for(conn, employee_id, ProjectStatus::Active)?,
        current_salary: salary::find_current_salary(conn, employee_id)?,
    })
}

/// Builds the team dashboard for a supervisor.
///
/// # Errors
///
/// Returns an error if any aggregate query fails.
pub fn supervisor_dashboard(
    conn: &mut SqliteConnection,
    actor: &EmployeeProfile,
    today: Date,
) -> Result<SupervisorDashboard, PersistenceError> {
    let team: Vec<i64> = employees::team_profiles(conn, actor)?
        .into_iter()
        .map(|profile| profile.id)
        .collect();
    let today: String = format_date(today);
    let on_leave: Vec<i64> = leave::on_leave_on(conn, &team, &today)?;

    Ok(SupervisorDashboard {
        team_size: i64::try_from(team.len()).unwrap_or(i64::MAX),
        pending_approvals: leave::count_pending_for(conn, &team)?,
        attendance_today: attendance::count_by_status(conn, &team, &today, &today)?,
        on_leave_today: employees::employee_refs(conn, &on_leave)?,
    })
}
