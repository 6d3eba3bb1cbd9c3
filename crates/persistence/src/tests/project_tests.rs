// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hrdesk_domain::ProjectStatus;
use time::Month;

use super::{TestTeam, create_test_date, create_test_persistence, create_test_team, current_year, load_profile};
use crate::{
    NewAssignment, NewProject, PageRequest, Persistence, PersistenceError, ProjectData,
    ProjectUpdate,
};

fn create_test_project(name: &str) -> NewProject {
    NewProject {
        name: name.to_string(),
        description: Some(String::from("Internal tooling")),
        status: ProjectStatus::Active,
        start_date: Some(create_test_date(2026, Month::January, 5)),
        end_date: None,
    }
}

fn create_test_assignment(employee_id: i64) -> NewAssignment {
    NewAssignment {
        employee_id,
        role: Some(String::from("Developer")),
        start_date: None,
        end_date: None,
    }
}

#[test]
fn test_project_lifecycle() {
    let persistence: Persistence = create_test_persistence();
    let team: TestTeam = create_test_team(&persistence);

    let project: ProjectData = persistence
        .create_project(team.supervisor.id, &create_test_project("Atlas"))
        .unwrap();
    assert_eq!(project.status, ProjectStatus::Active);
    assert_eq!(project.start_date.as_deref(), Some("2026-01-05"));

    let duplicate = persistence.create_project(team.supervisor.id, &create_test_project("Atlas"));
    assert!(matches!(duplicate, Err(PersistenceError::Conflict(_))));

    let update: ProjectUpdate = ProjectUpdate {
        status: Some(ProjectStatus::Completed),
        description: Some(None),
        ..ProjectUpdate::default()
    };
    let updated = persistence
        .update_project(team.supervisor.id, project.id, &update)
        .unwrap();
    assert_eq!(updated.status, ProjectStatus::Completed);
    assert_eq!(updated.description, None);

    let logs = persistence.list_logs(Some("project"), PageRequest::default()).unwrap();
    assert_eq!(logs.total, 2);
    assert_eq!(logs.items[0].action, "UPDATE_PROJECT");
}

#[test]
fn test_assignment_rules() {
    let persistence: Persistence = create_test_persistence();
    let team: TestTeam = create_test_team(&persistence);
    let project = persistence
        .create_project(team.supervisor.id, &create_test_project("Atlas"))
        .unwrap();

    let assignment = persistence
        .assign_employee(team.supervisor.id, project.id, &create_test_assignment(team.employee.id))
        .unwrap();
    assert_eq!(assignment.employee_name, "Erin Employee");

    let duplicate = persistence.assign_employee(
        team.supervisor.id,
        project.id,
        &create_test_assignment(team.employee.id),
    );
    assert!(matches!(duplicate, Err(PersistenceError::Conflict(_))));

    let detail = persistence.find_project(project.id).unwrap().unwrap();
    assert_eq!(detail.assignments.len(), 1);

    let mine = persistence.list_projects(Some(team.employee.id)).unwrap();
    assert_eq!(mine.len(), 1);
    assert!(persistence.list_projects(Some(team.supervisor.id)).unwrap().is_empty());

    persistence
        .remove_assignment(team.supervisor.id, project.id, team.employee.id)
        .unwrap();
    assert!(matches!(
        persistence.remove_assignment(team.supervisor.id, project.id, team.employee.id),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_inactive_employee_cannot_be_assigned() {
    let persistence: Persistence = create_test_persistence();
    let team: TestTeam = create_test_team(&persistence);
    let project = persistence
        .create_project(team.supervisor.id, &create_test_project("Atlas"))
        .unwrap();
    persistence
        .set_employee_active(team.supervisor.id, team.employee.id, false)
        .unwrap();

    let result = persistence.assign_employee(
        team.supervisor.id,
        project.id,
        &create_test_assignment(team.employee.id),
    );
    assert!(matches!(result, Err(PersistenceError::InvalidState(_))));
}

#[test]
fn test_dashboards() {
    let persistence: Persistence = create_test_persistence();
    let team: TestTeam = create_test_team(&persistence);
    let project = persistence
        .create_project(team.supervisor.id, &create_test_project("Atlas"))
        .unwrap();
    persistence
        .assign_employee(team.supervisor.id, project.id, &create_test_assignment(team.employee.id))
        .unwrap();

    let today = create_test_date(current_year(), Month::June, 15);
    let dashboard = persistence.employee_dashboard(team.employee.id, today).unwrap();
    assert_eq!(dashboard.leave_balances.len(), 3);
    assert_eq!(dashboard.pending_requests, 0);
    assert_eq!(dashboard.active_projects, 1);
    assert!(dashboard.current_salary.is_some());

    let supervisor = load_profile(&persistence, team.supervisor.id);
    let summary = persistence.supervisor_dashboard(&supervisor, today).unwrap();
    assert_eq!(summary.team_size, 1);
    assert_eq!(summary.pending_approvals, 0);
    assert!(summary.on_leave_today.is_empty());
}
