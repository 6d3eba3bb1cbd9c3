// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for project management and attendance edits.

use hrdesk_domain::{AttendanceStatus, ProjectStatus};
use hrdesk_persistence::{AttendanceData, Persistence, ProjectData, ProjectDetail};

use crate::auth::AuthenticatedEmployee;
use crate::error::ApiError;
use crate::handlers::{
    assign_employee, create_project, get_project, list_projects, mark_absent, remove_assignment,
    update_attendance, update_project,
};
use crate::request_response::{
    AssignEmployeeRequest, CreateProjectRequest, MarkAbsentRequest, ProjectQuery,
    UpdateAttendanceRequest, UpdateProjectRequest,
};
use crate::tests::helpers::{TestOrg, authenticate_as, create_test_org, create_test_persistence};

fn create_test_project_request(name: &str) -> CreateProjectRequest {
    CreateProjectRequest {
        name: name.to_string(),
        description: Some(String::from("Payroll rewrite")),
        status: None,
        start_date: Some(String::from("2026-02-01")),
        end_date: Some(String::from("2026-06-30")),
    }
}

fn assignment_for(employee_id: i64) -> AssignEmployeeRequest {
    AssignEmployeeRequest {
        employee_id,
        role: Some(String::from("Developer")),
        start_date: None,
        end_date: None,
    }
}

// ============================================================================
// Projects
// ============================================================================

#[test]
fn test_supervisor_creates_project_defaulting_to_planned() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);

    let project: ProjectData =
        create_project(&persistence, &supervisor, &create_test_project_request("Atlas")).unwrap();

    assert_eq!(project.status, ProjectStatus::Planned);
    assert_eq!(project.created_by, org.supervisor.id);
}

#[test]
fn test_regular_employee_cannot_create_project() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let employee: AuthenticatedEmployee = authenticate_as(&persistence, org.employee.id);

    let result = create_project(&persistence, &employee, &create_test_project_request("Atlas"));

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_project_dates_must_be_ordered() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);
    let mut request: CreateProjectRequest = create_test_project_request("Atlas");
    request.end_date = Some(String::from("2026-01-01"));

    let result = create_project(&persistence, &supervisor, &request);

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_duplicate_project_name_is_a_conflict() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);
    create_project(&persistence, &supervisor, &create_test_project_request("Atlas")).unwrap();

    let result = create_project(&persistence, &supervisor, &create_test_project_request("Atlas"));

    assert!(matches!(result, Err(ApiError::Conflict { .. })));
}

#[test]
fn test_update_project_status_and_clear_end_date() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);
    let project: ProjectData =
        create_project(&persistence, &supervisor, &create_test_project_request("Atlas")).unwrap();

    let updated: ProjectData = update_project(
        &persistence,
        &supervisor,
        project.id,
        &UpdateProjectRequest {
            status: Some(String::from("active")),
            end_date: Some(None),
            ..UpdateProjectRequest::default()
        },
    )
    .unwrap();

    assert_eq!(updated.status, ProjectStatus::Active);
    assert!(updated.end_date.is_none());
    assert_eq!(updated.start_date.as_deref(), Some("2026-02-01"));
}

#[test]
fn test_assign_and_list_my_projects() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);
    let employee: AuthenticatedEmployee = authenticate_as(&persistence, org.employee.id);
    let atlas: ProjectData =
        create_project(&persistence, &supervisor, &create_test_project_request("Atlas")).unwrap();
    create_project(&persistence, &supervisor, &create_test_project_request("Borealis")).unwrap();

    assign_employee(&persistence, &supervisor, atlas.id, &assignment_for(org.employee.id)).unwrap();

    let mine: Vec<ProjectData> =
        list_projects(&persistence, &employee, ProjectQuery { mine: Some(true) }).unwrap();
    let all: Vec<ProjectData> =
        list_projects(&persistence, &employee, ProjectQuery::default()).unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, atlas.id);
    assert_eq!(all.len(), 2);

    let detail: ProjectDetail = get_project(&persistence, atlas.id).unwrap();
    assert_eq!(detail.assignments.len(), 1);
}

#[test]
fn test_duplicate_assignment_is_a_conflict() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);
    let atlas: ProjectData =
        create_project(&persistence, &supervisor, &create_test_project_request("Atlas")).unwrap();
    assign_employee(&persistence, &supervisor, atlas.id, &assignment_for(org.employee.id)).unwrap();

    let result = assign_employee(&persistence, &supervisor, atlas.id, &assignment_for(org.employee.id));

    assert!(matches!(result, Err(ApiError::Conflict { .. })));
}

#[test]
fn test_remove_missing_assignment_is_not_found() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);
    let atlas: ProjectData =
        create_project(&persistence, &supervisor, &create_test_project_request("Atlas")).unwrap();

    let result = remove_assignment(&persistence, &supervisor, atlas.id, org.employee.id);

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_missing_project_is_not_found() {
    let persistence: Persistence = create_test_persistence();

    let result = get_project(&persistence, 42);

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

// ============================================================================
// Attendance edits
// ============================================================================

#[test]
fn test_supervisor_marks_absence_and_corrects_it() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);

    let absent: AttendanceData = mark_absent(
        &persistence,
        &supervisor,
        &MarkAbsentRequest {
            employee_id: org.employee.id,
            date: String::from("2026-03-02"),
            note: None,
        },
    )
    .unwrap();
    assert_eq!(absent.status, AttendanceStatus::Absent);

    let corrected: AttendanceData = update_attendance(
        &persistence,
        &supervisor,
        absent.id,
        &UpdateAttendanceRequest {
            status: Some(String::from("present")),
            note: Some(String::from("Badge reader fault")),
        },
    )
    .unwrap();
    assert_eq!(corrected.status, AttendanceStatus::Present);
    assert_eq!(corrected.note.as_deref(), Some("Badge reader fault"));
}

#[test]
fn test_employee_cannot_mark_colleague_absent() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let employee: AuthenticatedEmployee = authenticate_as(&persistence, org.employee.id);

    let result = mark_absent(
        &persistence,
        &employee,
        &MarkAbsentRequest {
            employee_id: org.outsider.id,
            date: String::from("2026-03-02"),
            note: None,
        },
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}
