// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for reference catalogs, leave types, logs and notifications.

use hrdesk_persistence::{CatalogEntry, LeaveTypeData, LogData, Page, Persistence};

use crate::auth::AuthenticatedEmployee;
use crate::error::ApiError;
use crate::handlers::{
    create_catalog_entry, create_leave_type, list_catalog, list_logs, list_notifications,
    mark_all_notifications_read, submit_leave, update_catalog_entry, update_leave_type,
};
use crate::request_response::{
    CatalogEntryRequest, LeaveTypeRequest, LogQuery, NotificationQuery, SubmitLeaveRequest,
    UnreadCountResponse, UpdateCatalogEntryRequest, UpdateLeaveTypeRequest,
};
use crate::tests::helpers::{
    TestOrg, annual_leave_type_id, authenticate_as, create_test_org, create_test_persistence,
    january,
};

fn catalog_request(name: &str) -> CatalogEntryRequest {
    CatalogEntryRequest {
        name: name.to_string(),
        description: None,
    }
}

// ============================================================================
// Catalogs
// ============================================================================

#[test]
fn test_seeded_roles_are_listed() {
    let persistence: Persistence = create_test_persistence();

    let roles: Vec<CatalogEntry> = list_catalog(&persistence, "roles").unwrap();

    let names: Vec<&str> = roles.iter().map(|r| r.name.as_str()).collect();
    assert!(names.contains(&"Senior Supervisor"));
    assert!(names.contains(&"Regular Employee"));
}

#[test]
fn test_unknown_catalog_is_not_found() {
    let persistence: Persistence = create_test_persistence();

    let result = list_catalog(&persistence, "planets");

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_only_senior_supervisor_writes_catalogs() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);
    let senior: AuthenticatedEmployee = authenticate_as(&persistence, org.senior.id);

    let denied = create_catalog_entry(&persistence, &supervisor, "designations", &catalog_request("Engineer"));
    let created: CatalogEntry =
        create_catalog_entry(&persistence, &senior, "designations", &catalog_request("Engineer"))
            .unwrap();

    assert!(matches!(denied, Err(ApiError::Unauthorized { .. })));
    assert_eq!(created.name, "Engineer");
}

#[test]
fn test_duplicate_catalog_name_is_a_conflict() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let senior: AuthenticatedEmployee = authenticate_as(&persistence, org.senior.id);

    let result = create_catalog_entry(&persistence, &senior, "departments", &catalog_request("Engineering"));

    assert!(matches!(result, Err(ApiError::Conflict { .. })));
}

#[test]
fn test_blank_catalog_name_is_invalid() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let senior: AuthenticatedEmployee = authenticate_as(&persistence, org.senior.id);

    let result = create_catalog_entry(&persistence, &senior, "skills", &catalog_request("   "));

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_catalog_description_can_be_cleared() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let senior: AuthenticatedEmployee = authenticate_as(&persistence, org.senior.id);
    let entry: CatalogEntry = create_catalog_entry(
        &persistence,
        &senior,
        "employee-types",
        &CatalogEntryRequest {
            name: String::from("Intern"),
            description: Some(String::from("Temporary")),
        },
    )
    .unwrap();

    let updated: CatalogEntry = update_catalog_entry(
        &persistence,
        &senior,
        "employee-types",
        entry.id,
        &UpdateCatalogEntryRequest {
            name: None,
            description: Some(None),
        },
    )
    .unwrap();

    assert_eq!(updated.name, "Intern");
    assert!(updated.description.is_none());
}

// ============================================================================
// Leave types
// ============================================================================

#[test]
fn test_senior_creates_and_updates_leave_type() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let senior: AuthenticatedEmployee = authenticate_as(&persistence, org.senior.id);

    let created: LeaveTypeData = create_leave_type(
        &persistence,
        &senior,
        &LeaveTypeRequest {
            name: String::from("Parental"),
            default_days: 30,
            description: None,
        },
    )
    .unwrap();
    let updated: LeaveTypeData = update_leave_type(
        &persistence,
        &senior,
        created.id,
        &UpdateLeaveTypeRequest {
            default_days: Some(45),
            ..UpdateLeaveTypeRequest::default()
        },
    )
    .unwrap();

    assert_eq!(updated.name, "Parental");
    assert_eq!(updated.default_days, 45);
}

#[test]
fn test_leave_type_days_are_bounded() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let senior: AuthenticatedEmployee = authenticate_as(&persistence, org.senior.id);

    let result = create_leave_type(
        &persistence,
        &senior,
        &LeaveTypeRequest {
            name: String::from("Forever"),
            default_days: 1_000,
            description: None,
        },
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

// ============================================================================
// Logs and notifications
// ============================================================================

#[test]
fn test_logs_are_senior_only() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let senior: AuthenticatedEmployee = authenticate_as(&persistence, org.senior.id);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);

    let logs: Page<LogData> = list_logs(&persistence, &senior, &LogQuery::default()).unwrap();
    let denied = list_logs(&persistence, &supervisor, &LogQuery::default());

    assert!(logs.total > 0);
    assert!(matches!(denied, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_supervisor_is_notified_and_can_clear_inbox() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let employee: AuthenticatedEmployee = authenticate_as(&persistence, org.employee.id);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);
    submit_leave(
        &persistence,
        &employee,
        &SubmitLeaveRequest {
            leave_type_id: annual_leave_type_id(&persistence),
            start_date: january(5),
            end_date: january(6),
            reason: None,
        },
    )
    .unwrap();

    let inbox = list_notifications(&persistence, &supervisor, NotificationQuery::default()).unwrap();
    assert!(inbox.unread_count >= 1);

    let cleared: UnreadCountResponse = mark_all_notifications_read(&persistence, &supervisor).unwrap();
    assert_eq!(cleared.unread_count, 0);
}
