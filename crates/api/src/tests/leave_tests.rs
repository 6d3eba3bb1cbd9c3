// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the leave workflow through the handlers.

use hrdesk_domain::LeaveStatus;
use hrdesk_persistence::{LeaveRequestData, LeaveSubmissionResult, Persistence};

use crate::auth::AuthenticatedEmployee;
use crate::error::ApiError;
use crate::handlers::{
    cancel_leave_request, get_leave_request, list_leave_balances, my_leave_requests,
    pending_leave_requests, process_leave_request, submit_leave,
};
use crate::request_response::{
    LeaveBalancesQuery, LeaveListQuery, ProcessLeaveRequest, SubmitLeaveRequest,
};
use crate::tests::helpers::{
    TestOrg, annual_leave_type_id, authenticate_as, create_test_org, create_test_persistence,
    january, today,
};

fn create_test_submission(persistence: &Persistence, start: u8, end: u8) -> SubmitLeaveRequest {
    SubmitLeaveRequest {
        leave_type_id: annual_leave_type_id(persistence),
        start_date: january(start),
        end_date: january(end),
        reason: Some(String::from("Family trip")),
    }
}

fn decision(status: &str) -> ProcessLeaveRequest {
    ProcessLeaveRequest {
        status: status.to_string(),
        comment: Some(String::from("Enjoy")),
    }
}

// ============================================================================
// Submission
// ============================================================================

#[test]
fn test_submit_creates_pending_request() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let employee: AuthenticatedEmployee = authenticate_as(&persistence, org.employee.id);

    let result: LeaveSubmissionResult =
        submit_leave(&persistence, &employee, &create_test_submission(&persistence, 5, 7)).unwrap();

    assert_eq!(result.request.status, LeaveStatus::Pending);
    assert_eq!(result.request.total_days, 3);
    assert_eq!(result.remaining_after_approval, 17);
}

#[test]
fn test_submit_rejects_reversed_range() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let employee: AuthenticatedEmployee = authenticate_as(&persistence, org.employee.id);

    let result = submit_leave(&persistence, &employee, &create_test_submission(&persistence, 9, 3));

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_submit_rejects_unparseable_date() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let employee: AuthenticatedEmployee = authenticate_as(&persistence, org.employee.id);
    let mut request: SubmitLeaveRequest = create_test_submission(&persistence, 1, 2);
    request.start_date = String::from("next tuesday");

    match submit_leave(&persistence, &employee, &request) {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "start_date"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_submit_rejects_overlap_and_excess() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let employee: AuthenticatedEmployee = authenticate_as(&persistence, org.employee.id);
    submit_leave(&persistence, &employee, &create_test_submission(&persistence, 5, 7)).unwrap();

    let overlap = submit_leave(&persistence, &employee, &create_test_submission(&persistence, 7, 8));
    let excess = submit_leave(&persistence, &employee, &create_test_submission(&persistence, 10, 31));

    match overlap {
        Err(ApiError::DomainRuleViolation { rule, .. }) => assert_eq!(rule, "no_overlap"),
        other => panic!("Expected DomainRuleViolation, got {other:?}"),
    }
    match excess {
        Err(ApiError::DomainRuleViolation { rule, .. }) => assert_eq!(rule, "sufficient_balance"),
        other => panic!("Expected DomainRuleViolation, got {other:?}"),
    }
}

// ============================================================================
// Decisions
// ============================================================================

#[test]
fn test_supervisor_approves_and_balance_is_debited() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let employee: AuthenticatedEmployee = authenticate_as(&persistence, org.employee.id);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);
    let submitted: LeaveSubmissionResult =
        submit_leave(&persistence, &employee, &create_test_submission(&persistence, 5, 7)).unwrap();

    let pending: Vec<LeaveRequestData> = pending_leave_requests(&persistence, &supervisor).unwrap();
    assert!(pending.iter().any(|r| r.id == submitted.request.id));

    let approved: LeaveRequestData = process_leave_request(
        &persistence,
        &supervisor,
        submitted.request.id,
        &decision("approved"),
    )
    .unwrap();
    assert_eq!(approved.status, LeaveStatus::Approved);
    assert_eq!(approved.approved_by, Some(org.supervisor.id));

    let annual: i64 = annual_leave_type_id(&persistence);
    let used: i64 = list_leave_balances(
        &persistence,
        &employee,
        org.employee.id,
        LeaveBalancesQuery::default(),
        today(),
    )
    .unwrap()
    .into_iter()
    .find(|b| b.leave_type_id == annual)
    .unwrap()
    .used_days;
    assert_eq!(used, 3);
}

#[test]
fn test_decision_must_be_approved_or_rejected() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let employee: AuthenticatedEmployee = authenticate_as(&persistence, org.employee.id);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);
    let submitted: LeaveSubmissionResult =
        submit_leave(&persistence, &employee, &create_test_submission(&persistence, 5, 7)).unwrap();

    let result = process_leave_request(
        &persistence,
        &supervisor,
        submitted.request.id,
        &decision("cancelled"),
    );

    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "status"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_out_of_scope_supervisor_cannot_decide() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let outsider: AuthenticatedEmployee = authenticate_as(&persistence, org.outsider.id);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);
    let submitted: LeaveSubmissionResult =
        submit_leave(&persistence, &outsider, &create_test_submission(&persistence, 5, 7)).unwrap();

    let result = process_leave_request(
        &persistence,
        &supervisor,
        submitted.request.id,
        &decision("approved"),
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_supervisor_cannot_approve_own_request() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);
    let submitted: LeaveSubmissionResult =
        submit_leave(&persistence, &supervisor, &create_test_submission(&persistence, 5, 7))
            .unwrap();

    let result = process_leave_request(
        &persistence,
        &supervisor,
        submitted.request.id,
        &decision("approved"),
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_decided_request_cannot_be_decided_again() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let employee: AuthenticatedEmployee = authenticate_as(&persistence, org.employee.id);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);
    let submitted: LeaveSubmissionResult =
        submit_leave(&persistence, &employee, &create_test_submission(&persistence, 5, 7)).unwrap();
    process_leave_request(
        &persistence,
        &supervisor,
        submitted.request.id,
        &decision("rejected"),
    )
    .unwrap();

    let result = process_leave_request(
        &persistence,
        &supervisor,
        submitted.request.id,
        &decision("approved"),
    );

    match result {
        Err(ApiError::DomainRuleViolation { rule, .. }) => assert_eq!(rule, "pending_only"),
        other => panic!("Expected DomainRuleViolation, got {other:?}"),
    }
}

// ============================================================================
// Cancellation and reads
// ============================================================================

#[test]
fn test_owner_cancels_pending_request() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let employee: AuthenticatedEmployee = authenticate_as(&persistence, org.employee.id);
    let submitted: LeaveSubmissionResult =
        submit_leave(&persistence, &employee, &create_test_submission(&persistence, 5, 7)).unwrap();

    let cancelled: LeaveRequestData =
        cancel_leave_request(&persistence, &employee, submitted.request.id).unwrap();

    assert_eq!(cancelled.status, LeaveStatus::Cancelled);
}

#[test]
fn test_only_owner_may_cancel() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let employee: AuthenticatedEmployee = authenticate_as(&persistence, org.employee.id);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);
    let submitted: LeaveSubmissionResult =
        submit_leave(&persistence, &employee, &create_test_submission(&persistence, 5, 7)).unwrap();

    let result = cancel_leave_request(&persistence, &supervisor, submitted.request.id);

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_leave_request_visible_to_owner_and_supervisor_only() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let employee: AuthenticatedEmployee = authenticate_as(&persistence, org.employee.id);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);
    let outsider: AuthenticatedEmployee = authenticate_as(&persistence, org.outsider.id);
    let submitted: LeaveSubmissionResult =
        submit_leave(&persistence, &employee, &create_test_submission(&persistence, 5, 7)).unwrap();

    assert!(get_leave_request(&persistence, &employee, submitted.request.id).is_ok());
    assert!(get_leave_request(&persistence, &supervisor, submitted.request.id).is_ok());
    assert!(matches!(
        get_leave_request(&persistence, &outsider, submitted.request.id),
        Err(ApiError::Unauthorized { .. })
    ));
}

#[test]
fn test_my_requests_filter_by_status() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let employee: AuthenticatedEmployee = authenticate_as(&persistence, org.employee.id);
    let first: LeaveSubmissionResult =
        submit_leave(&persistence, &employee, &create_test_submission(&persistence, 5, 7)).unwrap();
    submit_leave(&persistence, &employee, &create_test_submission(&persistence, 12, 13)).unwrap();
    cancel_leave_request(&persistence, &employee, first.request.id).unwrap();

    let pending = my_leave_requests(
        &persistence,
        &employee,
        &LeaveListQuery {
            status: Some(String::from("pending")),
            page: None,
            per_page: None,
        },
    )
    .unwrap();
    let unknown = my_leave_requests(
        &persistence,
        &employee,
        &LeaveListQuery {
            status: Some(String::from("lost")),
            page: None,
            per_page: None,
        },
    );

    assert_eq!(pending.total, 1);
    assert!(matches!(unknown, Err(ApiError::InvalidInput { .. })));
}
