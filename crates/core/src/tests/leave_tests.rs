// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    CoreError, ExistingRequest, LeaveApplication, LeaveResolution, LeaveSubmission, cancel_leave,
    process_leave, submit_leave,
};
use hrdesk_domain::{
    DateRange, DomainError, EmployeeProfile, LeaveBalance, LeaveDecision, LeaveStatus,
};
use time::macros::date;

use super::helpers::{
    SALES, create_test_employee, create_test_regular, create_test_request, create_test_supervisor,
};
use hrdesk_audit::Action;
use hrdesk_domain::Role;

fn application(start: time::Date, end: time::Date) -> LeaveApplication {
    LeaveApplication {
        employee_id: 10,
        leave_type_id: 1,
        range: DateRange::new(start, end).unwrap(),
    }
}

fn existing(id: i64, start: time::Date, end: time::Date, status: LeaveStatus) -> ExistingRequest {
    ExistingRequest {
        id,
        range: DateRange::new(start, end).unwrap(),
        status,
    }
}

#[test]
fn test_submit_within_balance() {
    let result: LeaveSubmission = submit_leave(
        &application(date!(2026 - 01 - 01), date!(2026 - 01 - 05)),
        Some(LeaveBalance::new(10, 0)),
        &[],
    )
    .unwrap();

    assert_eq!(result.total_days, 5);
    assert_eq!(result.remaining_after_approval, 5);
}

#[test]
fn test_submit_without_balance_row() {
    let result = submit_leave(
        &application(date!(2026 - 01 - 01), date!(2026 - 01 - 05)),
        None,
        &[],
    );
    match result.unwrap_err() {
        CoreError::NoBalanceRecord {
            leave_type_id,
            year,
        } => {
            assert_eq!(leave_type_id, 1);
            assert_eq!(year, 2026);
        }
        other => panic!("Expected NoBalanceRecord, got {other:?}"),
    }
}

#[test]
fn test_submit_exceeding_balance_reports_both_values() {
    let result = submit_leave(
        &application(date!(2026 - 01 - 01), date!(2026 - 01 - 05)),
        Some(LeaveBalance::new(10, 7)),
        &[],
    );
    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::InsufficientBalance {
            requested: 5,
            available: 3,
        })
    );
}

#[test]
fn test_submit_overlapping_pending_request() {
    let result = submit_leave(
        &application(date!(2026 - 01 - 04), date!(2026 - 01 - 06)),
        Some(LeaveBalance::new(10, 0)),
        &[existing(
            1,
            date!(2026 - 01 - 01),
            date!(2026 - 01 - 05),
            LeaveStatus::Pending,
        )],
    );
    assert_eq!(
        result.unwrap_err(),
        CoreError::OverlappingRequest { existing_id: 1 }
    );
}

#[test]
fn test_submit_ignores_cancelled_and_rejected_requests() {
    let result = submit_leave(
        &application(date!(2026 - 01 - 01), date!(2026 - 01 - 05)),
        Some(LeaveBalance::new(10, 0)),
        &[
            existing(
                1,
                date!(2026 - 01 - 01),
                date!(2026 - 01 - 05),
                LeaveStatus::Cancelled,
            ),
            existing(
                2,
                date!(2026 - 01 - 02),
                date!(2026 - 01 - 03),
                LeaveStatus::Rejected,
            ),
        ],
    );
    assert!(result.is_ok());
}

#[test]
fn test_submit_blocked_by_approved_request_containing_range() {
    let result = submit_leave(
        &application(date!(2026 - 02 - 03), date!(2026 - 02 - 04)),
        Some(LeaveBalance::new(10, 0)),
        &[existing(
            7,
            date!(2026 - 02 - 01),
            date!(2026 - 02 - 10),
            LeaveStatus::Approved,
        )],
    );
    assert!(matches!(
        result,
        Err(CoreError::OverlappingRequest { existing_id: 7 })
    ));
}

#[test]
fn test_cancel_pending_by_owner() {
    let request = create_test_request(
        10,
        date!(2026 - 01 - 01),
        date!(2026 - 01 - 05),
        LeaveStatus::Pending,
    );
    assert_eq!(cancel_leave(&request, 10).unwrap(), LeaveStatus::Cancelled);
}

#[test]
fn test_cancel_by_non_owner_is_rejected() {
    let request = create_test_request(
        10,
        date!(2026 - 01 - 01),
        date!(2026 - 01 - 05),
        LeaveStatus::Pending,
    );
    assert_eq!(cancel_leave(&request, 11).unwrap_err(), CoreError::NotOwner);
}

#[test]
fn test_cancel_non_pending_is_rejected() {
    for status in [
        LeaveStatus::Approved,
        LeaveStatus::Rejected,
        LeaveStatus::Cancelled,
    ] {
        let request = create_test_request(
            10,
            date!(2026 - 01 - 01),
            date!(2026 - 01 - 05),
            status,
        );
        match cancel_leave(&request, 10).unwrap_err() {
            CoreError::InvalidTransition { from, to } => {
                assert_eq!(from, status);
                assert_eq!(to, LeaveStatus::Cancelled);
            }
            other => panic!("Expected InvalidTransition, got {other:?}"),
        }
    }
}

#[test]
fn test_approve_plans_backfill_and_debit() {
    let owner: EmployeeProfile = create_test_regular(10);
    let supervisor: EmployeeProfile = create_test_supervisor(20);
    let request = create_test_request(
        10,
        date!(2026 - 01 - 01),
        date!(2026 - 01 - 05),
        LeaveStatus::Pending,
    );

    let resolution: LeaveResolution = process_leave(
        &request,
        &owner,
        &supervisor,
        LeaveDecision::Approved,
        Some("Enjoy"),
    )
    .unwrap();

    assert_eq!(resolution.status, LeaveStatus::Approved);
    assert_eq!(resolution.debit_days, 5);
    assert_eq!(resolution.backfill_dates.len(), 5);
    assert_eq!(resolution.backfill_dates[0], date!(2026 - 01 - 01));
    assert_eq!(resolution.backfill_dates[4], date!(2026 - 01 - 05));
    assert_eq!(resolution.attendance_note, "On leave: Annual");
    assert_eq!(resolution.notification.employee_id, 10);
    assert!(resolution.notification.message.contains("approved"));
    assert!(resolution.notification.message.contains("Comment: Enjoy"));
    assert_eq!(resolution.log_entry.action, Action::ApproveLeave);
    assert_eq!(resolution.log_entry.actor.employee_id, Some(20));
}

#[test]
fn test_reject_writes_no_attendance_or_debit() {
    let owner: EmployeeProfile = create_test_regular(10);
    let supervisor: EmployeeProfile = create_test_supervisor(20);
    let request = create_test_request(
        10,
        date!(2026 - 01 - 01),
        date!(2026 - 01 - 05),
        LeaveStatus::Pending,
    );

    let resolution: LeaveResolution =
        process_leave(&request, &owner, &supervisor, LeaveDecision::Rejected, None).unwrap();

    assert_eq!(resolution.status, LeaveStatus::Rejected);
    assert!(resolution.backfill_dates.is_empty());
    assert_eq!(resolution.debit_days, 0);
    assert_eq!(resolution.notification.title, "Leave Request Rejected");
}

#[test]
fn test_reprocessing_terminal_request_is_rejected() {
    let owner: EmployeeProfile = create_test_regular(10);
    let supervisor: EmployeeProfile = create_test_supervisor(20);
    let request = create_test_request(
        10,
        date!(2026 - 01 - 01),
        date!(2026 - 01 - 05),
        LeaveStatus::Approved,
    );

    let result = process_leave(&request, &owner, &supervisor, LeaveDecision::Approved, None);
    assert!(matches!(
        result,
        Err(CoreError::InvalidTransition {
            from: LeaveStatus::Approved,
            to: LeaveStatus::Approved,
        })
    ));
}

#[test]
fn test_supervisor_cannot_process_own_request() {
    let supervisor: EmployeeProfile = create_test_supervisor(20);
    let request = create_test_request(
        20,
        date!(2026 - 01 - 01),
        date!(2026 - 01 - 02),
        LeaveStatus::Pending,
    );

    let result = process_leave(
        &request,
        &supervisor,
        &supervisor,
        LeaveDecision::Approved,
        None,
    );
    assert!(matches!(result, Err(CoreError::SelfAction(_))));
}

#[test]
fn test_supervisor_outside_department_cannot_process() {
    let owner: EmployeeProfile = create_test_regular(10);
    let outsider: EmployeeProfile = create_test_employee(30, Role::Supervisor, Some(SALES));
    let request = create_test_request(
        10,
        date!(2026 - 01 - 01),
        date!(2026 - 01 - 02),
        LeaveStatus::Pending,
    );

    let result = process_leave(&request, &owner, &outsider, LeaveDecision::Approved, None);
    assert_eq!(result.unwrap_err(), CoreError::OutOfScope);
}

#[test]
fn test_direct_manager_in_other_department_can_process() {
    let mut owner: EmployeeProfile = create_test_regular(10);
    owner.reports_to = Some(30);
    let manager: EmployeeProfile = create_test_employee(30, Role::Supervisor, Some(SALES));
    let request = create_test_request(
        10,
        date!(2026 - 01 - 01),
        date!(2026 - 01 - 02),
        LeaveStatus::Pending,
    );

    assert!(process_leave(&request, &owner, &manager, LeaveDecision::Rejected, None).is_ok());
}
