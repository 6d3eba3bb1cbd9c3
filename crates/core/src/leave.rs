// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave request lifecycle.
//!
//! ```text
//! pending ──► approved
//!    │  └───► rejected
//!    └──────► cancelled
//! ```
//!
//! These functions decide outcomes from loaded snapshots. Persistence
//! calls them inside the transaction that read the snapshots and applies
//! the returned plan.

use crate::error::CoreError;
use crate::notify::{NotificationDraft, leave_decided_notice};
use crate::scope::is_supervisor_over;
use hrdesk_audit::{Action, Actor, EntityRef, EntityType, LogEntry};
use hrdesk_domain::{DateRange, EmployeeProfile, LeaveBalance, LeaveDecision, LeaveStatus};
use time::Date;

/// A new request as submitted by an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveApplication {
    pub employee_id: i64,
    pub leave_type_id: i64,
    pub range: DateRange,
}

/// An existing request of the same employee, as seen by the overlap check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExistingRequest {
    pub id: i64,
    pub range: DateRange,
    pub status: LeaveStatus,
}

/// Outcome of a successful submission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaveSubmission {
    /// Inclusive day count to store on the request.
    pub total_days: i64,
    /// Days that would remain if this request were approved.
    pub remaining_after_approval: i64,
}

/// A stored leave request as seen by the cancel and process rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveRequestSnapshot {
    pub id: i64,
    pub employee_id: i64,
    pub leave_type_id: i64,
    pub leave_type_name: String,
    pub range: DateRange,
    pub total_days: i64,
    pub status: LeaveStatus,
}

/// Everything the approval transaction must write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveResolution {
    /// New request status.
    pub status: LeaveStatus,
    /// Dates to mark `on-leave`. Empty for rejections.
    pub backfill_dates: Vec<Date>,
    /// Note written on each backfilled attendance row.
    pub attendance_note: String,
    /// Days to add to the balance's `used_days`. Zero for rejections.
    pub debit_days: i64,
    /// Notice for the request owner.
    pub notification: NotificationDraft,
    /// System-log row for the decision.
    pub log_entry: LogEntry,
}

/// Checks a new leave request against the balance and existing requests.
///
/// # Arguments
///
/// * `application` - The requested leave
/// * `balance` - The balance for (employee, leave type, year of start), if any
/// * `existing` - The employee's other requests
///
/// # Errors
///
/// Returns `NoBalanceRecord` when no balance exists, `InsufficientBalance`
/// (as a domain violation) when the duration exceeds the available days,
/// and `OverlappingRequest` when a pending or approved request intersects
/// the range.
pub fn submit_leave(
    application: &LeaveApplication,
    balance: Option<LeaveBalance>,
    existing: &[ExistingRequest],
) -> Result<LeaveSubmission, CoreError> {
    let total_days: i64 = application.range.days();

    let balance: LeaveBalance = balance.ok_or(CoreError::NoBalanceRecord {
        leave_type_id: application.leave_type_id,
        year: application.range.year(),
    })?;
    balance.ensure_covers(total_days)?;

    if let Some(conflict) = existing
        .iter()
        .find(|r| r.status.reserves_dates() && application.range.overlaps(&r.range))
    {
        return Err(CoreError::OverlappingRequest {
            existing_id: conflict.id,
        });
    }

    Ok(LeaveSubmission {
        total_days,
        remaining_after_approval: balance.available_days() - total_days,
    })
}

/// Checks that `actor_id` may cancel the request.
///
/// # Errors
///
/// Returns `NotOwner` for anyone but the owner and `InvalidTransition`
/// unless the request is pending.
pub fn cancel_leave(request: &LeaveRequestSnapshot, actor_id: i64) -> Result<LeaveStatus, CoreError> {
    if request.employee_id != actor_id {
        return Err(CoreError::NotOwner);
    }
    ensure_transition(request.status, LeaveStatus::Cancelled)?;
    Ok(LeaveStatus::Cancelled)
}

/// Decides a pending request and plans the resulting writes.
///
/// # Arguments
///
/// * `request` - The request being processed
/// * `owner` - The request owner's current profile
/// * `actor` - The deciding supervisor's current profile
/// * `decision` - Approve or reject
/// * `comment` - Optional comment passed to the owner
///
/// # Errors
///
/// Returns `InvalidTransition` unless the request is pending,
/// `SelfAction` when the actor owns the request, and `OutOfScope` when
/// the actor does not supervise the owner.
pub fn process_leave(
    request: &LeaveRequestSnapshot,
    owner: &EmployeeProfile,
    actor: &EmployeeProfile,
    decision: LeaveDecision,
    comment: Option<&str>,
) -> Result<LeaveResolution, CoreError> {
    let status: LeaveStatus = decision.resulting_status();
    ensure_transition(request.status, status)?;

    if actor.id == owner.id {
        return Err(CoreError::SelfAction("process a leave request"));
    }
    if !is_supervisor_over(actor, owner) {
        return Err(CoreError::OutOfScope);
    }

    let (backfill_dates, debit_days): (Vec<Date>, i64) = match decision {
        LeaveDecision::Approved => (request.range.dates().collect(), request.total_days),
        LeaveDecision::Rejected => (Vec::new(), 0),
    };

    Ok(LeaveResolution {
        status,
        backfill_dates,
        attendance_note: format!("On leave: {}", request.leave_type_name),
        debit_days,
        notification: leave_decided_notice(
            owner.id,
            decision,
            &request.leave_type_name,
            &request.range,
            comment,
        ),
        log_entry: LogEntry::new(
            Actor::employee(actor.id),
            Action::for_leave_decision(decision),
            EntityRef::new(EntityType::LeaveRequest, request.id),
        )
        .with_details(format!(
            "{} day(s) of {} leave for employee {}",
            request.total_days, request.leave_type_name, owner.id
        )),
    })
}

const fn ensure_transition(from: LeaveStatus, to: LeaveStatus) -> Result<(), CoreError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition { from, to })
    }
}
