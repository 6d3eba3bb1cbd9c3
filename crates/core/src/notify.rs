// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hrdesk_domain::{DateRange, EmployeeProfile, LeaveDecision};

/// A notification waiting to be appended to an employee's inbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    /// Recipient.
    pub employee_id: i64,
    pub title: String,
    pub message: String,
}

/// Selects the supervisors who hear about a new leave request.
///
/// A candidate is notified when active, flagged as supervisor, not the
/// employee, and either the employee's direct manager or in the same
/// department.
#[must_use]
pub fn supervisors_to_notify(employee: &EmployeeProfile, candidates: &[EmployeeProfile]) -> Vec<i64> {
    let mut ids: Vec<i64> = candidates
        .iter()
        .filter(|c| c.is_active && c.is_supervisor && c.id != employee.id)
        .filter(|c| employee.reports_to == Some(c.id) || c.shares_department_with(employee))
        .map(|c| c.id)
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Builds the notice sent to supervisors when a request is submitted.
#[must_use]
pub fn leave_submitted_notice(
    supervisor_id: i64,
    employee_name: &str,
    leave_type_name: &str,
    range: &DateRange,
) -> NotificationDraft {
    NotificationDraft {
        employee_id: supervisor_id,
        title: String::from("New Leave Request"),
        message: format!(
            "{employee_name} requested {} day(s) of {leave_type_name} leave ({range})",
            range.days()
        ),
    }
}

/// Builds the notice sent to the owner when a request is decided.
#[must_use]
pub fn leave_decided_notice(
    owner_id: i64,
    decision: LeaveDecision,
    leave_type_name: &str,
    range: &DateRange,
    comment: Option<&str>,
) -> NotificationDraft {
    let verb: &str = decision.as_str();
    let mut message: String =
        format!("Your {leave_type_name} leave request ({range}) has been {verb}");
    if let Some(comment) = comment.map(str::trim).filter(|c| !c.is_empty()) {
        message.push_str(". Comment: ");
        message.push_str(comment);
    }
    let title: &str = match decision {
        LeaveDecision::Approved => "Leave Request Approved",
        LeaveDecision::Rejected => "Leave Request Rejected",
    };
    NotificationDraft {
        employee_id: owner_id,
        title: title.to_string(),
        message,
    }
}
