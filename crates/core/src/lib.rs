// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Business rules for hrdesk.
//!
//! This crate holds the leave workflow and the authorization scoping
//! rules as pure functions over loaded snapshots. It performs no I/O.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod leave;
mod notify;
mod scope;

#[cfg(test)]
mod tests;

pub use error::CoreError;
pub use leave::{
    ExistingRequest, LeaveApplication, LeaveRequestSnapshot, LeaveResolution, LeaveSubmission,
    cancel_leave, process_leave, submit_leave,
};
pub use notify::{
    NotificationDraft, leave_decided_notice, leave_submitted_notice, supervisors_to_notify,
};
pub use scope::{
    EmployeePermissions, authorize_salary_change, can_view, employee_permissions,
    ensure_can_view, ensure_no_reporting_cycle, ensure_senior_supervisor, ensure_supervisor,
    ensure_supervisor_over, is_supervisor_over,
};
