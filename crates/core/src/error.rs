// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hrdesk_domain::{DomainError, LeaveStatus, Role};

/// Errors raised by workflow and authorization rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// No balance row exists for the leave type and year.
    NoBalanceRecord {
        /// The requested leave type.
        leave_type_id: i64,
        /// The calendar year of the request start.
        year: i32,
    },
    /// The requested range intersects a pending or approved request.
    OverlappingRequest {
        /// The conflicting request.
        existing_id: i64,
    },
    /// A leave request cannot move between these states.
    InvalidTransition {
        /// Current status.
        from: LeaveStatus,
        /// Requested status.
        to: LeaveStatus,
    },
    /// Only the owner may perform this action.
    NotOwner,
    /// The target employee is outside the actor's scope.
    OutOfScope,
    /// A salary record may not be added for this employee.
    SalaryChangeForbidden(String),
    /// The actor attempted an action on themselves that requires another party.
    SelfAction(&'static str),
    /// The action requires a role or flag the actor does not hold.
    RoleRequired(&'static str),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "{err}"),
            Self::NoBalanceRecord {
                leave_type_id,
                year,
            } => write!(
                f,
                "No leave balance found for leave type {leave_type_id} in {year}"
            ),
            Self::OverlappingRequest { existing_id } => write!(
                f,
                "Dates overlap an existing pending or approved leave request ({existing_id})"
            ),
            Self::InvalidTransition { from, to } => {
                write!(f, "Cannot move a {from} leave request to {to}")
            }
            Self::NotOwner => write!(f, "Only the owner of this record may do that"),
            Self::OutOfScope => write!(f, "Employee is outside your supervisory scope"),
            Self::SalaryChangeForbidden(reason) => {
                write!(f, "Not allowed to add salary records: {reason}")
            }
            Self::SelfAction(action) => write!(f, "You cannot {action} for yourself"),
            Self::RoleRequired(role) => write!(f, "This action requires the {role} role"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl CoreError {
    /// Error for an action reserved to `role`.
    #[must_use]
    pub const fn role_required(role: Role) -> Self {
        Self::RoleRequired(role.as_str())
    }
}
