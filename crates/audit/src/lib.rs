// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Vocabulary for the append-only system log.
//!
//! A log entry records who did what to which entity. Entries are built
//! after a mutation commits and written on a best-effort basis; they are
//! never updated or deleted.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use hrdesk_domain::LeaveDecision;
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// The employee performing an action, or the system itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The acting employee. `None` for system-initiated work.
    pub employee_id: Option<i64>,
}

impl Actor {
    /// An action performed by an authenticated employee.
    #[must_use]
    pub const fn employee(employee_id: i64) -> Self {
        Self {
            employee_id: Some(employee_id),
        }
    }

    /// An action performed without an authenticated employee.
    #[must_use]
    pub const fn system() -> Self {
        Self { employee_id: None }
    }
}

/// Auditable action verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    RegisterEmployee,
    UpdateEmployee,
    ChangeEmployeeStatus,
    AddSalaryRecord,
    SetLeaveBalance,
    ApproveLeave,
    RejectLeave,
    CreateProject,
    UpdateProject,
    AssignEmployee,
    RemoveAssignment,
}

impl Action {
    /// Stored verb for this action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RegisterEmployee => "REGISTER_EMPLOYEE",
            Self::UpdateEmployee => "UPDATE_EMPLOYEE",
            Self::ChangeEmployeeStatus => "CHANGE_EMPLOYEE_STATUS",
            Self::AddSalaryRecord => "ADD_SALARY_RECORD",
            Self::SetLeaveBalance => "SET_LEAVE_BALANCE",
            Self::ApproveLeave => "APPROVE_LEAVE",
            Self::RejectLeave => "REJECT_LEAVE",
            Self::CreateProject => "CREATE_PROJECT",
            Self::UpdateProject => "UPDATE_PROJECT",
            Self::AssignEmployee => "ASSIGN_EMPLOYEE",
            Self::RemoveAssignment => "REMOVE_ASSIGNMENT",
        }
    }

    /// The verb recorded when a leave request is processed.
    #[must_use]
    pub const fn for_leave_decision(decision: LeaveDecision) -> Self {
        match decision {
            LeaveDecision::Approved => Self::ApproveLeave,
            LeaveDecision::Rejected => Self::RejectLeave,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kinds of entity that appear in the system log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Employee,
    SalaryHistory,
    LeaveBalance,
    LeaveRequest,
    Project,
    ProjectAssignment,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::SalaryHistory => "salary_history",
            Self::LeaveBalance => "leave_balance",
            Self::LeaveRequest => "leave_request",
            Self::Project => "project",
            Self::ProjectAssignment => "project_assignment",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reference to the entity an action touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub entity_type: EntityType,
    pub entity_id: i64,
}

impl EntityRef {
    #[must_use]
    pub const fn new(entity_type: EntityType, entity_id: i64) -> Self {
        Self {
            entity_type,
            entity_id,
        }
    }
}

/// One system-log row waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Who performed the action.
    pub actor: Actor,
    /// What was done.
    pub action: Action,
    /// What it was done to.
    pub entity: EntityRef,
    /// Free-text detail.
    pub details: Option<String>,
}

impl LogEntry {
    /// Creates a log entry with no detail text.
    ///
    /// # Arguments
    ///
    /// * `actor` - The acting employee
    /// * `action` - The action verb
    /// * `entity` - The affected entity
    #[must_use]
    pub const fn new(actor: Actor, action: Action, entity: EntityRef) -> Self {
        Self {
            actor,
            action,
            entity,
            details: None,
        }
    }

    /// Attaches detail text.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}
