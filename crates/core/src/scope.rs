// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Who may act on whose records.
//!
//! Every rule here works on freshly loaded `EmployeeProfile`s. Rules are
//! evaluated in precedence order: self access, then supervisor over
//! report, then the role gates for salary and reference data.

use crate::error::CoreError;
use hrdesk_domain::{DomainError, EmployeeProfile, Role};
use std::collections::HashSet;

/// Returns whether `actor` supervises `target`.
///
/// The actor must carry the supervisor flag and either be the target's
/// direct manager or share the target's department. Nobody supervises
/// themselves.
#[must_use]
pub fn is_supervisor_over(actor: &EmployeeProfile, target: &EmployeeProfile) -> bool {
    actor.is_supervisor
        && actor.is_active
        && actor.id != target.id
        && (target.reports_to == Some(actor.id) || actor.shares_department_with(target))
}

/// Returns whether `actor` may read `target`'s records.
#[must_use]
pub fn can_view(actor: &EmployeeProfile, target: &EmployeeProfile) -> bool {
    actor.id == target.id || is_supervisor_over(actor, target)
}

/// Fails unless `actor` may read `target`'s records.
///
/// # Errors
///
/// Returns `CoreError::OutOfScope` otherwise.
pub fn ensure_can_view(actor: &EmployeeProfile, target: &EmployeeProfile) -> Result<(), CoreError> {
    if can_view(actor, target) {
        Ok(())
    } else {
        Err(CoreError::OutOfScope)
    }
}

/// Fails unless `actor` supervises `target`.
///
/// # Arguments
///
/// * `actor` - The acting employee
/// * `target` - The employee being acted on
/// * `action` - Short description used when the actor targets themselves
///
/// # Errors
///
/// Returns `CoreError::SelfAction` when both are the same employee, and
/// `CoreError::OutOfScope` when the actor does not supervise the target.
pub fn ensure_supervisor_over(
    actor: &EmployeeProfile,
    target: &EmployeeProfile,
    action: &'static str,
) -> Result<(), CoreError> {
    if actor.id == target.id {
        return Err(CoreError::SelfAction(action));
    }
    if !is_supervisor_over(actor, target) {
        return Err(CoreError::OutOfScope);
    }
    Ok(())
}

/// Fails unless the actor carries the supervisor flag.
///
/// # Errors
///
/// Returns `CoreError::RoleRequired` otherwise.
pub const fn ensure_supervisor(actor: &EmployeeProfile) -> Result<(), CoreError> {
    if actor.is_supervisor {
        Ok(())
    } else {
        Err(CoreError::RoleRequired("supervisor"))
    }
}

/// Fails unless the actor is a Senior Supervisor.
///
/// Reference-data writes and system-log reads are gated on this.
///
/// # Errors
///
/// Returns `CoreError::RoleRequired` otherwise.
pub const fn ensure_senior_supervisor(actor: &EmployeeProfile) -> Result<(), CoreError> {
    match actor.role {
        Role::SeniorSupervisor => Ok(()),
        _ => Err(CoreError::role_required(Role::SeniorSupervisor)),
    }
}

/// Decides whether `actor` may append a salary record for `target`.
///
/// - Nobody may change their own salary.
/// - Both must belong to the same department.
/// - A Senior Supervisor may act on Supervisors and Regular Employees.
/// - A Supervisor may act on Regular Employees only.
///
/// # Errors
///
/// Returns `CoreError::SalaryChangeForbidden` describing the failed rule.
pub fn authorize_salary_change(
    actor: &EmployeeProfile,
    target: &EmployeeProfile,
) -> Result<(), CoreError> {
    if actor.id == target.id {
        return Err(CoreError::SalaryChangeForbidden(String::from(
            "you cannot modify your own salary",
        )));
    }
    if !actor.shares_department_with(target) {
        return Err(CoreError::SalaryChangeForbidden(String::from(
            "employee is not in your department",
        )));
    }
    let allowed: bool = matches!(
        (actor.role, target.role),
        (
            Role::SeniorSupervisor,
            Role::Supervisor | Role::RegularEmployee
        ) | (Role::Supervisor, Role::RegularEmployee)
    );
    if !allowed {
        return Err(CoreError::SalaryChangeForbidden(format!(
            "a {} cannot manage the salary of a {}",
            actor.role, target.role
        )));
    }
    Ok(())
}

/// Rejects a reporting-line change that would form a cycle.
///
/// Walks the management chain upward from `proposed` using `manager_of`.
/// Reaching `employee_id` means the employee would end up managing
/// themselves. A chain that already loops elsewhere stops the walk.
///
/// # Arguments
///
/// * `employee_id` - The employee whose manager is changing
/// * `proposed` - The new manager, or `None` to clear it
/// * `manager_of` - Looks up the current manager of an employee
///
/// # Errors
///
/// Returns `DomainError::ReportingCycle` wrapped in `CoreError`, or any
/// error produced by `manager_of`.
pub fn ensure_no_reporting_cycle<E, F>(
    employee_id: i64,
    proposed: Option<i64>,
    mut manager_of: F,
) -> Result<(), E>
where
    E: From<CoreError>,
    F: FnMut(i64) -> Result<Option<i64>, E>,
{
    let Some(reports_to) = proposed else {
        return Ok(());
    };
    let cycle = || {
        E::from(CoreError::DomainViolation(DomainError::ReportingCycle {
            employee_id,
            reports_to,
        }))
    };

    let mut seen: HashSet<i64> = HashSet::new();
    let mut current: Option<i64> = Some(reports_to);
    while let Some(id) = current {
        if id == employee_id {
            return Err(cycle());
        }
        if !seen.insert(id) {
            break;
        }
        current = manager_of(id)?;
    }
    Ok(())
}

/// Advisory flags describing what an actor may do with an employee record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct EmployeePermissions {
    pub can_edit_profile: bool,
    pub can_manage: bool,
    pub can_add_salary: bool,
    pub can_manage_skills: bool,
    pub can_change_status: bool,
}

/// Computes the permissions `actor` holds over `target`.
#[must_use]
pub fn employee_permissions(actor: &EmployeeProfile, target: &EmployeeProfile) -> EmployeePermissions {
    let manages: bool = is_supervisor_over(actor, target);
    EmployeePermissions {
        can_edit_profile: actor.id == target.id,
        can_manage: manages,
        can_add_salary: authorize_salary_change(actor, target).is_ok(),
        can_manage_skills: manages,
        can_change_status: manages,
    }
}
