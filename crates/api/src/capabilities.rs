// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities expose what actions an employee is permitted to perform
//! without leaking scoping internals. They are advisory only and do not
//! replace backend authorization checks.

use hrdesk::{EmployeePermissions, employee_permissions};
use hrdesk_domain::{EmployeeProfile, Role};

use crate::request_response::{Capability, EmployeeCapabilities, GlobalCapabilities};

/// Computes global capabilities for an authenticated employee.
///
/// Global capabilities depend only on the actor's role and supervisor flag.
#[must_use]
pub const fn compute_global_capabilities(actor: &EmployeeProfile) -> GlobalCapabilities {
    if !actor.is_active {
        return GlobalCapabilities {
            can_register_employees: Capability::Denied,
            can_approve_leave: Capability::Denied,
            can_manage_projects: Capability::Denied,
            can_manage_reference_data: Capability::Denied,
            can_view_logs: Capability::Denied,
        };
    }

    let senior: bool = matches!(actor.role, Role::SeniorSupervisor);
    GlobalCapabilities {
        can_register_employees: Capability::from_bool(actor.is_supervisor),
        can_approve_leave: Capability::from_bool(actor.is_supervisor),
        can_manage_projects: Capability::from_bool(actor.is_supervisor),
        can_manage_reference_data: Capability::from_bool(senior),
        can_view_logs: Capability::from_bool(senior),
    }
}

/// Computes what `actor` may do with `target`'s record.
///
/// # Arguments
///
/// * `actor` - The authenticated employee
/// * `target` - The employee being viewed
#[must_use]
pub fn compute_employee_capabilities(
    actor: &EmployeeProfile,
    target: &EmployeeProfile,
) -> EmployeeCapabilities {
    let permissions: EmployeePermissions = employee_permissions(actor, target);
    EmployeeCapabilities {
        can_edit_profile: Capability::from_bool(permissions.can_edit_profile),
        can_manage: Capability::from_bool(permissions.can_manage),
        can_add_salary: Capability::from_bool(permissions.can_add_salary),
        can_manage_skills: Capability::from_bool(permissions.can_manage_skills),
        can_change_status: Capability::from_bool(permissions.can_change_status),
    }
}
