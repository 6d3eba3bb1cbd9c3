// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! First-run setup.
//!
//! Registration requires a supervisor, so an empty database needs one
//! created out of band. When configured, the server creates an
//! `Administration` department and a senior supervisor in it.

use hrdesk_api::{ApiError, PasswordPolicy};
use hrdesk_audit::Actor;
use hrdesk_domain::{Role, SalaryAmount, validate_email, validate_name};
use hrdesk_persistence::{CatalogEntry, CatalogKind, NewEmployee, Persistence, RegisteredEmployee};
use time::{Date, OffsetDateTime};
use tracing::{info, warn};

use crate::config::AdminSeed;

/// Department that holds the first administrator.
pub const ADMIN_DEPARTMENT: &str = "Administration";

/// Creates the first administrator if the database has no employees.
///
/// Returns the new employee, or `None` if employees already exist or no
/// administrator is configured.
///
/// # Errors
///
/// Returns an error if the seed is invalid or a write fails.
pub fn ensure_administrator(
    persistence: &Persistence,
    seed: Option<&AdminSeed>,
) -> Result<Option<RegisteredEmployee>, ApiError> {
    if !persistence.is_empty()? {
        return Ok(None);
    }
    let Some(seed) = seed else {
        warn!("Database has no employees; set HRDESK_ADMIN_EMAIL to create the first administrator");
        return Ok(None);
    };

    validate_name(&seed.name)?;
    validate_email(seed.email.trim())?;
    PasswordPolicy::default().validate(&seed.password, &seed.email, &seed.name)?;
    let salary: SalaryAmount = SalaryAmount::from_major(seed.salary)?;

    let department: CatalogEntry = find_or_create_department(persistence)?;
    let today: Date = OffsetDateTime::now_utc().date();

    let registered: RegisteredEmployee = persistence.register_employee(
        Actor::system(),
        &NewEmployee {
            name: seed.name.trim().to_string(),
            email: seed.email.trim().to_string(),
            password: seed.password.clone(),
            phone: None,
            address: None,
            emergency_contact: None,
            department_id: Some(department.id),
            designation_id: None,
            role_id: Some(Role::SENIOR_SUPERVISOR_ID),
            employee_type_id: None,
            is_supervisor: true,
            reports_to: None,
            hire_date: today,
            initial_salary: salary,
        },
    )?;

    info!(
        employee_id = registered.id,
        code = %registered.employee_code,
        "Created first administrator"
    );
    Ok(Some(registered))
}

fn find_or_create_department(persistence: &Persistence) -> Result<CatalogEntry, ApiError> {
    let existing: Option<CatalogEntry> = persistence
        .list_catalog(CatalogKind::Departments)?
        .into_iter()
        .find(|entry| entry.name == ADMIN_DEPARTMENT);
    match existing {
        Some(entry) => Ok(entry),
        None => Ok(persistence.create_catalog_entry(CatalogKind::Departments, ADMIN_DEPARTMENT, None)?),
    }
}
