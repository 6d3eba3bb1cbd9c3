// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod attendance_tests;
mod initialization_tests;
mod project_tests;

use hrdesk_audit::Actor;
use hrdesk_domain::{EmployeeProfile, Role, SalaryAmount};
use time::{Date, Month, OffsetDateTime};

use crate::{CatalogKind, NewEmployee, Persistence, RegisteredEmployee};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn create_test_department(persistence: &Persistence, name: &str) -> i64 {
    persistence
        .create_catalog_entry(CatalogKind::Departments, name, None)
        .expect("Failed to create department")
        .id
}

pub fn create_test_date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).expect("Valid test date")
}

pub fn current_year() -> i32 {
    OffsetDateTime::now_utc().year()
}

pub fn create_test_new_employee(name: &str, email: &str) -> NewEmployee {
    NewEmployee {
        name: name.to_string(),
        email: email.to_string(),
        password: String::from("Password1!"),
        phone: None,
        address: None,
        emergency_contact: None,
        department_id: None,
        designation_id: None,
        role_id: None,
        employee_type_id: None,
        is_supervisor: false,
        reports_to: None,
        hire_date: create_test_date(2024, Month::March, 1),
        initial_salary: SalaryAmount::from_major(50_000.0).expect("Valid salary"),
    }
}

/// A supervisor and one direct report, both in the same department.
pub struct TestTeam {
    pub department_id: i64,
    pub supervisor: RegisteredEmployee,
    pub employee: RegisteredEmployee,
}

pub fn create_test_team(persistence: &Persistence) -> TestTeam {
    let department_id: i64 = create_test_department(persistence, "Engineering");

    let mut supervisor: NewEmployee = create_test_new_employee("Sam Supervisor", "sam@example.com");
    supervisor.department_id = Some(department_id);
    supervisor.role_id = Some(Role::SUPERVISOR_ID);
    supervisor.is_supervisor = true;
    let supervisor: RegisteredEmployee = persistence
        .register_employee(Actor::system(), &supervisor)
        .expect("Failed to register supervisor");

    let mut employee: NewEmployee = create_test_new_employee("Erin Employee", "erin@example.com");
    employee.department_id = Some(department_id);
    employee.reports_to = Some(supervisor.id);
    let employee: RegisteredEmployee = persistence
        .register_employee(Actor::employee(supervisor.id), &employee)
        .expect("Failed to register employee");

    TestTeam {
        department_id,
        supervisor,
        employee,
    }
}

pub fn load_profile(persistence: &Persistence, employee_id: i64) -> EmployeeProfile {
    persistence
        .find_profile(employee_id)
        .expect("Profile lookup failed")
        .expect("Profile not found")
}

pub fn annual_leave_type_id(persistence: &Persistence) -> i64 {
    persistence
        .list_leave_types()
        .expect("Failed to list leave types")
        .into_iter()
        .find(|t| t.name == "Annual")
        .expect("Annual leave type is seeded")
        .id
}
