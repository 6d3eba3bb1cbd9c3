// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use hrdesk_audit::Actor;
use hrdesk_domain::{Role, SalaryAmount};
use hrdesk_persistence::{CatalogKind, NewEmployee, Persistence, RegisteredEmployee};
use time::{Date, Month, OffsetDateTime};

use crate::auth::AuthenticatedEmployee;
use crate::token::TokenService;

pub const TEST_SECRET: &[u8] = b"api-test-secret-that-is-long-enough-for-hs256";
pub const TEST_PASSWORD: &str = "Password1!";

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn create_test_tokens() -> TokenService {
    TokenService::new(TEST_SECRET).expect("Test secret is long enough")
}

pub fn create_test_date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).expect("Valid test date")
}

pub fn current_year() -> i32 {
    OffsetDateTime::now_utc().year()
}

pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Formats a January date in the current year.
pub fn january(day: u8) -> String {
    format!("{}-01-{day:02}", current_year())
}

fn create_test_new_employee(name: &str, email: &str) -> NewEmployee {
    NewEmployee {
        name: name.to_string(),
        email: email.to_string(),
        password: TEST_PASSWORD.to_string(),
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

pub fn authenticate_as(persistence: &Persistence, employee_id: i64) -> AuthenticatedEmployee {
    AuthenticatedEmployee::new(
        persistence
            .find_employee(employee_id)
            .expect("Employee lookup failed")
            .expect("Employee not found"),
    )
}

/// One department with a senior supervisor, a supervisor reporting to
/// them and a regular employee reporting to the supervisor, plus a regular
/// employee in another department.
pub struct TestOrg {
    pub department_id: i64,
    pub other_department_id: i64,
    pub senior: RegisteredEmployee,
    pub supervisor: RegisteredEmployee,
    pub employee: RegisteredEmployee,
    pub outsider: RegisteredEmployee,
}

pub fn create_test_org(persistence: &Persistence) -> TestOrg {
    let department_id: i64 = persistence
        .create_catalog_entry(CatalogKind::Departments, "Engineering", None)
        .expect("Failed to create department")
        .id;
    let other_department_id: i64 = persistence
        .create_catalog_entry(CatalogKind::Departments, "Finance", None)
        .expect("Failed to create department")
        .id;

    let mut senior: NewEmployee = create_test_new_employee("Sage Senior", "sage@example.com");
    senior.department_id = Some(department_id);
    senior.role_id = Some(Role::SENIOR_SUPERVISOR_ID);
    senior.is_supervisor = true;
    let senior: RegisteredEmployee = persistence
        .register_employee(Actor::system(), &senior)
        .expect("Failed to register senior supervisor");

    let mut supervisor: NewEmployee = create_test_new_employee("Sam Supervisor", "sam@example.com");
    supervisor.department_id = Some(department_id);
    supervisor.role_id = Some(Role::SUPERVISOR_ID);
    supervisor.is_supervisor = true;
    supervisor.reports_to = Some(senior.id);
    let supervisor: RegisteredEmployee = persistence
        .register_employee(Actor::employee(senior.id), &supervisor)
        .expect("Failed to register supervisor");

    let mut employee: NewEmployee = create_test_new_employee("Erin Employee", "erin@example.com");
    employee.department_id = Some(department_id);
    employee.reports_to = Some(supervisor.id);
    let employee: RegisteredEmployee = persistence
        .register_employee(Actor::employee(supervisor.id), &employee)
        .expect("Failed to register employee");

    let mut outsider: NewEmployee = create_test_new_employee("Olly Outsider", "olly@example.com");
    outsider.department_id = Some(other_department_id);
    let outsider: RegisteredEmployee = persistence
        .register_employee(Actor::system(), &outsider)
        .expect("Failed to register outsider");

    TestOrg {
        department_id,
        other_department_id,
        senior,
        supervisor,
        employee,
        outsider,
    }
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
