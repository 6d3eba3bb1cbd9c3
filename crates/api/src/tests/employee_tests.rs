// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for employee registration, visibility and management scope.

use hrdesk_domain::Role;
use hrdesk_persistence::{EmployeeData, Page, Persistence, SalaryRecordData};

use crate::auth::AuthenticatedEmployee;
use crate::error::ApiError;
use crate::handlers::{
    add_salary_record, attach_skill, get_employee, list_employees, list_salary_history,
    register_employee, set_leave_allotment, update_employee, update_own_profile, verify_skill,
};
use crate::request_response::{
    AddSalaryRequest, AttachSkillRequest, EmployeeDetailResponse, ListEmployeesQuery,
    RegisterEmployeeRequest, RegisterEmployeeResponse, SetAllotmentRequest,
    UpdateEmployeeRequest, UpdateProfileRequest,
};
use crate::tests::helpers::{
    TestOrg, annual_leave_type_id, authenticate_as, create_test_org, create_test_persistence,
    today,
};

fn create_test_registration(org: &TestOrg) -> RegisterEmployeeRequest {
    RegisterEmployeeRequest {
        name: String::from("Nina New"),
        email: String::from("nina@example.com"),
        password: String::from("Welcome-Aboard1"),
        phone: Some(String::from("555-0100")),
        address: None,
        emergency_contact: None,
        department_id: Some(org.department_id),
        designation_id: None,
        role_id: None,
        employee_type_id: None,
        is_supervisor: false,
        reports_to: Some(org.supervisor.id),
        hire_date: String::from("2025-06-01"),
        initial_salary: 42_000.0,
    }
}

fn salary_request(amount: f64) -> AddSalaryRequest {
    AddSalaryRequest {
        amount,
        effective_date: String::from("2025-07-01"),
        reason: Some(String::from("Annual review")),
    }
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn test_supervisor_registers_employee_with_code_and_salary() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);

    let response: RegisterEmployeeResponse =
        register_employee(&persistence, &supervisor, &create_test_registration(&org)).unwrap();

    assert!(response.employee_code.starts_with("EMP-"));
    let history: Vec<SalaryRecordData> = persistence.list_salary_history(response.id).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].amount_cents, 4_200_000);
}

#[test]
fn test_regular_employee_cannot_register() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let employee: AuthenticatedEmployee = authenticate_as(&persistence, org.employee.id);

    let result = register_employee(&persistence, &employee, &create_test_registration(&org));

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_registration_rejects_invalid_input_before_writing() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);

    let mut bad_salary: RegisterEmployeeRequest = create_test_registration(&org);
    bad_salary.initial_salary = 0.0;
    let mut bad_date: RegisterEmployeeRequest = create_test_registration(&org);
    bad_date.hire_date = String::from("01/06/2025");
    let mut weak_password: RegisterEmployeeRequest = create_test_registration(&org);
    weak_password.password = String::from("password");

    match register_employee(&persistence, &supervisor, &bad_salary) {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "initial_salary"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
    match register_employee(&persistence, &supervisor, &bad_date) {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "hire_date"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
    assert!(matches!(
        register_employee(&persistence, &supervisor, &weak_password),
        Err(ApiError::PasswordPolicyViolation { .. })
    ));
    assert!(persistence.find_credentials_by_email("nina@example.com").unwrap().is_none());
}

#[test]
fn test_duplicate_email_is_a_conflict() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);
    let mut request: RegisterEmployeeRequest = create_test_registration(&org);
    request.email = String::from("erin@example.com");

    let result = register_employee(&persistence, &supervisor, &request);

    assert!(matches!(result, Err(ApiError::Conflict { .. })));
}

#[test]
fn test_unknown_department_is_invalid_input() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);
    let mut request: RegisterEmployeeRequest = create_test_registration(&org);
    request.department_id = Some(9_999);

    let result = register_employee(&persistence, &supervisor, &request);

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_supervisor_cannot_grant_senior_role() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);
    let mut request: RegisterEmployeeRequest = create_test_registration(&org);
    request.role_id = Some(Role::SENIOR_SUPERVISOR_ID);

    let result = register_employee(&persistence, &supervisor, &request);

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

// ============================================================================
// Visibility
// ============================================================================

#[test]
fn test_supervisor_lists_team_without_self_or_other_departments() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);

    let page: Page<EmployeeData> =
        list_employees(&persistence, &supervisor, &ListEmployeesQuery::default()).unwrap();
    let ids: Vec<i64> = page.items.iter().map(|e| e.id).collect();

    assert!(ids.contains(&org.employee.id));
    assert!(!ids.contains(&org.supervisor.id));
    assert!(!ids.contains(&org.outsider.id));
}

#[test]
fn test_regular_employee_cannot_list_employees() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let employee: AuthenticatedEmployee = authenticate_as(&persistence, org.employee.id);

    let result = list_employees(&persistence, &employee, &ListEmployeesQuery::default());

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_employee_sees_own_record_with_salary() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let employee: AuthenticatedEmployee = authenticate_as(&persistence, org.employee.id);

    let detail: EmployeeDetailResponse =
        get_employee(&persistence, &employee, org.employee.id).unwrap();

    assert!(detail.current_salary.is_some());
    assert!(detail.capabilities.can_edit_profile.is_allowed());
    assert!(!detail.capabilities.can_manage.is_allowed());
}

#[test]
fn test_employee_cannot_view_colleague() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let employee: AuthenticatedEmployee = authenticate_as(&persistence, org.employee.id);

    let result = get_employee(&persistence, &employee, org.outsider.id);

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_missing_employee_is_not_found() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);

    match get_employee(&persistence, &supervisor, 9_999) {
        Err(ApiError::ResourceNotFound { resource_type, .. }) => {
            assert_eq!(resource_type, "Employee");
        }
        other => panic!("Expected ResourceNotFound, got {other:?}"),
    }
}

#[test]
fn test_senior_sees_salary_of_supervisor() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let senior: AuthenticatedEmployee = authenticate_as(&persistence, org.senior.id);

    let detail: EmployeeDetailResponse =
        get_employee(&persistence, &senior, org.supervisor.id).unwrap();

    assert!(detail.capabilities.can_add_salary.is_allowed());
    assert!(detail.current_salary.is_some());
}

// ============================================================================
// Updates
// ============================================================================

#[test]
fn test_employee_updates_own_contact_details() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let employee: AuthenticatedEmployee = authenticate_as(&persistence, org.employee.id);

    let updated: EmployeeData = update_own_profile(
        &persistence,
        &employee,
        &UpdateProfileRequest {
            phone: Some(String::from("555-0199")),
            address: None,
            emergency_contact: None,
        },
    )
    .unwrap();

    assert_eq!(updated.phone.as_deref(), Some("555-0199"));
}

#[test]
fn test_supervisor_cannot_update_own_employment_details() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);

    let result = update_employee(
        &persistence,
        &supervisor,
        org.supervisor.id,
        &UpdateEmployeeRequest {
            is_supervisor: Some(false),
            ..UpdateEmployeeRequest::default()
        },
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_reporting_cycle_is_rejected() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let senior: AuthenticatedEmployee = authenticate_as(&persistence, org.senior.id);

    let result = update_employee(
        &persistence,
        &senior,
        org.supervisor.id,
        &UpdateEmployeeRequest {
            reports_to: Some(Some(org.employee.id)),
            ..UpdateEmployeeRequest::default()
        },
    );

    match result {
        Err(ApiError::DomainRuleViolation { rule, .. }) => assert_eq!(rule, "reporting_cycle"),
        other => panic!("Expected DomainRuleViolation, got {other:?}"),
    }
}

// ============================================================================
// Salary
// ============================================================================

#[test]
fn test_supervisor_adds_salary_for_regular_employee() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);

    add_salary_record(&persistence, &supervisor, org.employee.id, &salary_request(55_000.0))
        .unwrap();

    let history: Vec<SalaryRecordData> =
        list_salary_history(&persistence, &supervisor, org.employee.id).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].amount_cents, 5_500_000);
}

#[test]
fn test_salary_rules_by_role() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);
    let senior: AuthenticatedEmployee = authenticate_as(&persistence, org.senior.id);

    let own = add_salary_record(&persistence, &supervisor, org.supervisor.id, &salary_request(1.0));
    let upward = add_salary_record(&persistence, &supervisor, org.senior.id, &salary_request(1.0));
    let other_department =
        add_salary_record(&persistence, &senior, org.outsider.id, &salary_request(1.0));

    assert!(matches!(own, Err(ApiError::Unauthorized { .. })));
    assert!(matches!(upward, Err(ApiError::Unauthorized { .. })));
    assert!(matches!(other_department, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_salary_amount_must_be_positive() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);

    match add_salary_record(&persistence, &supervisor, org.employee.id, &salary_request(-5.0)) {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "amount"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

// ============================================================================
// Skills and allotments
// ============================================================================

#[test]
fn test_supervisor_attaches_and_verifies_skill() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);

    let skill = attach_skill(
        &persistence,
        &supervisor,
        org.employee.id,
        &AttachSkillRequest {
            skill_name: String::from("Rust"),
            proficiency: String::from("advanced"),
        },
    )
    .unwrap();
    assert!(!skill.is_verified);

    let verified = verify_skill(&persistence, &supervisor, org.employee.id, skill.skill_id).unwrap();
    assert!(verified.is_verified);
    assert_eq!(verified.verified_by, Some(org.supervisor.id));
}

#[test]
fn test_unknown_proficiency_is_invalid_input() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);

    let result = attach_skill(
        &persistence,
        &supervisor,
        org.employee.id,
        &AttachSkillRequest {
            skill_name: String::from("Rust"),
            proficiency: String::from("wizard"),
        },
    );

    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "proficiency"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_allotment_day_count_is_bounded() {
    let persistence: Persistence = create_test_persistence();
    let org: TestOrg = create_test_org(&persistence);
    let supervisor: AuthenticatedEmployee = authenticate_as(&persistence, org.supervisor.id);

    let result = set_leave_allotment(
        &persistence,
        &supervisor,
        org.employee.id,
        SetAllotmentRequest {
            leave_type_id: annual_leave_type_id(&persistence),
            year: None,
            total_days: 400,
        },
        today(),
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}
