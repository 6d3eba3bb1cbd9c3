// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request handlers.
//!
//! Each handler validates its input, applies the scoping rules against the
//! freshly loaded actor and target, then calls the persistence layer. The
//! HTTP surface only moves data in and out of these functions.

use std::str::FromStr;

use hrdesk::{
    authorize_salary_change, ensure_can_view, ensure_senior_supervisor, ensure_supervisor,
    ensure_supervisor_over,
};
use hrdesk_domain::{
    AttendanceStatus, DateRange, DomainError, LeaveDecision, LeaveStatus, Proficiency,
    ProjectStatus, Role, SalaryAmount, WorkdayPolicy, parse_date, validate_catalog_name,
    validate_day_count, validate_email, validate_name,
};
use hrdesk_persistence::{
    AssignmentData, AttendanceData, AttendanceUpdate, CatalogEntry, CatalogKind, ContactUpdate,
    DocumentData, EmployeeDashboard, EmployeeData, EmployeeFilter, EmployeeSkillData,
    EmployeeUpdate, LeaveBalanceData, LeaveRequestData, LeaveSubmissionResult, LeaveTypeData,
    LogData, NewAssignment, NewDocument, NewEmployee, NewLeaveRequest, NewProject,
    NewSalaryRecord, NotificationPage, Page, PageRequest, Persistence, ProfileImageChange,
    ProjectData, ProjectDetail, ProjectUpdate, RegisteredEmployee, SalaryRecordData,
    SupervisorDashboard,
};
use time::{Date, OffsetDateTime};
use tracing::info;

use crate::auth::{AuthenticatedEmployee, AuthenticationService, IssuedSession};
use crate::capabilities::{compute_employee_capabilities, compute_global_capabilities};
use crate::error::ApiError;
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    AddSalaryRequest, AssignEmployeeRequest, AttachSkillRequest, AttendanceQuery,
    CatalogEntryRequest, ChangePasswordRequest, CreateProjectRequest, EmployeeCapabilities,
    EmployeeDetailResponse, LeaveBalancesQuery, LeaveListQuery, LeaveTypeRequest,
    ListEmployeesQuery, LogQuery, LoginRequest, LoginResponse, MarkAbsentRequest,
    MessageResponse, NotificationQuery, PasswordResetConfirmRequest, PasswordResetRequest,
    PasswordResetRequestResponse, ProcessLeaveRequest, ProjectQuery, RegisterEmployeeRequest,
    RegisterEmployeeResponse, SetAllotmentRequest, SetStatusRequest, SubmitLeaveRequest,
    UnreadCountResponse, UpdateAttendanceRequest, UpdateCatalogEntryRequest,
    UpdateEmployeeRequest, UpdateLeaveTypeRequest, UpdateProfileRequest, UpdateProjectRequest,
    WhoAmIResponse,
};
use crate::token::TokenService;

// ========================================================================
// Shared helpers
// ========================================================================

/// Parses a `YYYY-MM-DD` value, reporting failures against `field`.
fn parse_date_field(field: &str, value: &str) -> Result<Date, ApiError> {
    parse_date(value.trim()).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: e.to_string(),
    })
}

fn parse_optional_date(field: &str, value: Option<&str>) -> Result<Option<Date>, ApiError> {
    value.map(|v| parse_date_field(field, v)).transpose()
}

/// Parses a positive money amount, reporting failures against `field`.
fn parse_amount(field: &str, amount: f64) -> Result<SalaryAmount, ApiError> {
    SalaryAmount::from_major(amount).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: e.to_string(),
    })
}

/// Parses a string-backed enum, reporting failures against `field`.
fn parse_field<T>(field: &str, value: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = DomainError>,
{
    T::from_str(value.trim()).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: e.to_string(),
    })
}

/// Rejects a date pair whose end precedes its start.
fn ensure_ordered(start: Option<Date>, end: Option<Date>) -> Result<(), ApiError> {
    if let (Some(start), Some(end)) = (start, end) {
        DateRange::new(start, end)?;
    }
    Ok(())
}

fn load_employee(persistence: &Persistence, employee_id: i64) -> Result<EmployeeData, ApiError> {
    persistence
        .find_employee(employee_id)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message: format!("Employee {employee_id} not found"),
        })
}

/// Loads `employee_id` and checks that the actor may read their records.
fn load_viewable(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    employee_id: i64,
) -> Result<EmployeeData, ApiError> {
    let target: EmployeeData = load_employee(persistence, employee_id)?;
    ensure_can_view(&actor.profile(), &target.profile())?;
    Ok(target)
}

/// Loads `employee_id` and checks that the actor supervises them.
fn load_supervised(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    employee_id: i64,
    action: &'static str,
) -> Result<EmployeeData, ApiError> {
    let target: EmployeeData = load_employee(persistence, employee_id)?;
    ensure_supervisor_over(&actor.profile(), &target.profile(), action)?;
    Ok(target)
}

/// Refuses to hand out a role above the actor's own.
fn ensure_can_grant_role(actor: &AuthenticatedEmployee, role_id: i64) -> Result<(), ApiError> {
    let granted: Role = Role::from_id(role_id);
    if granted.outranks(actor.employee.role) {
        return Err(ApiError::Unauthorized {
            action: format!("assign the {granted} role"),
            required_role: granted.to_string(),
        });
    }
    Ok(())
}

fn resolve_catalog(kind: &str) -> Result<CatalogKind, ApiError> {
    CatalogKind::from_path(kind).ok_or_else(|| ApiError::ResourceNotFound {
        resource_type: String::from("Catalog"),
        message: format!("Catalog '{kind}' not found"),
    })
}

// ========================================================================
// Authentication
// ========================================================================

/// Logs in with email and password.
///
/// # Errors
///
/// Returns `AuthenticationFailed` with one generic message for any bad
/// credential.
pub fn login(
    persistence: &Persistence,
    tokens: &TokenService,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let session: IssuedSession = AuthenticationService::authenticate(
        persistence,
        tokens,
        &request.email,
        &request.password,
    )?;

    Ok(LoginResponse {
        token: session.token,
        token_type: String::from("Bearer"),
        expires_at: session.expires_at,
        employee: session.employee,
    })
}

/// Issues a password-reset token.
///
/// # Arguments
///
/// * `tokens` - The token service
/// * `request` - The reset request
/// * `expose_token` - Whether to include the token in the response body
///
/// # Errors
///
/// Returns `InvalidInput` if the email is malformed.
pub fn request_password_reset(
    tokens: &TokenService,
    request: &PasswordResetRequest,
    expose_token: bool,
) -> Result<PasswordResetRequestResponse, ApiError> {
    validate_email(request.email.trim())?;
    let token: String = AuthenticationService::issue_password_reset_token(tokens, &request.email)?;

    Ok(PasswordResetRequestResponse {
        message: String::from("If the email is registered, a reset link has been issued"),
        reset_token: expose_token.then_some(token),
    })
}

/// Consumes a password-reset token.
///
/// # Errors
///
/// Returns `InvalidToken` for a bad token and `PasswordPolicyViolation`
/// for a rejected password.
pub fn confirm_password_reset(
    persistence: &Persistence,
    tokens: &TokenService,
    request: &PasswordResetConfirmRequest,
) -> Result<MessageResponse, ApiError> {
    AuthenticationService::consume_reset_token(
        persistence,
        tokens,
        &request.token,
        &request.new_password,
        &request.new_password_confirmation,
    )?;
    Ok(MessageResponse::new("Password has been reset"))
}

/// Changes the actor's own password.
///
/// # Errors
///
/// Returns `AuthenticationFailed` if the current password is wrong.
pub fn change_password(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    request: &ChangePasswordRequest,
) -> Result<MessageResponse, ApiError> {
    AuthenticationService::change_password(
        persistence,
        actor,
        &request.current_password,
        &request.new_password,
        &request.new_password_confirmation,
    )?;
    Ok(MessageResponse::new("Password changed successfully"))
}

/// Returns the actor with global capabilities.
#[must_use]
pub fn whoami(actor: &AuthenticatedEmployee) -> WhoAmIResponse {
    WhoAmIResponse {
        employee: actor.employee.clone(),
        capabilities: compute_global_capabilities(&actor.profile()),
    }
}

// ========================================================================
// Employees
// ========================================================================

/// Registers an employee with an initial salary and leave balances.
///
/// All input is validated before anything is written.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not a supervisor
/// - Name, email, password, hire date or salary is invalid
/// - A referenced record does not exist
/// - The email is already registered
pub fn register_employee(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    request: &RegisterEmployeeRequest,
) -> Result<RegisterEmployeeResponse, ApiError> {
    ensure_supervisor(&actor.profile())?;

    validate_name(&request.name)?;
    validate_email(request.email.trim())?;
    PasswordPolicy::default().validate(&request.password, &request.email, &request.name)?;
    let hire_date: Date = parse_date_field("hire_date", &request.hire_date)?;
    let initial_salary: SalaryAmount = parse_amount("initial_salary", request.initial_salary)?;
    if let Some(role_id) = request.role_id {
        ensure_can_grant_role(actor, role_id)?;
    }

    let employee: NewEmployee = NewEmployee {
        name: request.name.trim().to_string(),
        email: request.email.trim().to_string(),
        password: request.password.clone(),
        phone: request.phone.clone(),
        address: request.address.clone(),
        emergency_contact: request.emergency_contact.clone(),
        department_id: request.department_id,
        designation_id: request.designation_id,
        role_id: request.role_id,
        employee_type_id: request.employee_type_id,
        is_supervisor: request.is_supervisor,
        reports_to: request.reports_to,
        hire_date,
        initial_salary,
    };
    let registered: RegisteredEmployee =
        persistence.register_employee(actor.to_audit_actor(), &employee)?;

    Ok(RegisterEmployeeResponse {
        id: registered.id,
        message: format!("Registered {} as {}", employee.name, registered.employee_code),
        employee_code: registered.employee_code,
    })
}

/// Lists employees in the actor's supervisory scope.
///
/// # Errors
///
/// Returns `Unauthorized` if the actor is not a supervisor.
pub fn list_employees(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    query: &ListEmployeesQuery,
) -> Result<Page<EmployeeData>, ApiError> {
    ensure_supervisor(&actor.profile())?;
    let filter: EmployeeFilter = EmployeeFilter {
        department_id: query.department_id,
        active: query.active,
        search: query.search.clone().filter(|s| !s.trim().is_empty()),
    };
    Ok(persistence.list_employees(
        &actor.profile(),
        &filter,
        PageRequest::new(query.page, query.per_page),
    )?)
}

/// Returns one employee with the actor's capabilities over them.
///
/// The current salary is included for the employee and for supervisors
/// allowed to change it.
///
/// # Errors
///
/// Returns `ResourceNotFound` or `Unauthorized`.
pub fn get_employee(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    employee_id: i64,
) -> Result<EmployeeDetailResponse, ApiError> {
    let target: EmployeeData = load_viewable(persistence, actor, employee_id)?;
    let capabilities: EmployeeCapabilities =
        compute_employee_capabilities(&actor.profile(), &target.profile());

    let current_salary: Option<SalaryRecordData> =
        if actor.id() == target.id || capabilities.can_add_salary.is_allowed() {
            persistence.current_salary(target.id)?
        } else {
            None
        };

    Ok(EmployeeDetailResponse {
        employee: target,
        current_salary,
        capabilities,
    })
}

/// Updates the actor's own contact fields.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_own_profile(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    request: &UpdateProfileRequest,
) -> Result<EmployeeData, ApiError> {
    let update: ContactUpdate = ContactUpdate {
        phone: request.phone.clone(),
        address: request.address.clone(),
        emergency_contact: request.emergency_contact.clone(),
    };
    Ok(persistence.update_contact(actor.id(), &update)?)
}

/// Updates an employee the actor supervises.
///
/// # Errors
///
/// Returns an error if:
/// - The actor does not supervise the employee
/// - The name is invalid or the role outranks the actor
/// - A reference does not exist or the reporting line would form a cycle
pub fn update_employee(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    employee_id: i64,
    request: &UpdateEmployeeRequest,
) -> Result<EmployeeData, ApiError> {
    load_supervised(persistence, actor, employee_id, "update employment details")?;
    if let Some(name) = &request.name {
        validate_name(name)?;
    }
    if let Some(role_id) = request.role_id {
        ensure_can_grant_role(actor, role_id)?;
    }

    let update: EmployeeUpdate = EmployeeUpdate {
        name: request.name.as_deref().map(|n| n.trim().to_string()),
        phone: request.phone.clone(),
        address: request.address.clone(),
        emergency_contact: request.emergency_contact.clone(),
        department_id: request.department_id,
        designation_id: request.designation_id,
        role_id: request.role_id,
        employee_type_id: request.employee_type_id,
        is_supervisor: request.is_supervisor,
        reports_to: request.reports_to,
    };
    Ok(persistence.update_employee(actor.id(), employee_id, &update)?)
}

/// Activates or deactivates an employee the actor supervises.
///
/// # Errors
///
/// Returns `Unauthorized` for the actor's own record or an employee outside
/// their scope.
pub fn set_employee_status(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    employee_id: i64,
    request: SetStatusRequest,
) -> Result<EmployeeData, ApiError> {
    load_supervised(persistence, actor, employee_id, "change the account status")?;
    Ok(persistence.set_employee_active(actor.id(), employee_id, request.is_active)?)
}

/// Lists an employee's salary ledger, newest first.
///
/// # Errors
///
/// Returns `ResourceNotFound` or `Unauthorized`.
pub fn list_salary_history(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    employee_id: i64,
) -> Result<Vec<SalaryRecordData>, ApiError> {
    load_viewable(persistence, actor, employee_id)?;
    Ok(persistence.list_salary_history(employee_id)?)
}

/// Appends a salary record.
///
/// # Errors
///
/// Returns an error if the role rules forbid the change, or the amount or
/// date is invalid.
pub fn add_salary_record(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    employee_id: i64,
    request: &AddSalaryRequest,
) -> Result<SalaryRecordData, ApiError> {
    let target: EmployeeData = load_employee(persistence, employee_id)?;
    authorize_salary_change(&actor.profile(), &target.profile())?;

    let record: NewSalaryRecord = NewSalaryRecord {
        amount: parse_amount("amount", request.amount)?,
        effective_date: parse_date_field("effective_date", &request.effective_date)?,
        reason: request.reason.clone().filter(|r| !r.trim().is_empty()),
    };
    Ok(persistence.add_salary_record(actor.id(), employee_id, &record)?)
}

/// Lists an employee's skills.
///
/// # Errors
///
/// Returns `ResourceNotFound` or `Unauthorized`.
pub fn list_skills(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    employee_id: i64,
) -> Result<Vec<EmployeeSkillData>, ApiError> {
    load_viewable(persistence, actor, employee_id)?;
    Ok(persistence.list_employee_skills(employee_id)?)
}

/// Attaches a skill by name, creating the catalog entry on demand.
///
/// # Errors
///
/// Returns `Conflict` if the skill is already attached.
pub fn attach_skill(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    employee_id: i64,
    request: &AttachSkillRequest,
) -> Result<EmployeeSkillData, ApiError> {
    load_supervised(persistence, actor, employee_id, "manage skills")?;
    validate_catalog_name(&request.skill_name).map_err(|e| ApiError::InvalidInput {
        field: String::from("skill_name"),
        message: e.to_string(),
    })?;
    let proficiency: Proficiency = parse_field("proficiency", &request.proficiency)?;
    Ok(persistence.attach_skill(employee_id, request.skill_name.trim(), proficiency)?)
}

/// Marks an attached skill as verified by the actor.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the skill is not attached.
pub fn verify_skill(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    employee_id: i64,
    skill_id: i64,
) -> Result<EmployeeSkillData, ApiError> {
    load_supervised(persistence, actor, employee_id, "verify skills")?;
    Ok(persistence.verify_skill(actor.id(), employee_id, skill_id)?)
}

/// Detaches a skill.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the skill is not attached.
pub fn detach_skill(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    employee_id: i64,
    skill_id: i64,
) -> Result<MessageResponse, ApiError> {
    load_supervised(persistence, actor, employee_id, "manage skills")?;
    persistence.detach_skill(employee_id, skill_id)?;
    Ok(MessageResponse::new("Skill removed"))
}

/// Lists an employee's documents.
///
/// # Errors
///
/// Returns `ResourceNotFound` or `Unauthorized`.
pub fn list_documents(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    employee_id: i64,
) -> Result<Vec<DocumentData>, ApiError> {
    load_viewable(persistence, actor, employee_id)?;
    Ok(persistence.list_documents(employee_id)?)
}

/// Checks that the actor may upload documents for an employee.
///
/// Called before any bytes are written to disk.
///
/// # Errors
///
/// Returns `ResourceNotFound` or `Unauthorized`.
pub fn authorize_document_upload(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    employee_id: i64,
) -> Result<(), ApiError> {
    load_viewable(persistence, actor, employee_id)?;
    Ok(())
}

/// Records an uploaded document.
///
/// # Errors
///
/// Returns an error if the title is empty or the insert fails. The caller
/// owns cleanup of the stored file.
pub fn record_document(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    document: &NewDocument,
) -> Result<DocumentData, ApiError> {
    if document.title.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("title"),
            message: String::from("Title cannot be empty"),
        });
    }
    let stored: DocumentData = persistence.add_document(document)?;
    info!(
        document_id = stored.id,
        employee_id = document.employee_id,
        uploaded_by = actor.id(),
        "Document uploaded"
    );
    Ok(stored)
}

/// Points the actor's profile image at a stored file.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn set_profile_image(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    relative_path: &str,
) -> Result<ProfileImageChange, ApiError> {
    Ok(persistence.set_profile_image(actor.id(), relative_path)?)
}

/// Lists an employee's leave balances for a year.
///
/// # Errors
///
/// Returns `ResourceNotFound` or `Unauthorized`.
pub fn list_leave_balances(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    employee_id: i64,
    query: LeaveBalancesQuery,
    today: Date,
) -> Result<Vec<LeaveBalanceData>, ApiError> {
    load_viewable(persistence, actor, employee_id)?;
    Ok(persistence.list_leave_balances(employee_id, query.year.unwrap_or_else(|| today.year()))?)
}

/// Sets an employee's allotment for one leave type and year.
///
/// # Errors
///
/// Returns an error if the actor does not supervise the employee, the day
/// count is out of range, or the allotment is below the days already used.
pub fn set_leave_allotment(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    employee_id: i64,
    request: SetAllotmentRequest,
    today: Date,
) -> Result<LeaveBalanceData, ApiError> {
    load_supervised(persistence, actor, employee_id, "set leave allotments")?;
    validate_day_count(request.total_days)?;
    Ok(persistence.set_leave_allotment(
        actor.id(),
        employee_id,
        request.leave_type_id,
        request.year.unwrap_or_else(|| today.year()),
        request.total_days,
    )?)
}

/// Lists an employee's attendance, optionally within a date range.
///
/// # Errors
///
/// Returns `ResourceNotFound`, `Unauthorized`, or `InvalidInput` for a bad date.
pub fn list_employee_attendance(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    employee_id: i64,
    query: &AttendanceQuery,
) -> Result<Vec<AttendanceData>, ApiError> {
    load_viewable(persistence, actor, employee_id)?;
    attendance_history(persistence, employee_id, query)
}

fn attendance_history(
    persistence: &Persistence,
    employee_id: i64,
    query: &AttendanceQuery,
) -> Result<Vec<AttendanceData>, ApiError> {
    let from: Option<Date> = parse_optional_date("from", query.from.as_deref())?;
    let to: Option<Date> = parse_optional_date("to", query.to.as_deref())?;
    ensure_ordered(from, to)?;
    Ok(persistence.list_attendance(employee_id, from, to)?)
}

// ========================================================================
// Attendance
// ========================================================================

/// Checks the actor in.
///
/// # Errors
///
/// Returns `Conflict` if already checked in today, or a rule violation on
/// a leave day.
pub fn check_in(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    policy: &WorkdayPolicy,
    now: OffsetDateTime,
) -> Result<AttendanceData, ApiError> {
    Ok(persistence.check_in(actor.id(), policy, now)?)
}

/// Checks the actor out.
///
/// # Errors
///
/// Returns a rule violation if not checked in today, or `Conflict` if
/// already checked out.
pub fn check_out(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    policy: &WorkdayPolicy,
    now: OffsetDateTime,
) -> Result<AttendanceData, ApiError> {
    Ok(persistence.check_out(actor.id(), policy, now)?)
}

/// Lists the actor's own attendance.
///
/// # Errors
///
/// Returns `InvalidInput` for a bad date.
pub fn my_attendance(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    query: &AttendanceQuery,
) -> Result<Vec<AttendanceData>, ApiError> {
    attendance_history(persistence, actor.id(), query)
}

/// Marks an employee the actor supervises absent.
///
/// # Errors
///
/// Returns `Conflict` if the date already has an attendance row.
pub fn mark_absent(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    request: &MarkAbsentRequest,
) -> Result<AttendanceData, ApiError> {
    load_supervised(persistence, actor, request.employee_id, "mark attendance")?;
    let date: Date = parse_date_field("date", &request.date)?;
    Ok(persistence.mark_absent(request.employee_id, date, request.note.as_deref())?)
}

/// Edits an attendance row of an employee the actor supervises.
///
/// # Errors
///
/// Returns `ResourceNotFound` or `Unauthorized`.
pub fn update_attendance(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    attendance_id: i64,
    request: &UpdateAttendanceRequest,
) -> Result<AttendanceData, ApiError> {
    let row: AttendanceData = persistence
        .find_attendance(attendance_id)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Attendance"),
            message: format!("Attendance {attendance_id} not found"),
        })?;
    load_supervised(persistence, actor, row.employee_id, "edit attendance")?;

    let status: Option<AttendanceStatus> = request
        .status
        .as_deref()
        .map(|s| parse_field("status", s))
        .transpose()?;
    let update: AttendanceUpdate = AttendanceUpdate {
        status,
        note: request.note.clone(),
    };
    Ok(persistence.update_attendance(attendance_id, &update)?)
}

// ========================================================================
// Leave
// ========================================================================

/// Submits a leave request for the actor.
///
/// # Errors
///
/// Returns an error if the range is invalid, no balance exists, the
/// balance cannot cover the days, or the dates overlap another request.
pub fn submit_leave(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    request: &SubmitLeaveRequest,
) -> Result<LeaveSubmissionResult, ApiError> {
    let start: Date = parse_date_field("start_date", &request.start_date)?;
    let end: Date = parse_date_field("end_date", &request.end_date)?;
    let range: DateRange = DateRange::new(start, end)?;

    let new_request: NewLeaveRequest = NewLeaveRequest {
        employee_id: actor.id(),
        leave_type_id: request.leave_type_id,
        range,
        reason: request.reason.clone().filter(|r| !r.trim().is_empty()),
    };
    Ok(persistence.submit_leave(&new_request)?)
}

/// Lists the actor's own leave requests.
///
/// # Errors
///
/// Returns `InvalidInput` for an unknown status.
pub fn my_leave_requests(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    query: &LeaveListQuery,
) -> Result<Page<LeaveRequestData>, ApiError> {
    let status: Option<LeaveStatus> = query
        .status
        .as_deref()
        .map(|s| parse_field("status", s))
        .transpose()?;
    Ok(persistence.list_my_leave_requests(
        actor.id(),
        status,
        PageRequest::new(query.page, query.per_page),
    )?)
}

/// Lists pending requests the actor may decide.
///
/// # Errors
///
/// Returns `Unauthorized` if the actor is not a supervisor.
pub fn pending_leave_requests(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
) -> Result<Vec<LeaveRequestData>, ApiError> {
    ensure_supervisor(&actor.profile())?;
    Ok(persistence.list_pending_for_supervisor(&actor.profile())?)
}

/// Returns one leave request to its owner or a supervisor in scope.
///
/// # Errors
///
/// Returns `ResourceNotFound` or `Unauthorized`.
pub fn get_leave_request(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    request_id: i64,
) -> Result<LeaveRequestData, ApiError> {
    let request: LeaveRequestData = persistence
        .find_leave_request(request_id)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Leave request"),
            message: format!("Leave request {request_id} not found"),
        })?;
    load_viewable(persistence, actor, request.employee_id)?;
    Ok(request)
}

/// Cancels one of the actor's pending requests.
///
/// # Errors
///
/// Returns `Unauthorized` for another employee's request, or a rule
/// violation if the request is no longer pending.
pub fn cancel_leave_request(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    request_id: i64,
) -> Result<LeaveRequestData, ApiError> {
    Ok(persistence.cancel_leave(actor.id(), request_id)?)
}

/// Approves or rejects a pending request.
///
/// # Errors
///
/// Returns an error if:
/// - The decision is not `approved` or `rejected`
/// - The request is not pending
/// - The actor owns the request or does not supervise its owner
/// - The balance no longer covers the days (approval only)
pub fn process_leave_request(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    request_id: i64,
    request: &ProcessLeaveRequest,
) -> Result<LeaveRequestData, ApiError> {
    let decision: LeaveDecision = parse_field("status", &request.status)?;
    let comment: Option<&str> = request
        .comment
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());
    Ok(persistence.process_leave(&actor.profile(), request_id, decision, comment)?)
}

// ========================================================================
// Notifications
// ========================================================================

/// Lists the actor's inbox.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_notifications(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    query: NotificationQuery,
) -> Result<NotificationPage, ApiError> {
    Ok(persistence.list_notifications(
        actor.id(),
        query.unread_only.unwrap_or(false),
        PageRequest::new(query.page, query.per_page),
    )?)
}

/// Marks one notification read.
///
/// # Errors
///
/// Returns `ResourceNotFound` for a notification the actor does not own.
pub fn mark_notification_read(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    notification_id: i64,
) -> Result<UnreadCountResponse, ApiError> {
    let unread_count: i64 = persistence.mark_notification_read(actor.id(), notification_id)?;
    Ok(UnreadCountResponse {
        message: String::from("Notification marked as read"),
        unread_count,
    })
}

/// Marks every notification read.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn mark_all_notifications_read(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
) -> Result<UnreadCountResponse, ApiError> {
    let unread_count: i64 = persistence.mark_all_notifications_read(actor.id())?;
    Ok(UnreadCountResponse {
        message: String::from("All notifications marked as read"),
        unread_count,
    })
}

/// Deletes one notification.
///
/// # Errors
///
/// Returns `ResourceNotFound` for a notification the actor does not own.
pub fn delete_notification(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    notification_id: i64,
) -> Result<UnreadCountResponse, ApiError> {
    let unread_count: i64 = persistence.delete_notification(actor.id(), notification_id)?;
    Ok(UnreadCountResponse {
        message: String::from("Notification deleted"),
        unread_count,
    })
}

// ========================================================================
// Projects
// ========================================================================

/// Lists projects, optionally only the actor's.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_projects(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    query: ProjectQuery,
) -> Result<Vec<ProjectData>, ApiError> {
    let member: Option<i64> = query.mine.unwrap_or(false).then(|| actor.id());
    Ok(persistence.list_projects(member)?)
}

/// Returns a project with its assignments.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the project does not exist.
pub fn get_project(persistence: &Persistence, project_id: i64) -> Result<ProjectDetail, ApiError> {
    persistence
        .find_project(project_id)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Project"),
            message: format!("Project {project_id} not found"),
        })
}

/// Creates a project.
///
/// # Errors
///
/// Returns an error if the actor is not a supervisor, the input is
/// invalid, or the name is taken.
pub fn create_project(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    request: &CreateProjectRequest,
) -> Result<ProjectData, ApiError> {
    ensure_supervisor(&actor.profile())?;
    validate_catalog_name(&request.name)?;
    let status: ProjectStatus = request
        .status
        .as_deref()
        .map(|s| parse_field("status", s))
        .transpose()?
        .unwrap_or_default();
    let start_date: Option<Date> = parse_optional_date("start_date", request.start_date.as_deref())?;
    let end_date: Option<Date> = parse_optional_date("end_date", request.end_date.as_deref())?;
    ensure_ordered(start_date, end_date)?;

    let project: NewProject = NewProject {
        name: request.name.trim().to_string(),
        description: request.description.clone(),
        status,
        start_date,
        end_date,
    };
    Ok(persistence.create_project(actor.id(), &project)?)
}

/// Updates a project.
///
/// # Errors
///
/// Returns an error if the actor is not a supervisor, the input is
/// invalid, or the project does not exist.
pub fn update_project(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    project_id: i64,
    request: &UpdateProjectRequest,
) -> Result<ProjectData, ApiError> {
    ensure_supervisor(&actor.profile())?;
    if let Some(name) = &request.name {
        validate_catalog_name(name)?;
    }
    let status: Option<ProjectStatus> = request
        .status
        .as_deref()
        .map(|s| parse_field("status", s))
        .transpose()?;
    let start_date: Option<Option<Date>> = request
        .start_date
        .as_ref()
        .map(|d| parse_optional_date("start_date", d.as_deref()))
        .transpose()?;
    let end_date: Option<Option<Date>> = request
        .end_date
        .as_ref()
        .map(|d| parse_optional_date("end_date", d.as_deref()))
        .transpose()?;
    ensure_ordered(start_date.flatten(), end_date.flatten())?;

    let update: ProjectUpdate = ProjectUpdate {
        name: request.name.as_deref().map(|n| n.trim().to_string()),
        description: request.description.clone(),
        status,
        start_date,
        end_date,
    };
    Ok(persistence.update_project(actor.id(), project_id, &update)?)
}

/// Assigns an employee to a project.
///
/// # Errors
///
/// Returns `Conflict` for a duplicate assignment and a rule violation for
/// an inactive employee.
pub fn assign_employee(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    project_id: i64,
    request: &AssignEmployeeRequest,
) -> Result<AssignmentData, ApiError> {
    ensure_supervisor(&actor.profile())?;
    let start_date: Option<Date> = parse_optional_date("start_date", request.start_date.as_deref())?;
    let end_date: Option<Date> = parse_optional_date("end_date", request.end_date.as_deref())?;
    ensure_ordered(start_date, end_date)?;

    let assignment: NewAssignment = NewAssignment {
        employee_id: request.employee_id,
        role: request.role.clone().filter(|r| !r.trim().is_empty()),
        start_date,
        end_date,
    };
    Ok(persistence.assign_employee(actor.id(), project_id, &assignment)?)
}

/// Removes an employee from a project.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the assignment does not exist.
pub fn remove_assignment(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    project_id: i64,
    employee_id: i64,
) -> Result<MessageResponse, ApiError> {
    ensure_supervisor(&actor.profile())?;
    persistence.remove_assignment(actor.id(), project_id, employee_id)?;
    Ok(MessageResponse::new("Assignment removed"))
}

// ========================================================================
// Reference data
// ========================================================================

/// Lists a catalog by its URL segment.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown catalog.
pub fn list_catalog(persistence: &Persistence, kind: &str) -> Result<Vec<CatalogEntry>, ApiError> {
    Ok(persistence.list_catalog(resolve_catalog(kind)?)?)
}

/// Creates a catalog entry.
///
/// # Errors
///
/// Returns an error if the actor is not a Senior Supervisor, the name is
/// empty, or the name is taken.
pub fn create_catalog_entry(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    kind: &str,
    request: &CatalogEntryRequest,
) -> Result<CatalogEntry, ApiError> {
    ensure_senior_supervisor(&actor.profile())?;
    let kind: CatalogKind = resolve_catalog(kind)?;
    validate_catalog_name(&request.name)?;
    Ok(persistence.create_catalog_entry(kind, &request.name, request.description.as_deref())?)
}

/// Updates a catalog entry.
///
/// # Errors
///
/// Returns an error if the actor is not a Senior Supervisor, the entry does
/// not exist, or the new name is taken.
pub fn update_catalog_entry(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    kind: &str,
    entry_id: i64,
    request: &UpdateCatalogEntryRequest,
) -> Result<CatalogEntry, ApiError> {
    ensure_senior_supervisor(&actor.profile())?;
    let kind: CatalogKind = resolve_catalog(kind)?;
    if let Some(name) = &request.name {
        validate_catalog_name(name)?;
    }
    Ok(persistence.update_catalog_entry(
        kind,
        entry_id,
        request.name.as_deref(),
        request.description.as_ref().map(Option::as_deref),
    )?)
}

/// Lists leave types.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_leave_types(persistence: &Persistence) -> Result<Vec<LeaveTypeData>, ApiError> {
    Ok(persistence.list_leave_types()?)
}

/// Creates a leave type.
///
/// # Errors
///
/// Returns an error if the actor is not a Senior Supervisor or the input is
/// invalid.
pub fn create_leave_type(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    request: &LeaveTypeRequest,
) -> Result<LeaveTypeData, ApiError> {
    ensure_senior_supervisor(&actor.profile())?;
    validate_catalog_name(&request.name)?;
    validate_day_count(request.default_days)?;
    Ok(persistence.create_leave_type(
        &request.name,
        request.default_days,
        request.description.as_deref(),
    )?)
}

/// Updates a leave type.
///
/// # Errors
///
/// Returns an error if the actor is not a Senior Supervisor, the input is
/// invalid, or the leave type does not exist.
pub fn update_leave_type(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    leave_type_id: i64,
    request: &UpdateLeaveTypeRequest,
) -> Result<LeaveTypeData, ApiError> {
    ensure_senior_supervisor(&actor.profile())?;
    if let Some(name) = &request.name {
        validate_catalog_name(name)?;
    }
    if let Some(days) = request.default_days {
        validate_day_count(days)?;
    }
    Ok(persistence.update_leave_type(
        leave_type_id,
        request.name.as_deref(),
        request.default_days,
        request.description.as_ref().map(Option::as_deref),
    )?)
}

/// Lists the system log, newest first.
///
/// # Errors
///
/// Returns `Unauthorized` unless the actor is a Senior Supervisor.
pub fn list_logs(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    query: &LogQuery,
) -> Result<Page<LogData>, ApiError> {
    ensure_senior_supervisor(&actor.profile())?;
    Ok(persistence.list_logs(
        query.entity_type.as_deref().filter(|t| !t.trim().is_empty()),
        PageRequest::new(query.page, query.per_page),
    )?)
}

// ========================================================================
// Dashboards
// ========================================================================

/// Aggregates for the actor's own dashboard.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn employee_dashboard(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    today: Date,
) -> Result<EmployeeDashboard, ApiError> {
    Ok(persistence.employee_dashboard(actor.id(), today)?)
}

/// Aggregates for the actor's team.
///
/// # Errors
///
/// Returns `Unauthorized` if the actor is not a supervisor.
pub fn supervisor_dashboard(
    persistence: &Persistence,
    actor: &AuthenticatedEmployee,
    today: Date,
) -> Result<SupervisorDashboard, ApiError> {
    ensure_supervisor(&actor.profile())?;
    Ok(persistence.supervisor_dashboard(&actor.profile(), today)?)
}
