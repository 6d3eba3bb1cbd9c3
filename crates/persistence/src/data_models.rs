// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hrdesk_domain::{
    AttendanceStatus, DateRange, EmployeeProfile, LeaveStatus, Proficiency, ProjectStatus, Role,
    SalaryAmount,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::Date;

/// Default number of rows per page.
pub const DEFAULT_PER_PAGE: i64 = 20;

/// Largest page size a caller may request.
pub const MAX_PER_PAGE: i64 = 100;

/// A 1-based page request, clamped to sane bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
}

impl PageRequest {
    /// Builds a page request, substituting defaults and clamping limits.
    #[must_use]
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE),
        }
    }

    /// Rows to skip.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results plus the unpaged total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

/// Login material for an employee. Never serialized.
#[derive(Debug, Clone)]
pub struct CredentialData {
    pub employee_id: i64,
    pub password_hash: String,
    pub is_active: bool,
}

/// An employee record with reference names resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeData {
    pub id: i64,
    pub employee_code: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub department_id: Option<i64>,
    pub department_name: Option<String>,
    pub designation_id: Option<i64>,
    pub designation_name: Option<String>,
    pub role_id: i64,
    pub role: Role,
    pub role_name: Option<String>,
    pub employee_type_id: Option<i64>,
    pub employee_type_name: Option<String>,
    pub is_supervisor: bool,
    pub reports_to: Option<i64>,
    pub is_active: bool,
    pub hire_date: String,
    pub profile_image: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl EmployeeData {
    /// The authorization-relevant subset of this record.
    #[must_use]
    pub const fn profile(&self) -> EmployeeProfile {
        EmployeeProfile {
            id: self.id,
            role: self.role,
            department_id: self.department_id,
            is_supervisor: self.is_supervisor,
            reports_to: self.reports_to,
            is_active: self.is_active,
        }
    }
}

/// The outcome of pointing an employee at a new profile image.
#[derive(Debug, Clone)]
pub struct ProfileImageChange {
    pub employee: EmployeeData,
    /// The previous image path, when it differs from the new one.
    pub replaced: Option<String>,
}

/// Input for registering an employee. Validated before it reaches storage.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub department_id: Option<i64>,
    pub designation_id: Option<i64>,
    pub role_id: Option<i64>,
    pub employee_type_id: Option<i64>,
    pub is_supervisor: bool,
    pub reports_to: Option<i64>,
    pub hire_date: Date,
    pub initial_salary: SalaryAmount,
}

/// Identifiers assigned at registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredEmployee {
    pub id: i64,
    pub employee_code: String,
}

/// Self-service contact changes. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ContactUpdate {
    pub phone: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
}

/// Supervisor changes to an employee.
///
/// `None` leaves a field unchanged. For nullable references,
/// `Some(None)` clears the reference.
#[derive(Debug, Clone, Default)]
#[allow(clippy::option_option)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub department_id: Option<Option<i64>>,
    pub designation_id: Option<Option<i64>>,
    pub role_id: Option<i64>,
    pub employee_type_id: Option<Option<i64>>,
    pub is_supervisor: Option<bool>,
    pub reports_to: Option<Option<i64>>,
}

/// Filters for the employee list.
#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
    pub department_id: Option<i64>,
    pub active: Option<bool>,
    pub search: Option<String>,
}

/// One salary ledger row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryRecordData {
    pub id: i64,
    pub employee_id: i64,
    pub amount: f64,
    pub amount_cents: i64,
    pub effective_date: String,
    pub reason: Option<String>,
    pub created_by: Option<i64>,
    pub created_at: String,
}

/// Input for appending a salary row.
#[derive(Debug, Clone)]
pub struct NewSalaryRecord {
    pub amount: SalaryAmount,
    pub effective_date: Date,
    pub reason: Option<String>,
}

/// A skill attached to an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeSkillData {
    pub id: i64,
    pub employee_id: i64,
    pub skill_id: i64,
    pub skill_name: String,
    pub proficiency: Proficiency,
    pub is_verified: bool,
    pub verified_by: Option<i64>,
}

/// Metadata of an uploaded document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentData {
    pub id: i64,
    pub employee_id: i64,
    pub title: String,
    pub file_path: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub uploaded_by: i64,
    pub created_at: String,
}

/// Input for recording an uploaded document.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub employee_id: i64,
    pub title: String,
    pub file_path: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub uploaded_by: i64,
}

/// A leave catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveTypeData {
    pub id: i64,
    pub name: String,
    pub default_days: i64,
    pub description: Option<String>,
}

/// One (employee, leave type, year) balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveBalanceData {
    pub id: i64,
    pub employee_id: i64,
    pub leave_type_id: i64,
    pub leave_type_name: String,
    pub year: i32,
    pub total_days: i64,
    pub used_days: i64,
    pub available_days: i64,
}

/// A leave request with names resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequestData {
    pub id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub leave_type_id: i64,
    pub leave_type_name: String,
    pub start_date: String,
    pub end_date: String,
    pub total_days: i64,
    pub reason: Option<String>,
    pub status: LeaveStatus,
    pub approved_by: Option<i64>,
    pub approved_at: Option<String>,
    pub comment: Option<String>,
    pub created_at: String,
}

/// Input for submitting a leave request.
#[derive(Debug, Clone)]
pub struct NewLeaveRequest {
    pub employee_id: i64,
    pub leave_type_id: i64,
    pub range: DateRange,
    pub reason: Option<String>,
}

/// A stored request plus the balance it would leave behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveSubmissionResult {
    pub request: LeaveRequestData,
    pub remaining_after_approval: i64,
}

/// One attendance row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceData {
    pub id: i64,
    pub employee_id: i64,
    pub date: String,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub status: AttendanceStatus,
    pub note: Option<String>,
}

/// Supervisor edit of an attendance row.
#[derive(Debug, Clone, Default)]
pub struct AttendanceUpdate {
    pub status: Option<AttendanceStatus>,
    pub note: Option<String>,
}

/// An inbox message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationData {
    pub id: i64,
    pub employee_id: i64,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: String,
}

/// An inbox page with the unread count recomputed at read time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPage {
    pub items: Vec<NotificationData>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub unread_count: i64,
}

/// Simple reference catalogs sharing the (id, name, description) shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogKind {
    Departments,
    Designations,
    Roles,
    EmployeeTypes,
    Skills,
}

impl CatalogKind {
    /// Resolves the URL segment used for a catalog.
    #[must_use]
    pub fn from_path(segment: &str) -> Option<Self> {
        match segment {
            "departments" => Some(Self::Departments),
            "designations" => Some(Self::Designations),
            "roles" => Some(Self::Roles),
            "employee-types" => Some(Self::EmployeeTypes),
            "skills" => Some(Self::Skills),
            _ => None,
        }
    }

    /// Human-readable singular name.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Departments => "Department",
            Self::Designations => "Designation",
            Self::Roles => "Role",
            Self::EmployeeTypes => "Employee type",
            Self::Skills => "Skill",
        }
    }
}

/// A row of a simple catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// A project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectData {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub created_by: i64,
    pub created_at: String,
}

/// Input for creating a project.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

/// Changes to a project. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
#[allow(clippy::option_option)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<ProjectStatus>,
    pub start_date: Option<Option<Date>>,
    pub end_date: Option<Option<Date>>,
}

/// An employee's participation in a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentData {
    pub id: i64,
    pub project_id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub role: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Input for assigning an employee to a project.
#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub employee_id: i64,
    pub role: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

/// A project with its assignments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: ProjectData,
    pub assignments: Vec<AssignmentData>,
}

/// One system-log row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogData {
    pub id: i64,
    pub actor_id: Option<i64>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: i64,
    pub details: Option<String>,
    pub created_at: String,
}

/// Aggregates for an employee's own dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeDashboard {
    pub leave_balances: Vec<LeaveBalanceData>,
    pub pending_requests: i64,
    /// Attendance rows this month, keyed by status.
    pub attendance_this_month: BTreeMap<String, i64>,
    pub unread_notifications: i64,
    pub active_projects: i64,
    pub current_salary: Option<SalaryRecordData>,
}

/// A minimal employee reference for dashboards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRef {
    pub id: i64,
    pub employee_code: String,
    pub name: String,
}

/// Aggregates for a supervisor's team dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupervisorDashboard {
    pub team_size: i64,
    pub pending_approvals: i64,
    /// Today's attendance rows for the team, keyed by status.
    pub attendance_today: BTreeMap<String, i64>,
    pub on_leave_today: Vec<EmployeeRef>,
}
