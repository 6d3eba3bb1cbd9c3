// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates travel as `YYYY-MM-DD` strings and are parsed by the handlers so
//! that a malformed date is reported against its field.

use hrdesk_persistence::{EmployeeData, SalaryRecordData};
use serde::{Deserialize, Deserializer, Serialize};

/// Distinguishes an absent field from an explicit `null`.
///
/// Use with `#[serde(default, deserialize_with = "double_option")]`:
/// a missing field stays `None`, `null` becomes `Some(None)`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ========================================================================
// Authentication
// ========================================================================

/// Login request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response carrying the session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The signed session token.
    pub token: String,
    /// Always `Bearer`.
    pub token_type: String,
    /// Expiry as a unix timestamp.
    pub expires_at: i64,
    /// The signed-in employee.
    pub employee: EmployeeData,
}

/// Request for a password-reset token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

/// Response to a password-reset request.
///
/// The token is only included outside production; in production it is
/// delivered out of band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordResetRequestResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_token: Option<String>,
}

/// Request to consume a password-reset token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PasswordResetConfirmRequest {
    pub token: String,
    pub new_password: String,
    pub new_password_confirmation: String,
}

/// Self-service password change.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub new_password_confirmation: String,
}

/// A response carrying only a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The current identity with its global capabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    pub employee: EmployeeData,
    pub capabilities: GlobalCapabilities,
}

// ========================================================================
// Employees
// ========================================================================

/// Request to register an employee.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegisterEmployeeRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<String>,
    #[serde(default)]
    pub department_id: Option<i64>,
    #[serde(default)]
    pub designation_id: Option<i64>,
    /// Defaults to the Regular Employee role.
    #[serde(default)]
    pub role_id: Option<i64>,
    #[serde(default)]
    pub employee_type_id: Option<i64>,
    #[serde(default)]
    pub is_supervisor: bool,
    #[serde(default)]
    pub reports_to: Option<i64>,
    /// `YYYY-MM-DD`.
    pub hire_date: String,
    pub initial_salary: f64,
}

/// Response for a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterEmployeeResponse {
    pub id: i64,
    pub employee_code: String,
    pub message: String,
}

/// Filters for the employee list.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ListEmployeesQuery {
    pub department_id: Option<i64>,
    pub active: Option<bool>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// An employee with the viewer's capabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeDetailResponse {
    #[serde(flatten)]
    pub employee: EmployeeData,
    /// Only present for the employee and supervisors allowed to change it.
    pub current_salary: Option<SalaryRecordData>,
    pub capabilities: EmployeeCapabilities,
}

/// Self-service contact update.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateProfileRequest {
    pub phone: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
}

/// Supervisor update of an employee.
///
/// For nullable references, an explicit `null` clears the value.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[allow(clippy::option_option)]
pub struct UpdateEmployeeRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub department_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub designation_id: Option<Option<i64>>,
    #[serde(default)]
    pub role_id: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub employee_type_id: Option<Option<i64>>,
    #[serde(default)]
    pub is_supervisor: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub reports_to: Option<Option<i64>>,
}

/// Activate or deactivate an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SetStatusRequest {
    pub is_active: bool,
}

/// Append a salary record.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddSalaryRequest {
    pub amount: f64,
    /// `YYYY-MM-DD`.
    pub effective_date: String,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Attach a skill by name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AttachSkillRequest {
    pub skill_name: String,
    /// `beginner`, `intermediate`, `advanced` or `expert`.
    pub proficiency: String,
}

/// Year selector for balances. Defaults to the current year.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct LeaveBalancesQuery {
    pub year: Option<i32>,
}

/// Set the allotment of one balance.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct SetAllotmentRequest {
    pub leave_type_id: i64,
    /// Defaults to the current year.
    #[serde(default)]
    pub year: Option<i32>,
    pub total_days: i64,
}

/// Inclusive date filter for attendance history.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AttendanceQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

// ========================================================================
// Attendance
// ========================================================================

/// Mark an employee absent on a date.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarkAbsentRequest {
    pub employee_id: i64,
    /// `YYYY-MM-DD`.
    pub date: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// Supervisor edit of an attendance row.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateAttendanceRequest {
    pub status: Option<String>,
    pub note: Option<String>,
}

// ========================================================================
// Leave
// ========================================================================

/// Submit a leave request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubmitLeaveRequest {
    pub leave_type_id: i64,
    /// `YYYY-MM-DD`, inclusive.
    pub start_date: String,
    /// `YYYY-MM-DD`, inclusive.
    pub end_date: String,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Filters for the caller's own requests.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LeaveListQuery {
    pub status: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Approve or reject a pending request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProcessLeaveRequest {
    /// `approved` or `rejected`.
    pub status: String,
    #[serde(default)]
    pub comment: Option<String>,
}

// ========================================================================
// Notifications
// ========================================================================

/// Inbox filters.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct NotificationQuery {
    pub unread_only: Option<bool>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// The unread count after an inbox mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadCountResponse {
    pub message: String,
    pub unread_count: i64,
}

// ========================================================================
// Projects
// ========================================================================

/// Project list filter.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct ProjectQuery {
    /// Only projects the caller is assigned to.
    pub mine: Option<bool>,
}

/// Create a project.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to `planned`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Update a project. An explicit `null` clears a nullable field.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[allow(clippy::option_option)]
pub struct UpdateProjectRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub start_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub end_date: Option<Option<String>>,
}

/// Assign an employee to a project.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssignEmployeeRequest {
    pub employee_id: i64,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

// ========================================================================
// Reference data
// ========================================================================

/// Create a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogEntryRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Update a catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[allow(clippy::option_option)]
pub struct UpdateCatalogEntryRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}

/// Create a leave type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LeaveTypeRequest {
    pub name: String,
    pub default_days: i64,
    #[serde(default)]
    pub description: Option<String>,
}

/// Update a leave type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[allow(clippy::option_option)]
pub struct UpdateLeaveTypeRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub default_days: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}

/// System-log filters.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LogQuery {
    pub entity_type: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

// ========================================================================
// Capabilities
// ========================================================================

/// Represents whether a specific action is permitted.
///
/// This enum provides better type safety than raw booleans and serializes
/// to JSON as true/false for API compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(self.is_allowed())
    }
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        bool::deserialize(deserializer).map(Self::from_bool)
    }
}

/// What classes of action an employee may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalCapabilities {
    pub can_register_employees: Capability,
    pub can_approve_leave: Capability,
    pub can_manage_projects: Capability,
    pub can_manage_reference_data: Capability,
    pub can_view_logs: Capability,
}

/// What the viewer may do with one employee record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCapabilities {
    pub can_edit_profile: Capability,
    pub can_manage: Capability,
    pub can_add_salary: Capability,
    pub can_manage_skills: Capability,
    pub can_change_status: Capability,
}
