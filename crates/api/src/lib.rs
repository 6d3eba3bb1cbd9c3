// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for hrdesk.
//!
//! This crate sits between the HTTP server and the persistence layer. It
//! owns authentication (bcrypt credentials checked by persistence, signed
//! session and reset tokens), the password policy, request and response
//! types, capability computation, and the translation of domain, core and
//! persistence errors into [`ApiError`].
//!
//! Handlers never trust identity carried inside a token beyond the employee
//! ID: the employee row is reloaded on every request so deactivation and
//! role changes take effect immediately.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod capabilities;
mod error;
pub mod handlers;
mod password_policy;
mod request_response;
mod token;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedEmployee, AuthenticationService, IssuedSession};
pub use capabilities::{compute_employee_capabilities, compute_global_capabilities};
pub use error::{ApiError, AuthError};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    AddSalaryRequest, AssignEmployeeRequest, AttachSkillRequest, AttendanceQuery, Capability,
    CatalogEntryRequest, ChangePasswordRequest, CreateProjectRequest, EmployeeCapabilities,
    EmployeeDetailResponse, GlobalCapabilities, LeaveBalancesQuery, LeaveListQuery,
    LeaveTypeRequest, ListEmployeesQuery, LogQuery, LoginRequest, LoginResponse,
    MarkAbsentRequest, MessageResponse, NotificationQuery, PasswordResetConfirmRequest,
    PasswordResetRequest, PasswordResetRequestResponse, ProcessLeaveRequest, ProjectQuery,
    RegisterEmployeeRequest, RegisterEmployeeResponse, SetAllotmentRequest, SetStatusRequest,
    SubmitLeaveRequest, UnreadCountResponse, UpdateAttendanceRequest, UpdateCatalogEntryRequest,
    UpdateEmployeeRequest, UpdateLeaveTypeRequest, UpdateProfileRequest, UpdateProjectRequest,
    WhoAmIResponse,
};
pub use token::{
    MIN_SECRET_BYTES, RESET_TTL, ResetClaims, SESSION_TTL, SessionClaims, TokenError, TokenScope,
    TokenService,
};
