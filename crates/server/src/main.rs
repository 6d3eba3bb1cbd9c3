// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod bootstrap;
mod config;
mod session;
mod uploads;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use clap::Parser;
use hrdesk_api::{
    AddSalaryRequest, ApiError, AssignEmployeeRequest, AttachSkillRequest, AttendanceQuery,
    AuthenticatedEmployee, CatalogEntryRequest, ChangePasswordRequest, CreateProjectRequest, EmployeeDetailResponse,
    LeaveBalancesQuery, LeaveListQuery, LeaveTypeRequest, ListEmployeesQuery, LogQuery,
    LoginRequest, LoginResponse, MarkAbsentRequest, MessageResponse, NotificationQuery,
    PasswordResetConfirmRequest, PasswordResetRequest, PasswordResetRequestResponse,
    ProcessLeaveRequest, ProjectQuery, RegisterEmployeeRequest, RegisterEmployeeResponse,
    SetAllotmentRequest, SetStatusRequest, SubmitLeaveRequest, TokenError, TokenService,
    UnreadCountResponse, UpdateAttendanceRequest, UpdateCatalogEntryRequest,
    UpdateEmployeeRequest, UpdateLeaveTypeRequest, UpdateProfileRequest, UpdateProjectRequest,
    WhoAmIResponse, handlers,
};
use hrdesk_persistence::{
    AssignmentData, AttendanceData, CatalogEntry, DocumentData, EmployeeDashboard, EmployeeData,
    EmployeeSkillData, LeaveBalanceData, LeaveRequestData, LeaveSubmissionResult, LeaveTypeData,
    LogData, NewDocument, NotificationPage, Page, Persistence, ProjectData, ProjectDetail,
    SalaryRecordData, SupervisorDashboard,
};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::config::{Args, ServerConfig};
use crate::session::SessionEmployee;
use crate::uploads::{AcceptedUpload, UploadError, UploadForm, UploadKind};

/// Room for multipart framing on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Application state shared across handlers.
///
/// The persistence layer is a connection pool and is cloned freely. All
/// storage work runs on the blocking thread pool through [`AppState::run`].
#[derive(Clone)]
struct AppState {
    /// The persistence layer.
    persistence: Persistence,
    /// Signs and verifies session and reset tokens.
    tokens: Arc<TokenService>,
    /// Validated startup configuration.
    config: Arc<ServerConfig>,
}

impl AppState {
    fn new(persistence: Persistence, config: ServerConfig) -> Result<Self, TokenError> {
        let tokens: TokenService = TokenService::new(&config.jwt_secret)?;
        Ok(Self {
            persistence,
            tokens: Arc::new(tokens),
            config: Arc::new(config),
        })
    }

    /// Runs a blocking API operation off the async runtime.
    async fn run<T, F>(&self, op: F) -> Result<T, HttpError>
    where
        T: Send + 'static,
        F: FnOnce(&Self) -> Result<T, ApiError> + Send + 'static,
    {
        let state: Self = self.clone();
        let expose: bool = self.config.expose_details();
        tokio::task::spawn_blocking(move || op(&state))
            .await
            .map_err(|e| {
                HttpError::from_api(
                    &ApiError::Internal {
                        message: format!("Blocking task failed: {e}"),
                    },
                    expose,
                )
            })?
            .map_err(|e| HttpError::from_api(&e, expose))
    }

    /// Today's date in the company time zone.
    fn today(&self) -> Result<Date, ApiError> {
        Ok(self.config.policy.localize(OffsetDateTime::now_utc())?.date)
    }
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
struct ErrorResponse {
    /// Always `true`.
    error: bool,
    /// The error message.
    message: String,
    /// Raw fault detail, outside production only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

/// Liveness response body.
#[derive(Debug, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
}

/// HTTP error wrapper that converts API errors to responses.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    /// Fault detail for non-production responses.
    detail: Option<String>,
}

impl HttpError {
    /// Maps an API error to a status and body.
    ///
    /// Internal errors are logged and replaced with a generic message; the
    /// raw detail is kept only when `expose_detail` is set.
    fn from_api(err: &ApiError, expose_detail: bool) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. }
            | ApiError::InvalidInput { .. }
            | ApiError::PasswordPolicyViolation { .. }
            | ApiError::InvalidToken { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal { message } => {
                error!(error = %message, "Internal error");
                return Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: String::from("Internal server error"),
                    detail: expose_detail.then(|| message.clone()),
                };
            }
        };
        Self {
            status,
            message: err.to_string(),
            detail: None,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            detail: self.detail,
        });
        (self.status, body).into_response()
    }
}

impl From<UploadError> for HttpError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Storage(e) => {
                error!(error = %e, "Upload storage failed");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: String::from("Internal server error"),
                    detail: None,
                }
            }
            other => Self {
                status: StatusCode::BAD_REQUEST,
                message: other.to_string(),
                detail: None,
            },
        }
    }
}

// ============================================================================
// Auth
// ============================================================================

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    let response: LoginResponse = app_state
        .run(move |s| handlers::login(&s.persistence, &s.tokens, &req))
        .await?;
    Ok(Json(response))
}

async fn handle_password_reset_request(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<PasswordResetRequest>,
) -> Result<Json<PasswordResetRequestResponse>, HttpError> {
    let response: PasswordResetRequestResponse = app_state
        .run(move |s| handlers::request_password_reset(&s.tokens, &req, s.config.expose_details()))
        .await?;
    Ok(Json(response))
}

async fn handle_password_reset_confirm(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<PasswordResetConfirmRequest>,
) -> Result<Json<MessageResponse>, HttpError> {
    let response: MessageResponse = app_state
        .run(move |s| handlers::confirm_password_reset(&s.persistence, &s.tokens, &req))
        .await?;
    Ok(Json(response))
}

async fn handle_change_password(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, HttpError> {
    let response: MessageResponse = app_state
        .run(move |s| handlers::change_password(&s.persistence, &actor, &req))
        .await?;
    Ok(Json(response))
}

async fn handle_whoami(SessionEmployee(actor): SessionEmployee) -> Json<WhoAmIResponse> {
    Json(handlers::whoami(&actor))
}

async fn handle_register(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Json(req): Json<RegisterEmployeeRequest>,
) -> Result<(StatusCode, Json<RegisterEmployeeResponse>), HttpError> {
    let response: RegisterEmployeeResponse = app_state
        .run(move |s| handlers::register_employee(&s.persistence, &actor, &req))
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

// ============================================================================
// Employees
// ============================================================================

async fn handle_list_employees(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Query(query): Query<ListEmployeesQuery>,
) -> Result<Json<Page<EmployeeData>>, HttpError> {
    let page: Page<EmployeeData> = app_state
        .run(move |s| handlers::list_employees(&s.persistence, &actor, &query))
        .await?;
    Ok(Json(page))
}

async fn handle_get_employee(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Path(employee_id): Path<i64>,
) -> Result<Json<EmployeeDetailResponse>, HttpError> {
    let detail: EmployeeDetailResponse = app_state
        .run(move |s| handlers::get_employee(&s.persistence, &actor, employee_id))
        .await?;
    Ok(Json(detail))
}

async fn handle_update_own_profile(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<EmployeeData>, HttpError> {
    let employee: EmployeeData = app_state
        .run(move |s| handlers::update_own_profile(&s.persistence, &actor, &req))
        .await?;
    Ok(Json(employee))
}

async fn handle_update_employee(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Path(employee_id): Path<i64>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> Result<Json<EmployeeData>, HttpError> {
    let employee: EmployeeData = app_state
        .run(move |s| handlers::update_employee(&s.persistence, &actor, employee_id, &req))
        .await?;
    Ok(Json(employee))
}

async fn handle_set_employee_status(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Path(employee_id): Path<i64>,
    Json(req): Json<SetStatusRequest>,
) -> Result<Json<EmployeeData>, HttpError> {
    let employee: EmployeeData = app_state
        .run(move |s| handlers::set_employee_status(&s.persistence, &actor, employee_id, req))
        .await?;
    Ok(Json(employee))
}

async fn handle_list_salary_history(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Path(employee_id): Path<i64>,
) -> Result<Json<Vec<SalaryRecordData>>, HttpError> {
    let history: Vec<SalaryRecordData> = app_state
        .run(move |s| handlers::list_salary_history(&s.persistence, &actor, employee_id))
        .await?;
    Ok(Json(history))
}

async fn handle_add_salary_record(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Path(employee_id): Path<i64>,
    Json(req): Json<AddSalaryRequest>,
) -> Result<(StatusCode, Json<SalaryRecordData>), HttpError> {
    let record: SalaryRecordData = app_state
        .run(move |s| handlers::add_salary_record(&s.persistence, &actor, employee_id, &req))
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn handle_list_skills(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Path(employee_id): Path<i64>,
) -> Result<Json<Vec<EmployeeSkillData>>, HttpError> {
    let skills: Vec<EmployeeSkillData> = app_state
        .run(move |s| handlers::list_skills(&s.persistence, &actor, employee_id))
        .await?;
    Ok(Json(skills))
}

async fn handle_attach_skill(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Path(employee_id): Path<i64>,
    Json(req): Json<AttachSkillRequest>,
) -> Result<(StatusCode, Json<EmployeeSkillData>), HttpError> {
    let skill: EmployeeSkillData = app_state
        .run(move |s| handlers::attach_skill(&s.persistence, &actor, employee_id, &req))
        .await?;
    Ok((StatusCode::CREATED, Json(skill)))
}

async fn handle_verify_skill(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Path((employee_id, skill_id)): Path<(i64, i64)>,
) -> Result<Json<EmployeeSkillData>, HttpError> {
    let skill: EmployeeSkillData = app_state
        .run(move |s| handlers::verify_skill(&s.persistence, &actor, employee_id, skill_id))
        .await?;
    Ok(Json(skill))
}

async fn handle_detach_skill(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Path((employee_id, skill_id)): Path<(i64, i64)>,
) -> Result<Json<MessageResponse>, HttpError> {
    let response: MessageResponse = app_state
        .run(move |s| handlers::detach_skill(&s.persistence, &actor, employee_id, skill_id))
        .await?;
    Ok(Json(response))
}

async fn handle_list_documents(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Path(employee_id): Path<i64>,
) -> Result<Json<Vec<DocumentData>>, HttpError> {
    let documents: Vec<DocumentData> = app_state
        .run(move |s| handlers::list_documents(&s.persistence, &actor, employee_id))
        .await?;
    Ok(Json(documents))
}

async fn handle_upload_document(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Path(employee_id): Path<i64>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<DocumentData>), HttpError> {
    let gate: AuthenticatedEmployee = actor.clone();
    app_state
        .run(move |s| handlers::authorize_document_upload(&s.persistence, &gate, employee_id))
        .await?;

    let form: UploadForm = uploads::read_form(multipart).await?;
    let accepted: AcceptedUpload = uploads::validate(
        UploadKind::Document,
        form.file_name.as_deref(),
        form.content_type.as_deref(),
        form.data,
        app_state.config.max_upload_bytes,
    )?;
    let relative: String = uploads::store(
        &app_state.config.upload_dir,
        UploadKind::Document,
        employee_id,
        &accepted,
    )
    .await?;

    let document: NewDocument = NewDocument {
        employee_id,
        title: form.title.unwrap_or_default(),
        file_path: relative.clone(),
        content_type: accepted.content_type.to_string(),
        size_bytes: i64::try_from(accepted.data.len()).unwrap_or(i64::MAX),
        uploaded_by: actor.id(),
    };
    match app_state
        .run(move |s| handlers::record_document(&s.persistence, &actor, &document))
        .await
    {
        Ok(stored) => Ok((StatusCode::CREATED, Json(stored))),
        Err(e) => {
            uploads::discard(&app_state.config.upload_dir, &relative).await;
            Err(e)
        }
    }
}

async fn handle_upload_profile_image(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    multipart: Multipart,
) -> Result<Json<EmployeeData>, HttpError> {
    let form: UploadForm = uploads::read_form(multipart).await?;
    let accepted: AcceptedUpload = uploads::validate(
        UploadKind::ProfileImage,
        form.file_name.as_deref(),
        form.content_type.as_deref(),
        form.data,
        app_state.config.max_upload_bytes,
    )?;
    let relative: String = uploads::store(
        &app_state.config.upload_dir,
        UploadKind::ProfileImage,
        actor.id(),
        &accepted,
    )
    .await?;

    let path: String = relative.clone();
    match app_state
        .run(move |s| handlers::set_profile_image(&s.persistence, &actor, &path))
        .await
    {
        Ok(change) => {
            if let Some(replaced) = change.replaced {
                uploads::discard(&app_state.config.upload_dir, &replaced).await;
            }
            Ok(Json(change.employee))
        }
        Err(e) => {
            uploads::discard(&app_state.config.upload_dir, &relative).await;
            Err(e)
        }
    }
}

async fn handle_list_leave_balances(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Path(employee_id): Path<i64>,
    Query(query): Query<LeaveBalancesQuery>,
) -> Result<Json<Vec<LeaveBalanceData>>, HttpError> {
    let balances: Vec<LeaveBalanceData> = app_state
        .run(move |s| {
            handlers::list_leave_balances(&s.persistence, &actor, employee_id, query, s.today()?)
        })
        .await?;
    Ok(Json(balances))
}

async fn handle_set_leave_allotment(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Path(employee_id): Path<i64>,
    Json(req): Json<SetAllotmentRequest>,
) -> Result<Json<LeaveBalanceData>, HttpError> {
    let balance: LeaveBalanceData = app_state
        .run(move |s| {
            handlers::set_leave_allotment(&s.persistence, &actor, employee_id, req, s.today()?)
        })
        .await?;
    Ok(Json(balance))
}

async fn handle_list_employee_attendance(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Path(employee_id): Path<i64>,
    Query(query): Query<AttendanceQuery>,
) -> Result<Json<Vec<AttendanceData>>, HttpError> {
    let rows: Vec<AttendanceData> = app_state
        .run(move |s| {
            handlers::list_employee_attendance(&s.persistence, &actor, employee_id, &query)
        })
        .await?;
    Ok(Json(rows))
}

// ============================================================================
// Attendance
// ============================================================================

async fn handle_check_in(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
) -> Result<Json<AttendanceData>, HttpError> {
    let row: AttendanceData = app_state
        .run(move |s| {
            handlers::check_in(&s.persistence, &actor, &s.config.policy, OffsetDateTime::now_utc())
        })
        .await?;
    Ok(Json(row))
}

async fn handle_check_out(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
) -> Result<Json<AttendanceData>, HttpError> {
    let row: AttendanceData = app_state
        .run(move |s| {
            handlers::check_out(&s.persistence, &actor, &s.config.policy, OffsetDateTime::now_utc())
        })
        .await?;
    Ok(Json(row))
}

async fn handle_my_attendance(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Query(query): Query<AttendanceQuery>,
) -> Result<Json<Vec<AttendanceData>>, HttpError> {
    let rows: Vec<AttendanceData> = app_state
        .run(move |s| handlers::my_attendance(&s.persistence, &actor, &query))
        .await?;
    Ok(Json(rows))
}

async fn handle_mark_absent(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Json(req): Json<MarkAbsentRequest>,
) -> Result<(StatusCode, Json<AttendanceData>), HttpError> {
    let row: AttendanceData = app_state
        .run(move |s| handlers::mark_absent(&s.persistence, &actor, &req))
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

async fn handle_update_attendance(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Path(attendance_id): Path<i64>,
    Json(req): Json<UpdateAttendanceRequest>,
) -> Result<Json<AttendanceData>, HttpError> {
    let row: AttendanceData = app_state
        .run(move |s| handlers::update_attendance(&s.persistence, &actor, attendance_id, &req))
        .await?;
    Ok(Json(row))
}

// ============================================================================
// Leave
// ============================================================================

async fn handle_submit_leave(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Json(req): Json<SubmitLeaveRequest>,
) -> Result<(StatusCode, Json<LeaveSubmissionResult>), HttpError> {
    let result: LeaveSubmissionResult = app_state
        .run(move |s| handlers::submit_leave(&s.persistence, &actor, &req))
        .await?;
    Ok((StatusCode::CREATED, Json(result)))
}

async fn handle_my_leave_requests(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Query(query): Query<LeaveListQuery>,
) -> Result<Json<Page<LeaveRequestData>>, HttpError> {
    let page: Page<LeaveRequestData> = app_state
        .run(move |s| handlers::my_leave_requests(&s.persistence, &actor, &query))
        .await?;
    Ok(Json(page))
}

async fn handle_pending_leave_requests(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
) -> Result<Json<Vec<LeaveRequestData>>, HttpError> {
    let requests: Vec<LeaveRequestData> = app_state
        .run(move |s| handlers::pending_leave_requests(&s.persistence, &actor))
        .await?;
    Ok(Json(requests))
}

async fn handle_get_leave_request(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Path(request_id): Path<i64>,
) -> Result<Json<LeaveRequestData>, HttpError> {
    let request: LeaveRequestData = app_state
        .run(move |s| handlers::get_leave_request(&s.persistence, &actor, request_id))
        .await?;
    Ok(Json(request))
}

async fn handle_cancel_leave_request(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Path(request_id): Path<i64>,
) -> Result<Json<LeaveRequestData>, HttpError> {
    let request: LeaveRequestData = app_state
        .run(move |s| handlers::cancel_leave_request(&s.persistence, &actor, request_id))
        .await?;
    Ok(Json(request))
}

async fn handle_process_leave_request(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Path(request_id): Path<i64>,
    Json(req): Json<ProcessLeaveRequest>,
) -> Result<Json<LeaveRequestData>, HttpError> {
    let request: LeaveRequestData = app_state
        .run(move |s| handlers::process_leave_request(&s.persistence, &actor, request_id, &req))
        .await?;
    Ok(Json(request))
}

// ============================================================================
// Notifications
// ============================================================================

async fn handle_list_notifications(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Query(query): Query<NotificationQuery>,
) -> Result<Json<NotificationPage>, HttpError> {
    let page: NotificationPage = app_state
        .run(move |s| handlers::list_notifications(&s.persistence, &actor, query))
        .await?;
    Ok(Json(page))
}

async fn handle_mark_notification_read(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Path(notification_id): Path<i64>,
) -> Result<Json<UnreadCountResponse>, HttpError> {
    let unread: UnreadCountResponse = app_state
        .run(move |s| handlers::mark_notification_read(&s.persistence, &actor, notification_id))
        .await?;
    Ok(Json(unread))
}

async fn handle_mark_all_notifications_read(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
) -> Result<Json<UnreadCountResponse>, HttpError> {
    let unread: UnreadCountResponse = app_state
        .run(move |s| handlers::mark_all_notifications_read(&s.persistence, &actor))
        .await?;
    Ok(Json(unread))
}

async fn handle_delete_notification(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Path(notification_id): Path<i64>,
) -> Result<Json<UnreadCountResponse>, HttpError> {
    let unread: UnreadCountResponse = app_state
        .run(move |s| handlers::delete_notification(&s.persistence, &actor, notification_id))
        .await?;
    Ok(Json(unread))
}

// ============================================================================
// Projects
// ============================================================================

async fn handle_list_projects(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Query(query): Query<ProjectQuery>,
) -> Result<Json<Vec<ProjectData>>, HttpError> {
    let projects: Vec<ProjectData> = app_state
        .run(move |s| handlers::list_projects(&s.persistence, &actor, query))
        .await?;
    Ok(Json(projects))
}

async fn handle_create_project(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Json(req): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectData>), HttpError> {
    let project: ProjectData = app_state
        .run(move |s| handlers::create_project(&s.persistence, &actor, &req))
        .await?;
    Ok((StatusCode::CREATED, Json(project)))
}

async fn handle_get_project(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(_): SessionEmployee,
    Path(project_id): Path<i64>,
) -> Result<Json<ProjectDetail>, HttpError> {
    let detail: ProjectDetail = app_state
        .run(move |s| handlers::get_project(&s.persistence, project_id))
        .await?;
    Ok(Json(detail))
}

async fn handle_update_project(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Path(project_id): Path<i64>,
    Json(req): Json<UpdateProjectRequest>,
) -> Result<Json<ProjectData>, HttpError> {
    let project: ProjectData = app_state
        .run(move |s| handlers::update_project(&s.persistence, &actor, project_id, &req))
        .await?;
    Ok(Json(project))
}

async fn handle_assign_employee(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Path(project_id): Path<i64>,
    Json(req): Json<AssignEmployeeRequest>,
) -> Result<(StatusCode, Json<AssignmentData>), HttpError> {
    let assignment: AssignmentData = app_state
        .run(move |s| handlers::assign_employee(&s.persistence, &actor, project_id, &req))
        .await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

async fn handle_remove_assignment(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Path((project_id, employee_id)): Path<(i64, i64)>,
) -> Result<Json<MessageResponse>, HttpError> {
    let response: MessageResponse = app_state
        .run(move |s| handlers::remove_assignment(&s.persistence, &actor, project_id, employee_id))
        .await?;
    Ok(Json(response))
}

// ============================================================================
// Reference data
// ============================================================================

async fn handle_list_catalog(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(_): SessionEmployee,
    Path(kind): Path<String>,
) -> Result<Json<Vec<CatalogEntry>>, HttpError> {
    let entries: Vec<CatalogEntry> = app_state
        .run(move |s| handlers::list_catalog(&s.persistence, &kind))
        .await?;
    Ok(Json(entries))
}

async fn handle_create_catalog_entry(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Path(kind): Path<String>,
    Json(req): Json<CatalogEntryRequest>,
) -> Result<(StatusCode, Json<CatalogEntry>), HttpError> {
    let entry: CatalogEntry = app_state
        .run(move |s| handlers::create_catalog_entry(&s.persistence, &actor, &kind, &req))
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn handle_update_catalog_entry(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Path((kind, entry_id)): Path<(String, i64)>,
    Json(req): Json<UpdateCatalogEntryRequest>,
) -> Result<Json<CatalogEntry>, HttpError> {
    let entry: CatalogEntry = app_state
        .run(move |s| {
            handlers::update_catalog_entry(&s.persistence, &actor, &kind, entry_id, &req)
        })
        .await?;
    Ok(Json(entry))
}

async fn handle_list_leave_types(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(_): SessionEmployee,
) -> Result<Json<Vec<LeaveTypeData>>, HttpError> {
    let types: Vec<LeaveTypeData> = app_state
        .run(move |s| handlers::list_leave_types(&s.persistence))
        .await?;
    Ok(Json(types))
}

async fn handle_create_leave_type(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Json(req): Json<LeaveTypeRequest>,
) -> Result<(StatusCode, Json<LeaveTypeData>), HttpError> {
    let leave_type: LeaveTypeData = app_state
        .run(move |s| handlers::create_leave_type(&s.persistence, &actor, &req))
        .await?;
    Ok((StatusCode::CREATED, Json(leave_type)))
}

async fn handle_update_leave_type(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Path(leave_type_id): Path<i64>,
    Json(req): Json<UpdateLeaveTypeRequest>,
) -> Result<Json<LeaveTypeData>, HttpError> {
    let leave_type: LeaveTypeData = app_state
        .run(move |s| handlers::update_leave_type(&s.persistence, &actor, leave_type_id, &req))
        .await?;
    Ok(Json(leave_type))
}

// ============================================================================
// Logs and dashboards
// ============================================================================

async fn handle_list_logs(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
    Query(query): Query<LogQuery>,
) -> Result<Json<Page<LogData>>, HttpError> {
    let page: Page<LogData> = app_state
        .run(move |s| handlers::list_logs(&s.persistence, &actor, &query))
        .await?;
    Ok(Json(page))
}

async fn handle_employee_dashboard(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
) -> Result<Json<EmployeeDashboard>, HttpError> {
    let dashboard: EmployeeDashboard = app_state
        .run(move |s| handlers::employee_dashboard(&s.persistence, &actor, s.today()?))
        .await?;
    Ok(Json(dashboard))
}

async fn handle_supervisor_dashboard(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor): SessionEmployee,
) -> Result<Json<SupervisorDashboard>, HttpError> {
    let dashboard: SupervisorDashboard = app_state
        .run(move |s| handlers::supervisor_dashboard(&s.persistence, &actor, s.today()?))
        .await?;
    Ok(Json(dashboard))
}

/// Builds the application router with all routes.
fn build_router(app_state: AppState) -> Router {
    let body_limit: usize = app_state
        .config
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    let uploads: ServeDir = ServeDir::new(&app_state.config.upload_dir);

    Router::new()
        .route("/health", get(handle_health))
        // Auth
        .route("/auth/login", post(handle_login))
        .route("/auth/password-reset/request", post(handle_password_reset_request))
        .route("/auth/password-reset/confirm", post(handle_password_reset_confirm))
        .route("/auth/change-password", post(handle_change_password))
        .route("/auth/me", get(handle_whoami))
        .route("/auth/register", post(handle_register))
        // Employees
        .route("/employees", get(handle_list_employees))
        .route("/employees/me", patch(handle_update_own_profile))
        .route("/employees/me/profile-image", post(handle_upload_profile_image))
        .route(
            "/employees/{id}",
            get(handle_get_employee).patch(handle_update_employee),
        )
        .route("/employees/{id}/status", patch(handle_set_employee_status))
        .route(
            "/employees/{id}/salary-history",
            get(handle_list_salary_history).post(handle_add_salary_record),
        )
        .route(
            "/employees/{id}/skills",
            get(handle_list_skills).post(handle_attach_skill),
        )
        .route(
            "/employees/{id}/skills/{skill_id}/verify",
            patch(handle_verify_skill),
        )
        .route("/employees/{id}/skills/{skill_id}", delete(handle_detach_skill))
        .route(
            "/employees/{id}/documents",
            get(handle_list_documents).post(handle_upload_document),
        )
        .route(
            "/employees/{id}/leave-balances",
            get(handle_list_leave_balances).put(handle_set_leave_allotment),
        )
        .route("/employees/{id}/attendance", get(handle_list_employee_attendance))
        // Attendance
        .route("/attendance/check-in", post(handle_check_in))
        .route("/attendance/check-out", post(handle_check_out))
        .route("/attendance/me", get(handle_my_attendance))
        .route("/attendance/absent", post(handle_mark_absent))
        .route("/attendance/{id}", patch(handle_update_attendance))
        // Leave
        .route("/leaves", post(handle_submit_leave))
        .route("/leaves/me", get(handle_my_leave_requests))
        .route("/leaves/pending", get(handle_pending_leave_requests))
        .route("/leaves/{id}", get(handle_get_leave_request))
        .route("/leaves/{id}/cancel", patch(handle_cancel_leave_request))
        .route("/leaves/{id}/process", patch(handle_process_leave_request))
        // Notifications
        .route("/notifications", get(handle_list_notifications))
        .route("/notifications/read-all", patch(handle_mark_all_notifications_read))
        .route("/notifications/{id}/read", patch(handle_mark_notification_read))
        .route("/notifications/{id}", delete(handle_delete_notification))
        // Projects
        .route(
            "/projects",
            get(handle_list_projects).post(handle_create_project),
        )
        .route(
            "/projects/{id}",
            get(handle_get_project).patch(handle_update_project),
        )
        .route("/projects/{id}/assignments", post(handle_assign_employee))
        .route(
            "/projects/{id}/assignments/{employee_id}",
            delete(handle_remove_assignment),
        )
        // Reference data
        .route(
            "/catalog/{kind}",
            get(handle_list_catalog).post(handle_create_catalog_entry),
        )
        .route("/catalog/{kind}/{id}", patch(handle_update_catalog_entry))
        .route(
            "/leave-types",
            get(handle_list_leave_types).post(handle_create_leave_type),
        )
        .route("/leave-types/{id}", patch(handle_update_leave_type))
        // Logs and dashboards
        .route("/logs", get(handle_list_logs))
        .route("/dashboard/employee", get(handle_employee_dashboard))
        .route("/dashboard/supervisor", get(handle_supervisor_dashboard))
        .nest_service("/uploads", uploads)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing hrdesk server");
    let config: ServerConfig = ServerConfig::from_args(args)?;

    let persistence: Persistence = if let Some(db_path) = &config.database {
        info!(path = %db_path.display(), "Using file-based database");
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };
    persistence.verify_foreign_key_enforcement()?;

    bootstrap::ensure_administrator(&persistence, config.admin.as_ref())?;
    if config.init_only {
        info!("Initialization complete");
        return Ok(());
    }

    let listen: std::net::SocketAddr = config.listen;
    let app: Router = build_router(AppState::new(persistence, config)?);

    info!(%listen, "Server listening");
    let listener: tokio::net::TcpListener = tokio::net::TcpListener::bind(listen).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
