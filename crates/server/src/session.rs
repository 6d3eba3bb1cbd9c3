// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction for authenticated routes.
//!
//! This module provides the Axum extractor that validates bearer tokens
//! and re-loads the employee they name at the server boundary.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use hrdesk_api::{ApiError, AuthenticatedEmployee, AuthenticationService};
use tracing::{debug, error, warn};

use crate::{AppState, ErrorResponse};

/// Extractor for authenticated employees.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     SessionEmployee(actor): SessionEmployee,
/// ) -> Result<Json<Response>, HttpError> {
///     // actor: AuthenticatedEmployee
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Authentication Flow
///
/// 1. Extract `Authorization: Bearer <token>` header
/// 2. Verify the token signature, scope and expiry
/// 3. Re-load the employee and reject inactive accounts
///
/// # Errors
///
/// Returns HTTP 401 Unauthorized if the header is missing or malformed,
/// or if the token or the employee behind it is rejected.
pub struct SessionEmployee(pub AuthenticatedEmployee);

impl FromRequestParts<AppState> for SessionEmployee {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header: &str = parts
            .headers
            .get("Authorization")
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                SessionError::MissingAuthorizationHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid Authorization header encoding");
                SessionError::InvalidAuthorizationHeader
            })?;

        let token: String = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| {
                warn!("Authorization header does not start with 'Bearer '");
                SessionError::InvalidAuthorizationHeader
            })?
            .to_string();

        let state: AppState = state.clone();
        let validated: Result<AuthenticatedEmployee, ApiError> =
            tokio::task::spawn_blocking(move || {
                AuthenticationService::validate_token(&state.persistence, &state.tokens, &token)
            })
            .await
            .map_err(|e| {
                error!(error = %e, "Session validation task failed");
                SessionError::Unavailable
            })?;

        match validated {
            Ok(employee) => {
                debug!(employee_id = employee.id(), role = %employee.employee.role, "Session accepted");
                Ok(Self(employee))
            }
            Err(ApiError::Internal { message }) => {
                error!(error = %message, "Session validation failed");
                Err(SessionError::Unavailable)
            }
            Err(e) => {
                warn!(error = %e, "Session rejected");
                Err(SessionError::InvalidSession(e.to_string()))
            }
        }
    }
}

/// Session extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// Authorization header is missing.
    MissingAuthorizationHeader,
    /// Authorization header format is invalid.
    InvalidAuthorizationHeader,
    /// The token or its employee was rejected.
    InvalidSession(String),
    /// The session could not be checked.
    Unavailable,
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let (status, message): (StatusCode, String) = match self {
            Self::MissingAuthorizationHeader => (
                StatusCode::UNAUTHORIZED,
                String::from("Missing Authorization header"),
            ),
            Self::InvalidAuthorizationHeader => (
                StatusCode::UNAUTHORIZED,
                String::from("Invalid Authorization header format. Expected: 'Bearer <token>'"),
            ),
            Self::InvalidSession(reason) => (StatusCode::UNAUTHORIZED, reason),
            Self::Unavailable => (
                StatusCode::INTERNAL_SERVER_ERROR,
                String::from("Internal server error"),
            ),
        };

        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message,
            detail: None,
        });
        (status, body).into_response()
    }
}
