// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication services.
//!
//! Tokens only prove who signed in. Every request re-loads the employee so
//! that deactivation and role, department or supervisor changes apply
//! immediately, regardless of what the token claims.

use hrdesk_audit::Actor;
use hrdesk_domain::EmployeeProfile;
use hrdesk_persistence::{CredentialData, EmployeeData, Persistence};
use tracing::{debug, info, warn};

use crate::error::{ApiError, AuthError};
use crate::password_policy::PasswordPolicy;
use crate::token::{ResetClaims, SessionClaims, TokenError, TokenService};

/// The one message for every failed login, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// An employee whose session token was verified and whose record was
/// re-loaded for this request.
#[derive(Debug, Clone)]
pub struct AuthenticatedEmployee {
    /// The freshly loaded employee record.
    pub employee: EmployeeData,
}

impl AuthenticatedEmployee {
    /// Wraps a freshly loaded employee record.
    #[must_use]
    pub const fn new(employee: EmployeeData) -> Self {
        Self { employee }
    }

    /// The employee's ID.
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.employee.id
    }

    /// The authorization-relevant facts about this employee.
    #[must_use]
    pub const fn profile(&self) -> EmployeeProfile {
        self.employee.profile()
    }

    /// Converts this employee into an audit actor.
    #[must_use]
    pub const fn to_audit_actor(&self) -> Actor {
        Actor::employee(self.employee.id)
    }
}

/// A successful login.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    /// The signed session token.
    pub token: String,
    /// Expiry as a unix timestamp.
    pub expires_at: i64,
    /// The signed-in employee.
    pub employee: EmployeeData,
}

/// Authentication service for credential checks and token handling.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Authenticates an employee by email and password.
    ///
    /// The email must match exactly. Unknown emails, inactive accounts and
    /// wrong passwords all fail with [`INVALID_CREDENTIALS`].
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `tokens` - The token service
    /// * `email` - The login email
    /// * `password` - The plain-text password
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` for bad credentials, or `Internal`
    /// if storage or signing fails.
    pub fn authenticate(
        persistence: &Persistence,
        tokens: &TokenService,
        email: &str,
        password: &str,
    ) -> Result<IssuedSession, ApiError> {
        let credentials: Option<CredentialData> = persistence.find_credentials_by_email(email)?;
        let Some(credentials) = credentials.filter(|c| c.is_active) else {
            warn!("Login rejected: unknown or inactive account");
            return Err(invalid_credentials());
        };

        if !persistence.verify_password(password, &credentials.password_hash)? {
            warn!(employee_id = credentials.employee_id, "Login rejected: wrong password");
            return Err(invalid_credentials());
        }

        let employee: EmployeeData = persistence
            .find_employee(credentials.employee_id)?
            .ok_or_else(invalid_credentials)?;
        let (token, expires_at): (String, i64) = tokens.issue_session(&employee)?;

        info!(employee_id = employee.id, code = %employee.employee_code, "Employee logged in");
        Ok(IssuedSession {
            token,
            expires_at,
            employee,
        })
    }

    /// Verifies a session token and re-loads the employee it names.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` if the token is invalid, expired or
    /// not a session token, or if the employee is missing or inactive.
    pub fn validate_token(
        persistence: &Persistence,
        tokens: &TokenService,
        token: &str,
    ) -> Result<AuthenticatedEmployee, ApiError> {
        let claims: SessionClaims = tokens.verify_session(token).map_err(session_rejected)?;
        let employee_id: i64 = claims.employee_id().map_err(session_rejected)?;

        let employee: EmployeeData = persistence
            .find_employee(employee_id)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Employee not found"),
            })?;
        if !employee.is_active {
            warn!(employee_id, "Rejected token of inactive employee");
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Account is inactive"),
            }
            .into());
        }

        debug!(employee_id, "Session validated");
        Ok(AuthenticatedEmployee::new(employee))
    }

    /// Issues a password-reset token for `email`.
    ///
    /// A token is issued whether or not the email belongs to anyone, so the
    /// response does not reveal which addresses are registered.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if signing fails.
    pub fn issue_password_reset_token(
        tokens: &TokenService,
        email: &str,
    ) -> Result<String, ApiError> {
        let token: String = tokens.issue_password_reset(email)?;
        info!(email = %email.trim(), "Password reset token issued");
        Ok(token)
    }

    /// Consumes a password-reset token and sets a new password.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `tokens` - The token service
    /// * `token` - The reset token
    /// * `new_password` - The new password
    /// * `confirmation` - The new password, repeated
    ///
    /// # Errors
    ///
    /// Returns `InvalidToken` if the token is bad or names no active
    /// employee, or `PasswordPolicyViolation` if the password is rejected.
    pub fn consume_reset_token(
        persistence: &Persistence,
        tokens: &TokenService,
        token: &str,
        new_password: &str,
        confirmation: &str,
    ) -> Result<(), ApiError> {
        let claims: ResetClaims = tokens.verify_password_reset(token)?;
        let unknown_subject = || ApiError::InvalidToken {
            reason: String::from("token does not name an active account"),
        };

        let credentials: CredentialData = persistence
            .find_credentials_by_email(&claims.sub)?
            .filter(|c| c.is_active)
            .ok_or_else(unknown_subject)?;
        let employee: EmployeeData = persistence
            .find_employee(credentials.employee_id)?
            .ok_or_else(unknown_subject)?;

        PasswordPolicy::default().validate_with_confirmation(
            new_password,
            confirmation,
            &employee.email,
            &employee.name,
        )?;
        persistence.set_password(employee.id, new_password)?;

        info!(employee_id = employee.id, "Password reset completed");
        Ok(())
    }

    /// Changes the actor's own password.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` if the current password is wrong, or
    /// `PasswordPolicyViolation` if the new password is rejected.
    pub fn change_password(
        persistence: &Persistence,
        actor: &AuthenticatedEmployee,
        current_password: &str,
        new_password: &str,
        confirmation: &str,
    ) -> Result<(), ApiError> {
        let credentials: CredentialData = persistence
            .find_credentials_by_id(actor.id())?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Employee not found"),
            })?;

        if !persistence.verify_password(current_password, &credentials.password_hash)? {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Current password is incorrect"),
            }
            .into());
        }

        PasswordPolicy::default().validate_with_confirmation(
            new_password,
            confirmation,
            &actor.employee.email,
            &actor.employee.name,
        )?;
        persistence.set_password(actor.id(), new_password)?;

        info!(employee_id = actor.id(), "Password changed");
        Ok(())
    }
}

fn invalid_credentials() -> ApiError {
    AuthError::AuthenticationFailed {
        reason: String::from(INVALID_CREDENTIALS),
    }
    .into()
}

fn session_rejected(err: TokenError) -> ApiError {
    debug!(error = %err, "Session token rejected");
    AuthError::AuthenticationFailed {
        reason: err.to_string(),
    }
    .into()
}
