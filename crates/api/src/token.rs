// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Signed bearer tokens.
//!
//! Session tokens and password-reset tokens are HS256 JWTs signed with the
//! same server key. The `scope` claim keeps one from being accepted where
//! the other is expected.

use hrdesk_persistence::EmployeeData;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{Duration, OffsetDateTime};

/// Minimum signing key length in bytes.
pub const MIN_SECRET_BYTES: usize = 32;

/// Lifetime of a session token.
pub const SESSION_TTL: Duration = Duration::hours(12);

/// Lifetime of a password-reset token.
pub const RESET_TTL: Duration = Duration::hours(1);

/// What a token may be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenScope {
    Session,
    PasswordReset,
}

impl TokenScope {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Session => "session",
            Self::PasswordReset => "password_reset",
        }
    }
}

/// Claims carried by a session token.
///
/// The identity fields are informational. Authorization always re-reads
/// the employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Numeric employee ID.
    pub sub: String,
    pub employee_code: String,
    pub is_supervisor: bool,
    pub email: String,
    pub name: String,
    pub role_id: i64,
    pub department_id: Option<i64>,
    pub scope: TokenScope,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    /// Parses the subject back into an employee ID.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Invalid` if the subject is not numeric.
    pub fn employee_id(&self) -> Result<i64, TokenError> {
        self.sub
            .parse()
            .map_err(|_| TokenError::Invalid(format!("subject '{}' is not an employee id", self.sub)))
    }
}

/// Claims carried by a password-reset token. The subject is the email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetClaims {
    pub sub: String,
    pub scope: TokenScope,
    pub iat: i64,
    pub exp: i64,
}

/// Token errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("signing key must be at least {min} bytes, got {actual}")]
    WeakSecret { min: usize, actual: usize },

    #[error("token has expired")]
    Expired,

    #[error("token is invalid: {0}")]
    Invalid(String),

    #[error("token was issued for {found}, expected {expected}")]
    WrongScope {
        expected: &'static str,
        found: &'static str,
    },

    #[error("failed to sign token: {0}")]
    Encoding(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Invalid(err.to_string()),
        }
    }
}

/// Issues and verifies signed tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_ttl: Duration,
    reset_ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("session_ttl", &self.session_ttl)
            .field("reset_ttl", &self.reset_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Creates a token service with the standard lifetimes.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::WeakSecret` if the key is shorter than
    /// [`MIN_SECRET_BYTES`].
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        Self::with_lifetimes(secret, SESSION_TTL, RESET_TTL)
    }

    /// Creates a token service with explicit lifetimes.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::WeakSecret` if the key is shorter than
    /// [`MIN_SECRET_BYTES`].
    pub fn with_lifetimes(
        secret: &[u8],
        session_ttl: Duration,
        reset_ttl: Duration,
    ) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_BYTES {
            return Err(TokenError::WeakSecret {
                min: MIN_SECRET_BYTES,
                actual: secret.len(),
            });
        }
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            session_ttl,
            reset_ttl,
        })
    }

    /// Issues a session token for an employee.
    ///
    /// Returns the token and its expiry as a unix timestamp.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encoding` if signing fails.
    pub fn issue_session(&self, employee: &EmployeeData) -> Result<(String, i64), TokenError> {
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let claims: SessionClaims = SessionClaims {
            sub: employee.id.to_string(),
            employee_code: employee.employee_code.clone(),
            is_supervisor: employee.is_supervisor,
            email: employee.email.clone(),
            name: employee.name.clone(),
            role_id: employee.role_id,
            department_id: employee.department_id,
            scope: TokenScope::Session,
            iat: now.unix_timestamp(),
            exp: (now + self.session_ttl).unix_timestamp(),
        };
        let token: String = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;
        Ok((token, claims.exp))
    }

    /// Issues a password-reset token whose subject is `email`.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encoding` if signing fails.
    pub fn issue_password_reset(&self, email: &str) -> Result<String, TokenError> {
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let claims: ResetClaims = ResetClaims {
            sub: email.trim().to_string(),
            scope: TokenScope::PasswordReset,
            iat: now.unix_timestamp(),
            exp: (now + self.reset_ttl).unix_timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verifies a session token.
    ///
    /// # Errors
    ///
    /// Returns an error if the signature, expiry or scope is wrong.
    pub fn verify_session(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let claims: SessionClaims =
            decode::<SessionClaims>(token, &self.decoding_key, &Self::validation())?.claims;
        Self::expect_scope(TokenScope::Session, claims.scope)?;
        Ok(claims)
    }

    /// Verifies a password-reset token.
    ///
    /// # Errors
    ///
    /// Returns an error if the signature, expiry or scope is wrong.
    pub fn verify_password_reset(&self, token: &str) -> Result<ResetClaims, TokenError> {
        let claims: ResetClaims =
            decode::<ResetClaims>(token, &self.decoding_key, &Self::validation())?.claims;
        Self::expect_scope(TokenScope::PasswordReset, claims.scope)?;
        Ok(claims)
    }

    fn validation() -> Validation {
        let mut validation: Validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation
    }

    const fn expect_scope(expected: TokenScope, found: TokenScope) -> Result<(), TokenError> {
        match (expected, found) {
            (TokenScope::Session, TokenScope::Session)
            | (TokenScope::PasswordReset, TokenScope::PasswordReset) => Ok(()),
            _ => Err(TokenError::WrongScope {
                expected: expected.as_str(),
                found: found.as_str(),
            }),
        }
    }
}
