// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.
//!
//! Lower layers raise `DomainError`, `CoreError` and `PersistenceError`.
//! Each is translated here, explicitly, into an `ApiError` that the HTTP
//! surface maps onto a status code.

use crate::password_policy::PasswordPolicyError;
use crate::token::TokenError;
use hrdesk::CoreError;
use hrdesk_domain::DomainError;
use hrdesk_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role or relationship required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request conflicts with existing state.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A signed token was malformed, expired, or issued for another purpose.
    InvalidToken {
        /// Why the token was rejected.
        reason: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
    /// Password policy violation.
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role}")
            }
            Self::DomainRuleViolation { message, .. }
            | Self::ResourceNotFound { message, .. }
            | Self::Conflict { message } => write!(f, "{message}"),
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::InvalidToken { reason } => write!(f, "Invalid or expired token: {reason}"),
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::WeakSecret { .. } | TokenError::Encoding(_) => Self::Internal {
                message: err.to_string(),
            },
            TokenError::Expired | TokenError::Invalid(_) | TokenError::WrongScope { .. } => {
                Self::InvalidToken {
                    reason: err.to_string(),
                }
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}

fn invalid_input(field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message,
    }
}

fn rule_violation(rule: &str, message: String) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: rule.to_string(),
        message,
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidDateRange { .. } => invalid_input("end_date", message),
        DomainError::DateParseError { .. } | DomainError::DateArithmeticOverflow { .. } => {
            invalid_input("date", message)
        }
        DomainError::InvalidTimestamp(_) => invalid_input("timestamp", message),
        DomainError::InvalidSalaryAmount(_) => invalid_input("amount", message),
        DomainError::InsufficientBalance { .. } => rule_violation("sufficient_balance", message),
        DomainError::AllotmentBelowUsage { .. } => {
            rule_violation("allotment_covers_usage", message)
        }
        DomainError::InvalidDayCount(_) => invalid_input("days", message),
        DomainError::InvalidName(_) | DomainError::InvalidCatalogName(_) => {
            invalid_input("name", message)
        }
        DomainError::InvalidEmail(_) => invalid_input("email", message),
        DomainError::InvalidEmployeeCode(_) => invalid_input("employee_code", message),
        DomainError::InvalidLeaveStatus(_)
        | DomainError::InvalidLeaveDecision(_)
        | DomainError::InvalidAttendanceStatus(_)
        | DomainError::InvalidProjectStatus(_) => invalid_input("status", message),
        DomainError::InvalidProficiency(_) => invalid_input("proficiency", message),
        DomainError::InvalidTimezone(_) => invalid_input("timezone", message),
        DomainError::InvalidTime(_) => invalid_input("time", message),
        DomainError::ReportingCycle { .. } => rule_violation("reporting_cycle", message),
    }
}

/// Translates a core error into an API error.
///
/// Scope and ownership failures become 403s; workflow rule failures stay
/// client errors.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    let message: String = err.to_string();
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::NoBalanceRecord { .. } => rule_violation("balance_exists", message),
        CoreError::OverlappingRequest { .. } => rule_violation("no_overlap", message),
        CoreError::InvalidTransition { .. } => rule_violation("pending_only", message),
        CoreError::NotOwner => ApiError::Unauthorized {
            action: message,
            required_role: String::from("ownership"),
        },
        CoreError::OutOfScope => ApiError::Unauthorized {
            action: message,
            required_role: String::from("supervisory scope"),
        },
        CoreError::SalaryChangeForbidden(_) => ApiError::Unauthorized {
            action: message,
            required_role: String::from("a more senior role in the same department"),
        },
        CoreError::SelfAction(_) => ApiError::Unauthorized {
            action: message,
            required_role: String::from("another supervisor"),
        },
        CoreError::RoleRequired(role) => ApiError::Unauthorized {
            action: String::from("this action"),
            required_role: role.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Storage faults collapse into `Internal`; everything that describes a
/// rejected request keeps its meaning.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: resource_type_of(&message),
            message,
        },
        PersistenceError::Conflict(message) | PersistenceError::UniqueViolation(message) => {
            ApiError::Conflict { message }
        }
        PersistenceError::InvalidState(message) => rule_violation("record_state", message),
        PersistenceError::InvalidReference { field } => invalid_input(
            field,
            String::from("referenced record does not exist"),
        ),
        PersistenceError::ForeignKeyViolation(message) => invalid_input("reference", message),
        PersistenceError::RuleViolation(core_err) => translate_core_error(core_err),
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

/// Extracts the leading resource name of a "<Resource> <id> not found" message.
fn resource_type_of(message: &str) -> String {
    let words: Vec<&str> = message
        .split_whitespace()
        .take_while(|word| !word.chars().all(|c| c.is_ascii_digit()) && *word != "not")
        .collect();
    if words.is_empty() {
        String::from("Resource")
    } else {
        words.join(" ")
    }
}
