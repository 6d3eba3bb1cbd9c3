// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::result::DatabaseErrorKind;
use hrdesk::CoreError;
use hrdesk_domain::DomainError;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// No pooled connection could be checked out.
    PoolError(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested resource was not found.
    NotFound(String),
    /// A unique constraint rejected the write.
    UniqueViolation(String),
    /// A foreign key constraint rejected the write.
    ForeignKeyViolation(String),
    /// A referenced record does not exist. Names the offending input field.
    InvalidReference {
        /// The request field holding the bad reference.
        field: &'static str,
    },
    /// The write conflicts with existing state (duplicate, already done).
    Conflict(String),
    /// The record is in a state that does not allow the operation.
    InvalidState(String),
    /// A business rule rejected the operation. The transaction was rolled back.
    RuleViolation(CoreError),
    /// Password hashing failed.
    PasswordHashFailed(String),
    /// Database backup failed.
    BackupFailed(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::PoolError(msg) => write!(f, "Connection pool error: {msg}"),
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::UniqueViolation(msg) => write!(f, "Duplicate record: {msg}"),
            Self::ForeignKeyViolation(msg) => write!(f, "Invalid reference: {msg}"),
            Self::InvalidReference { field } => {
                write!(f, "Invalid {field}: referenced record does not exist")
            }
            Self::Conflict(msg) | Self::InvalidState(msg) => write!(f, "{msg}"),
            Self::RuleViolation(err) => write!(f, "{err}"),
            Self::PasswordHashFailed(msg) => write!(f, "Failed to hash password: {msg}"),
            Self::BackupFailed(msg) => write!(f, "Backup failed: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::UniqueViolation(info.message().to_string())
            }
            diesel::result::Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                Self::ForeignKeyViolation(info.message().to_string())
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<diesel::r2d2::PoolError> for PersistenceError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        Self::PoolError(err.to_string())
    }
}

impl From<CoreError> for PersistenceError {
    fn from(err: CoreError) -> Self {
        Self::RuleViolation(err)
    }
}

impl From<DomainError> for PersistenceError {
    fn from(err: DomainError) -> Self {
        Self::RuleViolation(CoreError::DomainViolation(err))
    }
}

impl From<bcrypt::BcryptError> for PersistenceError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::PasswordHashFailed(err.to_string())
    }
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(err: rusqlite::Error) -> Self {
        Self::BackupFailed(err.to_string())
    }
}
