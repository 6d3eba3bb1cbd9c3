// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for hrdesk.
//!
//! This crate owns the relational store: employees and their records, leave,
//! attendance, notifications, projects, reference catalogs and the system log.
//! It is built on Diesel over `SQLite` with an r2d2 connection pool.
//!
//! ## Connections
//!
//! Every public operation on [`Persistence`] checks out exactly one pooled
//! connection and returns it before completing. Operations never hold two
//! connections at once, so a pool of one (used for in-memory databases)
//! cannot deadlock.
//!
//! ## Transactions
//!
//! Multi-step writes run inside a single transaction. Any failure rolls the
//! whole operation back. Two kinds of follow-up writes happen after commit and
//! are best-effort: system-log entries and notifications to supervisors about
//! a new leave request. A failure there is logged at `warn` and swallowed.
//!
//! ## Testing
//!
//! - `Persistence::new_in_memory()` gives each caller an isolated database
//! - Tests exercise the public facade, not the query modules

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

use diesel::SqliteConnection;
use diesel::connection::Connection;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use hrdesk::{
    LeaveApplication, ensure_no_reporting_cycle, leave_submitted_notice, supervisors_to_notify,
};
use hrdesk_audit::{Action, Actor, EntityRef, EntityType, LogEntry};
use hrdesk_domain::{
    AttendanceStatus, DomainError, EmployeeCode, EmployeeProfile, LeaveDecision, LeaveStatus,
    Proficiency, WorkdayPolicy, format_date, format_timestamp, now_timestamp, parse_timestamp,
    worked_minutes,
};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use time::{Date, OffsetDateTime};
use tracing::{info, warn};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Runs a block against the Diesel table behind a [`CatalogKind`].
///
/// Diesel tables are distinct types, so a query written once has to be
/// instantiated per table. The macro binds the table module to `$t` in each
/// arm and expands `$body` there.
///
/// ```ignore
/// let names: Vec<String> = with_catalog_table!(kind, t => {
///     t::table.select(t::name).load(conn)?
/// });
/// ```
macro_rules! with_catalog_table {
    ($kind:expr, $t:ident => $body:block) => {
        match $kind {
            $crate::data_models::CatalogKind::Departments => {
                use $crate::diesel_schema::departments as $t;
                $body
            }
            $crate::data_models::CatalogKind::Designations => {
                use $crate::diesel_schema::designations as $t;
                $body
            }
            $crate::data_models::CatalogKind::Roles => {
                use $crate::diesel_schema::roles as $t;
                $body
            }
            $crate::data_models::CatalogKind::EmployeeTypes => {
                use $crate::diesel_schema::employee_types as $t;
                $body
            }
            $crate::data_models::CatalogKind::Skills => {
                use $crate::diesel_schema::skills as $t;
                $body
            }
        }
    };
}

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use backend::sqlite::backup_database;
pub use data_models::{
    AssignmentData, AttendanceData, AttendanceUpdate, CatalogEntry, CatalogKind, ContactUpdate,
    CredentialData, DEFAULT_PER_PAGE, DocumentData, EmployeeDashboard, EmployeeData,
    EmployeeFilter, EmployeeRef, EmployeeSkillData, EmployeeUpdate, LeaveBalanceData,
    LeaveRequestData, LeaveSubmissionResult, LeaveTypeData, LogData, MAX_PER_PAGE, NewAssignment,
    NewDocument, NewEmployee, NewLeaveRequest, NewProject, NewSalaryRecord, NotificationData,
    NotificationPage, Page, PageRequest, ProfileImageChange, ProjectData, ProjectDetail,
    ProjectUpdate, RegisteredEmployee, SalaryRecordData, SupervisorDashboard,
};
pub use error::PersistenceError;

use backend::PersistenceBackend;
use backend::sqlite::SqlitePool;

type PooledSqlite = PooledConnection<ConnectionManager<SqliteConnection>>;

const INITIAL_SALARY_REASON: &str = "Initial salary";

/// Persistence adapter for the HR store.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct Persistence {
    pool: SqlitePool,
    bcrypt_cost: u32,
    database_path: Option<PathBuf>,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence")
            .field("database_path", &self.database_path)
            .field("pool_size", &self.pool.max_size())
            .finish_non_exhaustive()
    }
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared-cache database, so tests are
    /// isolated without time-based collisions. Password hashing uses the
    /// minimum bcrypt cost.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let pool: SqlitePool = backend::sqlite::build_pool(&shared_memory_url, true)?;
        Self::prepare(&pool, false)?;

        Ok(Self {
            pool,
            bcrypt_cost: 4,
            database_path: None,
        })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// The file is created if missing, migrated, and switched to WAL mode.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let pool: SqlitePool = backend::sqlite::build_pool(path_str, false)?;
        Self::prepare(&pool, true)?;

        Ok(Self {
            pool,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            database_path: Some(path.as_ref().to_path_buf()),
        })
    }

    fn prepare(pool: &SqlitePool, wal: bool) -> Result<(), PersistenceError> {
        let mut conn: PooledSqlite = pool.get()?;
        if wal {
            backend::sqlite::enable_wal_mode(&mut conn)?;
        }
        backend::sqlite::run_migrations(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;
        Ok(())
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&self) -> Result<(), PersistenceError> {
        self.with_conn(|conn| conn.verify_foreign_key_enforcement())
    }

    /// Copies the database file to `destination`.
    ///
    /// # Errors
    ///
    /// Returns `BackupFailed` for in-memory databases, or an error if the
    /// copy fails.
    pub fn backup_to(&self, destination: &Path) -> Result<(), PersistenceError> {
        let Some(source) = &self.database_path else {
            return Err(PersistenceError::BackupFailed(
                "in-memory databases cannot be backed up".to_string(),
            ));
        };
        backup_database(source, destination)
    }

    fn with_conn<T, F>(&self, f: F) -> Result<T, PersistenceError>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, PersistenceError>,
    {
        let mut conn: PooledSqlite = self.pool.get()?;
        f(&mut *conn)
    }

    fn hash_password(&self, password: &str) -> Result<String, PersistenceError> {
        Ok(bcrypt::hash(password, self.bcrypt_cost)?)
    }

    // ========================================================================
    // Identity
    // ========================================================================

    /// Looks up login credentials by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<CredentialData>, PersistenceError> {
        self.with_conn(|conn| queries::employees::find_credentials_by_email(conn, email.trim()))
    }

    /// Looks up login credentials by employee ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_credentials_by_id(
        &self,
        employee_id: i64,
    ) -> Result<Option<CredentialData>, PersistenceError> {
        self.with_conn(|conn| queries::employees::find_credentials_by_id(conn, employee_id))
    }

    /// Verifies a password against a stored bcrypt hash.
    ///
    /// # Arguments
    ///
    /// * `password` - The plain text password to verify
    /// * `password_hash` - The stored bcrypt hash
    ///
    /// # Errors
    ///
    /// Returns an error if the stored hash is malformed.
    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        Ok(bcrypt::verify(password, password_hash)?)
    }

    /// Replaces an employee's password.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the employee does not exist, or an error if
    /// hashing or the update fails.
    pub fn set_password(&self, employee_id: i64, new_password: &str) -> Result<(), PersistenceError> {
        let password_hash: String = self.hash_password(new_password)?;
        let now: String = now_timestamp()?;
        self.with_conn(|conn| {
            if mutations::employees::set_password_hash(conn, employee_id, &password_hash, &now)? == 0 {
                return Err(not_found("Employee", employee_id));
            }
            info!(employee_id, "Password changed");
            Ok(())
        })
    }

    /// Retrieves an employee with resolved reference names.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_employee(&self, employee_id: i64) -> Result<Option<EmployeeData>, PersistenceError> {
        self.with_conn(|conn| queries::employees::find_employee(conn, employee_id))
    }

    /// Retrieves the authorization profile of an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_profile(
        &self,
        employee_id: i64,
    ) -> Result<Option<EmployeeProfile>, PersistenceError> {
        self.with_conn(|conn| queries::employees::find_profile(conn, employee_id))
    }

    /// Whether the store has no employees yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn is_empty(&self) -> Result<bool, PersistenceError> {
        self.with_conn(|conn| Ok(queries::employees::count_employees(conn)? == 0))
    }

    // ========================================================================
    // Employees
    // ========================================================================

    /// Registers an employee.
    ///
    /// In one transaction: validates references, rejects a duplicate email,
    /// assigns the next `EMP-<year>-<seq>` code, inserts the employee, records
    /// the initial salary effective on the hire date, and creates default
    /// leave balances for the current year.
    ///
    /// # Arguments
    ///
    /// * `actor` - Who performs the registration
    /// * `employee` - The validated registration input
    ///
    /// # Errors
    ///
    /// Returns `InvalidReference` naming the first unknown reference,
    /// `Conflict` for a duplicate email, or an error if any write fails.
    pub fn register_employee(
        &self,
        actor: Actor,
        employee: &NewEmployee,
    ) -> Result<RegisteredEmployee, PersistenceError> {
        let password_hash: String = self.hash_password(&employee.password)?;
        let now: String = now_timestamp()?;
        let year: i32 = OffsetDateTime::now_utc().year();
        let email: &str = employee.email.trim();

        self.with_conn(|conn| {
            let registered: RegisteredEmployee =
                conn.transaction::<_, PersistenceError, _>(|conn| {
                    ensure_catalog_reference(conn, CatalogKind::Departments, employee.department_id, "department_id")?;
                    ensure_catalog_reference(conn, CatalogKind::Designations, employee.designation_id, "designation_id")?;
                    ensure_catalog_reference(conn, CatalogKind::Roles, employee.role_id, "role_id")?;
                    ensure_catalog_reference(conn, CatalogKind::EmployeeTypes, employee.employee_type_id, "employee_type_id")?;
                    ensure_employee_reference(conn, employee.reports_to, "reports_to")?;

                    if queries::employees::email_exists(conn, email)? {
                        return Err(PersistenceError::Conflict(format!(
                            "Email '{email}' is already registered"
                        )));
                    }

                    let last: Option<u32> = queries::employees::highest_code_sequence(conn, year)?;
                    let code: EmployeeCode = EmployeeCode::next_for_year(year, last)?;
                    let employee_id: i64 = mutations::employees::insert_employee(
                        conn,
                        &code,
                        employee,
                        &password_hash,
                        &now,
                    )?;

                    let initial: NewSalaryRecord = NewSalaryRecord {
                        amount: employee.initial_salary,
                        effective_date: employee.hire_date,
                        reason: Some(INITIAL_SALARY_REASON.to_string()),
                    };
                    mutations::salary::insert_salary_record(
                        conn,
                        employee_id,
                        &initial,
                        actor.employee_id,
                        &now,
                    )?;
                    mutations::leave::create_default_balances(conn, employee_id, year)?;

                    Ok(RegisteredEmployee {
                        id: employee_id,
                        employee_code: code.to_string(),
                    })
                })?;

            record_log(
                conn,
                &LogEntry::new(
                    actor,
                    Action::RegisterEmployee,
                    EntityRef::new(EntityType::Employee, registered.id),
                )
                .with_details(format!(
                    "Registered {} as {}",
                    employee.name.trim(),
                    registered.employee_code
                )),
            );
            Ok(registered)
        })
    }

    /// Lists employees visible to `actor`, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_employees(
        &self,
        actor: &EmployeeProfile,
        filter: &EmployeeFilter,
        page: PageRequest,
    ) -> Result<Page<EmployeeData>, PersistenceError> {
        self.with_conn(|conn| queries::employees::list_employees(conn, actor, filter, page))
    }

    /// Updates the self-service contact fields of an employee.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the employee does not exist.
    pub fn update_contact(
        &self,
        employee_id: i64,
        update: &ContactUpdate,
    ) -> Result<EmployeeData, PersistenceError> {
        let now: String = now_timestamp()?;
        self.with_conn(|conn| {
            if mutations::employees::update_contact(conn, employee_id, update, &now)? == 0 {
                return Err(not_found("Employee", employee_id));
            }
            load_employee(conn, employee_id)
        })
    }

    /// Applies a supervisor edit to an employee.
    ///
    /// References are validated and a reporting-line change is rejected if
    /// it would create a cycle.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `InvalidReference`, a `ReportingCycle` rule
    /// violation, or an error if the update fails.
    pub fn update_employee(
        &self,
        actor_id: i64,
        employee_id: i64,
        update: &EmployeeUpdate,
    ) -> Result<EmployeeData, PersistenceError> {
        let now: String = now_timestamp()?;
        self.with_conn(|conn| {
            conn.transaction::<_, PersistenceError, _>(|conn| {
                if !queries::employees::employee_exists(conn, employee_id)? {
                    return Err(not_found("Employee", employee_id));
                }
                ensure_catalog_reference(conn, CatalogKind::Departments, update.department_id.flatten(), "department_id")?;
                ensure_catalog_reference(conn, CatalogKind::Designations, update.designation_id.flatten(), "designation_id")?;
                ensure_catalog_reference(conn, CatalogKind::Roles, update.role_id, "role_id")?;
                ensure_catalog_reference(conn, CatalogKind::EmployeeTypes, update.employee_type_id.flatten(), "employee_type_id")?;
                if let Some(reports_to) = update.reports_to {
                    ensure_employee_reference(conn, reports_to, "reports_to")?;
                    ensure_no_reporting_cycle(employee_id, reports_to, |id| {
                        queries::employees::manager_of(conn, id)
                    })?;
                }
                mutations::employees::update_employee(conn, employee_id, update, &now)?;
                Ok(())
            })?;

            record_log(
                conn,
                &LogEntry::new(
                    Actor::employee(actor_id),
                    Action::UpdateEmployee,
                    EntityRef::new(EntityType::Employee, employee_id),
                ),
            );
            load_employee(conn, employee_id)
        })
    }

    /// Activates or deactivates an employee.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the employee does not exist.
    pub fn set_employee_active(
        &self,
        actor_id: i64,
        employee_id: i64,
        is_active: bool,
    ) -> Result<EmployeeData, PersistenceError> {
        let now: String = now_timestamp()?;
        self.with_conn(|conn| {
            if mutations::employees::set_active(conn, employee_id, is_active, &now)? == 0 {
                return Err(not_found("Employee", employee_id));
            }
            let state: &str = if is_active { "Activated" } else { "Deactivated" };
            record_log(
                conn,
                &LogEntry::new(
                    Actor::employee(actor_id),
                    Action::ChangeEmployeeStatus,
                    EntityRef::new(EntityType::Employee, employee_id),
                )
                .with_details(state.to_string()),
            );
            load_employee(conn, employee_id)
        })
    }

    /// Records the stored path of an employee's profile image.
    ///
    /// The path it replaces is returned so the caller can remove that file.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the employee does not exist.
    pub fn set_profile_image(
        &self,
        employee_id: i64,
        relative_path: &str,
    ) -> Result<ProfileImageChange, PersistenceError> {
        let now: String = now_timestamp()?;
        self.with_conn(|conn| {
            conn.transaction::<_, PersistenceError, _>(|conn| {
                let previous: Option<String> = load_employee(conn, employee_id)?.profile_image;
                if mutations::employees::set_profile_image(conn, employee_id, relative_path, &now)?
                    == 0
                {
                    return Err(not_found("Employee", employee_id));
                }
                Ok(ProfileImageChange {
                    employee: load_employee(conn, employee_id)?,
                    replaced: previous.filter(|path| path != relative_path),
                })
            })
        })
    }

    // ========================================================================
    // Salary
    // ========================================================================

    /// Lists an employee's salary ledger, newest effective date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_salary_history(
        &self,
        employee_id: i64,
    ) -> Result<Vec<SalaryRecordData>, PersistenceError> {
        self.with_conn(|conn| queries::salary::list_salary_history(conn, employee_id))
    }

    /// Resolves the current salary of an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn current_salary(
        &self,
        employee_id: i64,
    ) -> Result<Option<SalaryRecordData>, PersistenceError> {
        self.with_conn(|conn| queries::salary::find_current_salary(conn, employee_id))
    }

    /// Appends a salary row. Rows are never updated or deleted.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the employee does not exist.
    pub fn add_salary_record(
        &self,
        actor_id: i64,
        employee_id: i64,
        record: &NewSalaryRecord,
    ) -> Result<SalaryRecordData, PersistenceError> {
        let now: String = now_timestamp()?;
        self.with_conn(|conn| {
            if !queries::employees::employee_exists(conn, employee_id)? {
                return Err(not_found("Employee", employee_id));
            }
            let salary_id: i64 = mutations::salary::insert_salary_record(
                conn,
                employee_id,
                record,
                Some(actor_id),
                &now,
            )?;
            record_log(
                conn,
                &LogEntry::new(
                    Actor::employee(actor_id),
                    Action::AddSalaryRecord,
                    EntityRef::new(EntityType::SalaryHistory, salary_id),
                )
                .with_details(format!(
                    "{:.2} effective {}",
                    record.amount.as_major(),
                    format_date(record.effective_date)
                )),
            );
            queries::salary::find_salary_record(conn, salary_id)?
                .ok_or_else(|| not_found("Salary record", salary_id))
        })
    }

    // ========================================================================
    // Skills & Documents
    // ========================================================================

    /// Lists the skills attached to an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_employee_skills(
        &self,
        employee_id: i64,
    ) -> Result<Vec<EmployeeSkillData>, PersistenceError> {
        self.with_conn(|conn| queries::skills::list_employee_skills(conn, employee_id))
    }

    /// Attaches a skill by name, creating the catalog entry if needed.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the employee already has the skill.
    pub fn attach_skill(
        &self,
        employee_id: i64,
        skill_name: &str,
        proficiency: Proficiency,
    ) -> Result<EmployeeSkillData, PersistenceError> {
        let skill_name: &str = skill_name.trim();
        self.with_conn(|conn| {
            let skill_id: i64 = conn.transaction::<_, PersistenceError, _>(|conn| {
                if !queries::employees::employee_exists(conn, employee_id)? {
                    return Err(not_found("Employee", employee_id));
                }
                let skill_id: i64 =
                    match queries::catalog::find_catalog_by_name(conn, CatalogKind::Skills, skill_name)? {
                        Some(entry) => entry.id,
                        None => mutations::catalog::insert_catalog_entry(
                            conn,
                            CatalogKind::Skills,
                            skill_name,
                            None,
                        )?,
                    };
                if queries::skills::has_skill(conn, employee_id, skill_id)? {
                    return Err(PersistenceError::Conflict(format!(
                        "Skill '{skill_name}' is already attached"
                    )));
                }
                mutations::skills::attach_skill(conn, employee_id, skill_id, proficiency)?;
                Ok(skill_id)
            })?;
            load_skill(conn, employee_id, skill_id)
        })
    }

    /// Marks an employee's skill as verified.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the employee does not have the skill.
    pub fn verify_skill(
        &self,
        verifier_id: i64,
        employee_id: i64,
        skill_id: i64,
    ) -> Result<EmployeeSkillData, PersistenceError> {
        self.with_conn(|conn| {
            if mutations::skills::verify_skill(conn, employee_id, skill_id, verifier_id)? == 0 {
                return Err(not_found("Employee skill", skill_id));
            }
            load_skill(conn, employee_id, skill_id)
        })
    }

    /// Removes a skill from an employee.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the employee does not have the skill.
    pub fn detach_skill(&self, employee_id: i64, skill_id: i64) -> Result<(), PersistenceError> {
        self.with_conn(|conn| {
            if mutations::skills::detach_skill(conn, employee_id, skill_id)? == 0 {
                return Err(not_found("Employee skill", skill_id));
            }
            Ok(())
        })
    }

    /// Records metadata for a stored document.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn add_document(&self, document: &NewDocument) -> Result<DocumentData, PersistenceError> {
        let now: String = now_timestamp()?;
        self.with_conn(|conn| {
            let document_id: i64 = mutations::documents::insert_document(conn, document, &now)?;
            queries::documents::find_document(conn, document_id)?
                .ok_or_else(|| not_found("Document", document_id))
        })
    }

    /// Lists an employee's documents.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_documents(&self, employee_id: i64) -> Result<Vec<DocumentData>, PersistenceError> {
        self.with_conn(|conn| queries::documents::list_documents(conn, employee_id))
    }

    // ========================================================================
    // Leave
    // ========================================================================

    /// Lists the configured leave types.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_leave_types(&self) -> Result<Vec<LeaveTypeData>, PersistenceError> {
        self.with_conn(queries::leave::list_leave_types)
    }

    /// Creates a leave type.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the name is taken.
    pub fn create_leave_type(
        &self,
        name: &str,
        default_days: i64,
        description: Option<&str>,
    ) -> Result<LeaveTypeData, PersistenceError> {
        let name: &str = name.trim();
        self.with_conn(|conn| {
            let leave_type_id: i64 =
                mutations::catalog::insert_leave_type(conn, name, default_days, description)
                    .map_err(|e| duplicate_as_conflict(e, || format!("Leave type '{name}' already exists")))?;
            queries::leave::find_leave_type(conn, leave_type_id)?
                .ok_or_else(|| not_found("Leave type", leave_type_id))
        })
    }

    /// Updates a leave type.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the leave type does not exist, or `Conflict`
    /// if the new name is taken.
    #[allow(clippy::option_option)]
    pub fn update_leave_type(
        &self,
        leave_type_id: i64,
        name: Option<&str>,
        default_days: Option<i64>,
        description: Option<Option<&str>>,
    ) -> Result<LeaveTypeData, PersistenceError> {
        let name: Option<&str> = name.map(str::trim);
        self.with_conn(|conn| {
            let updated: usize = mutations::catalog::update_leave_type(
                conn,
                leave_type_id,
                name,
                default_days,
                description,
            )
            .map_err(|e| {
                duplicate_as_conflict(e, || {
                    format!("Leave type '{}' already exists", name.unwrap_or_default())
                })
            })?;
            if updated == 0 {
                return Err(not_found("Leave type", leave_type_id));
            }
            queries::leave::find_leave_type(conn, leave_type_id)?
                .ok_or_else(|| not_found("Leave type", leave_type_id))
        })
    }

    /// Lists an employee's balances for a year.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_leave_balances(
        &self,
        employee_id: i64,
        year: i32,
    ) -> Result<Vec<LeaveBalanceData>, PersistenceError> {
        self.with_conn(|conn| queries::leave::list_balances(conn, employee_id, year))
    }

    /// Sets the allotment of one balance, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown employee or leave type, or an
    /// `AllotmentBelowUsage` rule violation.
    pub fn set_leave_allotment(
        &self,
        actor_id: i64,
        employee_id: i64,
        leave_type_id: i64,
        year: i32,
        total_days: i64,
    ) -> Result<LeaveBalanceData, PersistenceError> {
        self.with_conn(|conn| {
            conn.transaction::<_, PersistenceError, _>(|conn| {
                if !queries::employees::employee_exists(conn, employee_id)? {
                    return Err(not_found("Employee", employee_id));
                }
                if queries::leave::find_leave_type(conn, leave_type_id)?.is_none() {
                    return Err(not_found("Leave type", leave_type_id));
                }
                if let Some(balance) =
                    queries::leave::find_balance(conn, employee_id, leave_type_id, year)?
                {
                    balance.with_total(total_days)?;
                }
                mutations::leave::upsert_balance_total(
                    conn,
                    employee_id,
                    leave_type_id,
                    year,
                    total_days,
                )
            })?;

            let balance: LeaveBalanceData = queries::leave::list_balances(conn, employee_id, year)?
                .into_iter()
                .find(|b| b.leave_type_id == leave_type_id)
                .ok_or_else(|| not_found("Leave balance", leave_type_id))?;
            record_log(
                conn,
                &LogEntry::new(
                    Actor::employee(actor_id),
                    Action::SetLeaveBalance,
                    EntityRef::new(EntityType::LeaveBalance, balance.id),
                )
                .with_details(format!(
                    "{} {year}: {total_days} days",
                    balance.leave_type_name
                )),
            );
            Ok(balance)
        })
    }

    /// Submits a leave request.
    ///
    /// Validation and the insert share one transaction. Supervisors are
    /// notified after commit.
    ///
    /// # Errors
    ///
    /// Returns a rule violation for a missing balance, insufficient days,
    /// or an overlapping request.
    pub fn submit_leave(
        &self,
        request: &NewLeaveRequest,
    ) -> Result<LeaveSubmissionResult, PersistenceError> {
        let now: String = now_timestamp()?;
        self.with_conn(|conn| {
            let (request_id, remaining): (i64, i64) =
                conn.transaction::<_, PersistenceError, _>(|conn| {
                    let balance = queries::leave::find_balance(
                        conn,
                        request.employee_id,
                        request.leave_type_id,
                        request.range.year(),
                    )?;
                    let existing = queries::leave::reserving_requests(conn, request.employee_id)?;
                    let application: LeaveApplication = LeaveApplication {
                        employee_id: request.employee_id,
                        leave_type_id: request.leave_type_id,
                        range: request.range,
                    };
                    let submission = hrdesk::submit_leave(&application, balance, &existing)?;
                    let request_id: i64 = mutations::leave::insert_leave_request(
                        conn,
                        request,
                        submission.total_days,
                        &now,
                    )?;
                    Ok((request_id, submission.remaining_after_approval))
                })?;

            let data: LeaveRequestData = load_request(conn, request_id)?;
            match notify_supervisors(conn, &data, request) {
                Ok(sent) => info!(request_id, sent, "Supervisors notified of leave request"),
                Err(e) => warn!(request_id, error = %e, "Failed to notify supervisors"),
            }
            Ok(LeaveSubmissionResult {
                request: data,
                remaining_after_approval: remaining,
            })
        })
    }

    /// Cancels the actor's own pending request.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, a `NotOwner` rule violation, or an
    /// `InvalidTransition` rule violation.
    pub fn cancel_leave(
        &self,
        actor_id: i64,
        request_id: i64,
    ) -> Result<LeaveRequestData, PersistenceError> {
        self.with_conn(|conn| {
            conn.transaction::<_, PersistenceError, _>(|conn| {
                let snapshot = queries::leave::find_request_snapshot(conn, request_id)?
                    .ok_or_else(|| not_found("Leave request", request_id))?;
                hrdesk::cancel_leave(&snapshot, actor_id)?;
                if mutations::leave::cancel_pending_request(conn, request_id)? == 0 {
                    return Err(PersistenceError::InvalidState(format!(
                        "Leave request {request_id} is no longer pending"
                    )));
                }
                Ok(())
            })?;
            info!(request_id, actor_id, "Leave request cancelled");
            load_request(conn, request_id)
        })
    }

    /// Approves or rejects a pending request.
    ///
    /// In one transaction: authorizes the actor over the owner, records the
    /// decision, and on approval backfills `on_leave` attendance for every
    /// day and debits the balance. The owner's notification is part of the
    /// same transaction. The system log is written after commit.
    ///
    /// # Arguments
    ///
    /// * `actor` - The deciding supervisor's current profile
    /// * `request_id` - The request to decide
    /// * `decision` - Approve or reject
    /// * `comment` - Optional comment for the owner
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, a rule violation (not pending, out of scope,
    /// self-approval, insufficient balance), or an error if a write fails.
    /// Nothing is written on error.
    pub fn process_leave(
        &self,
        actor: &EmployeeProfile,
        request_id: i64,
        decision: LeaveDecision,
        comment: Option<&str>,
    ) -> Result<LeaveRequestData, PersistenceError> {
        let now: String = now_timestamp()?;
        self.with_conn(|conn| {
            let log_entry: LogEntry = conn.transaction::<_, PersistenceError, _>(|conn| {
                let snapshot = queries::leave::find_request_snapshot(conn, request_id)?
                    .ok_or_else(|| not_found("Leave request", request_id))?;
                let owner: EmployeeProfile = queries::employees::find_profile(conn, snapshot.employee_id)?
                    .ok_or_else(|| not_found("Employee", snapshot.employee_id))?;
                let resolution = hrdesk::process_leave(&snapshot, &owner, actor, decision, comment)?;

                let decided: usize = mutations::leave::decide_pending_request(
                    conn,
                    request_id,
                    resolution.status,
                    actor.id,
                    comment,
                    &now,
                )?;
                if decided == 0 {
                    return Err(PersistenceError::InvalidState(format!(
                        "Leave request {request_id} was already processed"
                    )));
                }

                if resolution.debit_days > 0 {
                    let year: i32 = snapshot.range.year();
                    let debited: usize = mutations::leave::debit_balance(
                        conn,
                        owner.id,
                        snapshot.leave_type_id,
                        year,
                        resolution.debit_days,
                    )?;
                    if debited == 0 {
                        let available: i64 = queries::leave::find_balance(
                            conn,
                            owner.id,
                            snapshot.leave_type_id,
                            year,
                        )?
                        .map_or(0, |b| b.available_days());
                        return Err(DomainError::InsufficientBalance {
                            requested: resolution.debit_days,
                            available,
                        }
                        .into());
                    }
                }

                for date in &resolution.backfill_dates {
                    mutations::attendance::mark_on_leave(
                        conn,
                        owner.id,
                        &format_date(*date),
                        &resolution.attendance_note,
                    )?;
                }
                mutations::notifications::insert_notification(conn, &resolution.notification)?;
                Ok(resolution.log_entry)
            })?;

            record_log(conn, &log_entry);
            info!(request_id, actor_id = actor.id, decision = ?decision, "Leave request processed");
            load_request(conn, request_id)
        })
    }

    /// Retrieves a leave request.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_leave_request(
        &self,
        request_id: i64,
    ) -> Result<Option<LeaveRequestData>, PersistenceError> {
        self.with_conn(|conn| queries::leave::find_request(conn, request_id))
    }

    /// Lists one page of an employee's own requests, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_my_leave_requests(
        &self,
        employee_id: i64,
        status: Option<LeaveStatus>,
        page: PageRequest,
    ) -> Result<Page<LeaveRequestData>, PersistenceError> {
        self.with_conn(|conn| {
            queries::leave::list_requests_for_employee(conn, employee_id, status, page)
        })
    }

    /// Lists pending requests the actor may decide.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_pending_for_supervisor(
        &self,
        actor: &EmployeeProfile,
    ) -> Result<Vec<LeaveRequestData>, PersistenceError> {
        self.with_conn(|conn| {
            let team: Vec<i64> = queries::employees::team_profiles(conn, actor)?
                .iter()
                .filter(|member| hrdesk::is_supervisor_over(actor, member))
                .map(|member| member.id)
                .collect();
            queries::leave::list_pending_for(conn, &team)
        })
    }

    // ========================================================================
    // Attendance
    // ========================================================================

    /// Records a check-in at `now` for the local workday.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if already checked in today, or `InvalidState`
    /// if the day is marked as leave.
    pub fn check_in(
        &self,
        employee_id: i64,
        policy: &WorkdayPolicy,
        now: OffsetDateTime,
    ) -> Result<AttendanceData, PersistenceError> {
        let local = policy.localize(now)?;
        let date: String = format_date(local.date);
        let stamp: String = format_timestamp(now)?;
        let status: AttendanceStatus = policy.check_in_status(&local);

        self.with_conn(|conn| {
            conn.transaction::<_, PersistenceError, _>(|conn| {
                let attendance_id: i64 =
                    match queries::attendance::find_attendance_on(conn, employee_id, &date)? {
                        Some(row) if row.status == AttendanceStatus::OnLeave => {
                            return Err(PersistenceError::InvalidState(format!(
                                "{date} is recorded as leave"
                            )));
                        }
                        Some(row) if row.check_in.is_some() => {
                            return Err(PersistenceError::Conflict(
                                "Already checked in today".to_string(),
                            ));
                        }
                        Some(row) => {
                            mutations::attendance::record_check_in(conn, row.id, &stamp, status)?;
                            row.id
                        }
                        None => mutations::attendance::insert_attendance(
                            conn,
                            employee_id,
                            &date,
                            Some(&stamp),
                            status,
                            None,
                        )?,
                    };
                load_attendance(conn, attendance_id)
            })
        })
    }

    /// Records a check-out at `now` for the local workday.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if there is no check-in today, or `Conflict`
    /// if already checked out.
    pub fn check_out(
        &self,
        employee_id: i64,
        policy: &WorkdayPolicy,
        now: OffsetDateTime,
    ) -> Result<AttendanceData, PersistenceError> {
        let local = policy.localize(now)?;
        let date: String = format_date(local.date);
        let stamp: String = format_timestamp(now)?;

        self.with_conn(|conn| {
            conn.transaction::<_, PersistenceError, _>(|conn| {
                let row: AttendanceData =
                    queries::attendance::find_attendance_on(conn, employee_id, &date)?
                        .ok_or_else(|| {
                            PersistenceError::InvalidState("Not checked in today".to_string())
                        })?;
                let Some(check_in) = row.check_in.as_deref() else {
                    return Err(PersistenceError::InvalidState(
                        "Not checked in today".to_string(),
                    ));
                };
                if row.check_out.is_some() {
                    return Err(PersistenceError::Conflict(
                        "Already checked out today".to_string(),
                    ));
                }

                let worked: i64 = worked_minutes(parse_timestamp(check_in)?, now);
                let status: AttendanceStatus = policy.check_out_status(row.status, worked);
                mutations::attendance::record_check_out(conn, row.id, &stamp, status)?;
                load_attendance(conn, row.id)
            })
        })
    }

    /// Records an absence for a date that has no attendance row.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the date already has a row.
    pub fn mark_absent(
        &self,
        employee_id: i64,
        date: Date,
        note: Option<&str>,
    ) -> Result<AttendanceData, PersistenceError> {
        let date: String = format_date(date);
        self.with_conn(|conn| {
            conn.transaction::<_, PersistenceError, _>(|conn| {
                if queries::attendance::find_attendance_on(conn, employee_id, &date)?.is_some() {
                    return Err(PersistenceError::Conflict(format!(
                        "Attendance already recorded for {date}"
                    )));
                }
                let attendance_id: i64 = mutations::attendance::insert_attendance(
                    conn,
                    employee_id,
                    &date,
                    None,
                    AttendanceStatus::Absent,
                    note,
                )?;
                load_attendance(conn, attendance_id)
            })
        })
    }

    /// Applies a supervisor edit to an attendance row.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the row does not exist.
    pub fn update_attendance(
        &self,
        attendance_id: i64,
        update: &AttendanceUpdate,
    ) -> Result<AttendanceData, PersistenceError> {
        self.with_conn(|conn| {
            if mutations::attendance::update_attendance(conn, attendance_id, update)? == 0 {
                return Err(not_found("Attendance record", attendance_id));
            }
            load_attendance(conn, attendance_id)
        })
    }

    /// Retrieves an attendance row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_attendance(
        &self,
        attendance_id: i64,
    ) -> Result<Option<AttendanceData>, PersistenceError> {
        self.with_conn(|conn| queries::attendance::find_attendance(conn, attendance_id))
    }

    /// Lists an employee's attendance between optional inclusive bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_attendance(
        &self,
        employee_id: i64,
        from: Option<Date>,
        to: Option<Date>,
    ) -> Result<Vec<AttendanceData>, PersistenceError> {
        let from: Option<String> = from.map(format_date);
        let to: Option<String> = to.map(format_date);
        self.with_conn(|conn| {
            queries::attendance::list_attendance(conn, employee_id, from.as_deref(), to.as_deref())
        })
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    /// Lists one page of an inbox with the unread count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_notifications(
        &self,
        employee_id: i64,
        unread_only: bool,
        page: PageRequest,
    ) -> Result<NotificationPage, PersistenceError> {
        self.with_conn(|conn| {
            queries::notifications::list_notifications(conn, employee_id, unread_only, page)
        })
    }

    /// Marks one notification read and returns the new unread count.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the notification is not in the employee's inbox.
    pub fn mark_notification_read(
        &self,
        employee_id: i64,
        notification_id: i64,
    ) -> Result<i64, PersistenceError> {
        self.with_conn(|conn| {
            if !queries::notifications::owns_notification(conn, employee_id, notification_id)? {
                return Err(not_found("Notification", notification_id));
            }
            mutations::notifications::mark_read(conn, employee_id, notification_id)?;
            queries::notifications::unread_count(conn, employee_id)
        })
    }

    /// Marks the whole inbox read and returns the new unread count.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn mark_all_notifications_read(&self, employee_id: i64) -> Result<i64, PersistenceError> {
        self.with_conn(|conn| {
            mutations::notifications::mark_all_read(conn, employee_id)?;
            queries::notifications::unread_count(conn, employee_id)
        })
    }

    /// Deletes one notification and returns the new unread count.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the notification is not in the employee's inbox.
    pub fn delete_notification(
        &self,
        employee_id: i64,
        notification_id: i64,
    ) -> Result<i64, PersistenceError> {
        self.with_conn(|conn| {
            if mutations::notifications::delete_notification(conn, employee_id, notification_id)? == 0 {
                return Err(not_found("Notification", notification_id));
            }
            queries::notifications::unread_count(conn, employee_id)
        })
    }

    // ========================================================================
    // Catalogs
    // ========================================================================

    /// Lists a reference catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_catalog(&self, kind: CatalogKind) -> Result<Vec<CatalogEntry>, PersistenceError> {
        self.with_conn(|conn| queries::catalog::list_catalog(conn, kind))
    }

    /// Adds a catalog entry.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the name is taken.
    pub fn create_catalog_entry(
        &self,
        kind: CatalogKind,
        name: &str,
        description: Option<&str>,
    ) -> Result<CatalogEntry, PersistenceError> {
        let name: &str = name.trim();
        self.with_conn(|conn| {
            let entry_id: i64 =
                mutations::catalog::insert_catalog_entry(conn, kind, name, description).map_err(
                    |e| duplicate_as_conflict(e, || format!("{} '{name}' already exists", kind.label())),
                )?;
            queries::catalog::find_catalog_entry(conn, kind, entry_id)?
                .ok_or_else(|| not_found(kind.label(), entry_id))
        })
    }

    /// Renames or re-describes a catalog entry.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the entry does not exist, or `Conflict` if the
    /// new name is taken.
    #[allow(clippy::option_option)]
    pub fn update_catalog_entry(
        &self,
        kind: CatalogKind,
        entry_id: i64,
        name: Option<&str>,
        description: Option<Option<&str>>,
    ) -> Result<CatalogEntry, PersistenceError> {
        let name: Option<&str> = name.map(str::trim);
        self.with_conn(|conn| {
            let updated: usize =
                mutations::catalog::update_catalog_entry(conn, kind, entry_id, name, description)
                    .map_err(|e| {
                        duplicate_as_conflict(e, || {
                            format!("{} '{}' already exists", kind.label(), name.unwrap_or_default())
                        })
                    })?;
            if updated == 0 {
                return Err(not_found(kind.label(), entry_id));
            }
            queries::catalog::find_catalog_entry(conn, kind, entry_id)?
                .ok_or_else(|| not_found(kind.label(), entry_id))
        })
    }

    // ========================================================================
    // Projects
    // ========================================================================

    /// Lists projects, optionally only those with `member` assigned.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_projects(&self, member: Option<i64>) -> Result<Vec<ProjectData>, PersistenceError> {
        self.with_conn(|conn| queries::projects::list_projects(conn, member))
    }

    /// Retrieves a project with its assignments.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_project(&self, project_id: i64) -> Result<Option<ProjectDetail>, PersistenceError> {
        self.with_conn(|conn| {
            let Some(project) = queries::projects::find_project(conn, project_id)? else {
                return Ok(None);
            };
            let assignments: Vec<AssignmentData> =
                queries::projects::list_assignments(conn, project_id)?;
            Ok(Some(ProjectDetail {
                project,
                assignments,
            }))
        })
    }

    /// Creates a project.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the name is taken.
    pub fn create_project(
        &self,
        actor_id: i64,
        project: &NewProject,
    ) -> Result<ProjectData, PersistenceError> {
        let now: String = now_timestamp()?;
        self.with_conn(|conn| {
            let project_id: i64 = mutations::projects::insert_project(conn, project, actor_id, &now)
                .map_err(|e| {
                    duplicate_as_conflict(e, || {
                        format!("Project '{}' already exists", project.name.trim())
                    })
                })?;
            record_log(
                conn,
                &LogEntry::new(
                    Actor::employee(actor_id),
                    Action::CreateProject,
                    EntityRef::new(EntityType::Project, project_id),
                )
                .with_details(project.name.trim().to_string()),
            );
            queries::projects::find_project(conn, project_id)?
                .ok_or_else(|| not_found("Project", project_id))
        })
    }

    /// Updates a project.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `Conflict`.
    pub fn update_project(
        &self,
        actor_id: i64,
        project_id: i64,
        update: &ProjectUpdate,
    ) -> Result<ProjectData, PersistenceError> {
        self.with_conn(|conn| {
            let updated: usize = mutations::projects::update_project(conn, project_id, update)
                .map_err(|e| {
                    duplicate_as_conflict(e, || {
                        format!(
                            "Project '{}' already exists",
                            update.name.as_deref().unwrap_or_default().trim()
                        )
                    })
                })?;
            if updated == 0 {
                return Err(not_found("Project", project_id));
            }
            record_log(
                conn,
                &LogEntry::new(
                    Actor::employee(actor_id),
                    Action::UpdateProject,
                    EntityRef::new(EntityType::Project, project_id),
                ),
            );
            queries::projects::find_project(conn, project_id)?
                .ok_or_else(|| not_found("Project", project_id))
        })
    }

    /// Assigns an active employee to a project.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown project or employee, `InvalidState`
    /// for an inactive employee, or `Conflict` for a duplicate assignment.
    pub fn assign_employee(
        &self,
        actor_id: i64,
        project_id: i64,
        assignment: &NewAssignment,
    ) -> Result<AssignmentData, PersistenceError> {
        self.with_conn(|conn| {
            let assignment_id: i64 = conn.transaction::<_, PersistenceError, _>(|conn| {
                if queries::projects::find_project(conn, project_id)?.is_none() {
                    return Err(not_found("Project", project_id));
                }
                let employee: EmployeeProfile =
                    queries::employees::find_profile(conn, assignment.employee_id)?
                        .ok_or_else(|| not_found("Employee", assignment.employee_id))?;
                if !employee.is_active {
                    return Err(PersistenceError::InvalidState(format!(
                        "Employee {} is inactive",
                        employee.id
                    )));
                }
                mutations::projects::insert_assignment(conn, project_id, assignment).map_err(|e| {
                    duplicate_as_conflict(e, || {
                        format!(
                            "Employee {} is already assigned to project {project_id}",
                            employee.id
                        )
                    })
                })
            })?;

            record_log(
                conn,
                &LogEntry::new(
                    Actor::employee(actor_id),
                    Action::AssignEmployee,
                    EntityRef::new(EntityType::ProjectAssignment, assignment_id),
                )
                .with_details(format!(
                    "Employee {} to project {project_id}",
                    assignment.employee_id
                )),
            );
            queries::projects::list_assignments(conn, project_id)?
                .into_iter()
                .find(|a| a.id == assignment_id)
                .ok_or_else(|| not_found("Assignment", assignment_id))
        })
    }

    /// Removes an employee from a project.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the employee is not assigned.
    pub fn remove_assignment(
        &self,
        actor_id: i64,
        project_id: i64,
        employee_id: i64,
    ) -> Result<(), PersistenceError> {
        self.with_conn(|conn| {
            if mutations::projects::delete_assignment(conn, project_id, employee_id)? == 0 {
                return Err(PersistenceError::NotFound(format!(
                    "Employee {employee_id} is not assigned to project {project_id}"
                )));
            }
            record_log(
                conn,
                &LogEntry::new(
                    Actor::employee(actor_id),
                    Action::RemoveAssignment,
                    EntityRef::new(EntityType::Project, project_id),
                )
                .with_details(format!("Employee {employee_id}")),
            );
            Ok(())
        })
    }

    // ========================================================================
    // System Log & Dashboards
    // ========================================================================

    /// Lists one page of the system log, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_logs(
        &self,
        entity_type: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<LogData>, PersistenceError> {
        self.with_conn(|conn| queries::logs::list_logs(conn, entity_type, page))
    }

    /// Summary for the signed-in employee.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn employee_dashboard(
        &self,
        employee_id: i64,
        today: Date,
    ) -> Result<EmployeeDashboard, PersistenceError> {
        self.with_conn(|conn| queries::dashboard::employee_dashboard(conn, employee_id, today))
    }

    /// Team summary for a supervisor.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn supervisor_dashboard(
        &self,
        actor: &EmployeeProfile,
        today: Date,
    ) -> Result<SupervisorDashboard, PersistenceError> {
        self.with_conn(|conn| queries::dashboard::supervisor_dashboard(conn, actor, today))
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn not_found(what: &str, id: i64) -> PersistenceError {
    PersistenceError::NotFound(format!("{what} {id} not found"))
}

fn duplicate_as_conflict(err: PersistenceError, message: impl FnOnce() -> String) -> PersistenceError {
    match err {
        PersistenceError::UniqueViolation(_) => PersistenceError::Conflict(message()),
        other => other,
    }
}

fn ensure_catalog_reference(
    conn: &mut SqliteConnection,
    kind: CatalogKind,
    id: Option<i64>,
    field: &'static str,
) -> Result<(), PersistenceError> {
    match id {
        Some(id) if !queries::catalog::catalog_entry_exists(conn, kind, id)? => {
            Err(PersistenceError::InvalidReference { field })
        }
        _ => Ok(()),
    }
}

fn ensure_employee_reference(
    conn: &mut SqliteConnection,
    id: Option<i64>,
    field: &'static str,
) -> Result<(), PersistenceError> {
    match id {
        Some(id) if !queries::employees::employee_exists(conn, id)? => {
            Err(PersistenceError::InvalidReference { field })
        }
        _ => Ok(()),
    }
}

fn load_employee(conn: &mut SqliteConnection, employee_id: i64) -> Result<EmployeeData, PersistenceError> {
    queries::employees::find_employee(conn, employee_id)?
        .ok_or_else(|| not_found("Employee", employee_id))
}

fn load_request(conn: &mut SqliteConnection, request_id: i64) -> Result<LeaveRequestData, PersistenceError> {
    queries::leave::find_request(conn, request_id)?
        .ok_or_else(|| not_found("Leave request", request_id))
}

fn load_attendance(
    conn: &mut SqliteConnection,
    attendance_id: i64,
) -> Result<AttendanceData, PersistenceError> {
    queries::attendance::find_attendance(conn, attendance_id)?
        .ok_or_else(|| not_found("Attendance record", attendance_id))
}

fn load_skill(
    conn: &mut SqliteConnection,
    employee_id: i64,
    skill_id: i64,
) -> Result<EmployeeSkillData, PersistenceError> {
    queries::skills::list_employee_skills(conn, employee_id)?
        .into_iter()
        .find(|s| s.skill_id == skill_id)
        .ok_or_else(|| not_found("Employee skill", skill_id))
}

/// Appends to the system log after the main write has committed.
fn record_log(conn: &mut SqliteConnection, entry: &LogEntry) {
    if let Err(e) = mutations::logs::append_log(conn, entry) {
        warn!(
            action = entry.action.as_str(),
            entity_id = entry.entity.entity_id,
            error = %e,
            "Failed to append system log"
        );
    }
}

fn notify_supervisors(
    conn: &mut SqliteConnection,
    request: &LeaveRequestData,
    submitted: &NewLeaveRequest,
) -> Result<usize, PersistenceError> {
    let Some(owner) = queries::employees::find_profile(conn, request.employee_id)? else {
        return Ok(0);
    };
    let candidates: Vec<EmployeeProfile> = queries::employees::supervisor_candidates(conn, &owner)?;
    let recipients: Vec<i64> = supervisors_to_notify(&owner, &candidates);
    for supervisor_id in &recipients {
        mutations::notifications::insert_notification(
            conn,
            &leave_submitted_notice(
                *supervisor_id,
                &request.employee_name,
                &request.leave_type_name,
                &submitted.range,
            ),
        )?;
    }
    Ok(recipients.len())
}
