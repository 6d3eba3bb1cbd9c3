// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SQLite-specific backend utilities.
//!
//! This module is limited to:
//! - Pool construction and per-connection setup (PRAGMA statements)
//! - Migration execution
//! - SQLite-specific workarounds (e.g., `last_insert_rowid()`)
//! - Online backups through the `SQLite` backup API
//!
//! Domain queries and mutations live in `queries/` and `mutations/`.

use std::path::Path;
use std::time::Duration;

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sql_types::{BigInt, Integer};
use diesel::{RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use rusqlite::DatabaseName;
use tracing::{debug, info};

use crate::error::PersistenceError;

/// Embedded `SQLite` migrations.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Milliseconds a connection waits on a locked database before failing.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Pool of `SQLite` connections.
pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Helper row struct for PRAGMA queries.
///
/// Diesel has no PRAGMA DSL.
#[derive(QueryableByName)]
struct PragmaRow {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Applies per-connection settings every time the pool opens a connection.
#[derive(Debug, Clone, Copy)]
struct ConnectionSetup;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionSetup {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        diesel::sql_query("PRAGMA foreign_keys = ON")
            .execute(conn)
            .map_err(diesel::r2d2::Error::QueryError)?;
        diesel::sql_query(format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}"))
            .execute(conn)
            .map_err(diesel::r2d2::Error::QueryError)?;
        Ok(())
    }
}

/// Builds a connection pool for the given database URL.
///
/// In-memory databases vanish when their last connection closes, so they
/// get a single connection that is never recycled.
///
/// # Arguments
///
/// * `database_url` - A file path or `SQLite` URI
/// * `in_memory` - Whether the URL names a shared-cache in-memory database
///
/// # Errors
///
/// Returns an error if the pool cannot open its initial connections.
pub fn build_pool(database_url: &str, in_memory: bool) -> Result<SqlitePool, PersistenceError> {
    info!(database_url, in_memory, "Building SQLite connection pool");

    let manager: ConnectionManager<SqliteConnection> = ConnectionManager::new(database_url);
    let builder = Pool::builder().connection_customizer(Box::new(ConnectionSetup));

    let pool: SqlitePool = if in_memory {
        builder
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .build(manager)?
    } else {
        builder.max_size(8).build(manager)?
    };
    Ok(pool)
}

/// Helper function to get the last inserted row ID.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}

/// Verifies that foreign key enforcement is enabled.
///
/// # Arguments
///
/// * `conn` - The database connection to check
///
/// # Errors
///
/// Returns an error if foreign key enforcement is not enabled.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let foreign_keys_enabled: i32 = diesel::sql_query("PRAGMA foreign_keys")
        .get_result::<PragmaRow>(conn)?
        .foreign_keys;

    if foreign_keys_enabled == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }

    debug!("SQLite foreign key enforcement is enabled");
    Ok(())
}

/// Runs pending migrations on the provided connection.
///
/// # Errors
///
/// Returns an error if migration execution fails.
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    info!("Running SQLite database migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;
    Ok(())
}

/// Enables WAL mode for file-based `SQLite` databases.
///
/// # Errors
///
/// Returns an error if the PRAGMA statement fails.
pub fn enable_wal_mode(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    diesel::sql_query("PRAGMA journal_mode = WAL")
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
    Ok(())
}

/// Copies a live database file to `destination` using the `SQLite` backup API.
///
/// The copy is consistent even while other connections are writing.
///
/// # Arguments
///
/// * `source` - Path of the database to copy
/// * `destination` - Path of the backup file; overwritten if present
///
/// # Errors
///
/// Returns an error if either file cannot be opened or the copy fails.
pub fn backup_database(source: &Path, destination: &Path) -> Result<(), PersistenceError> {
    info!(
        source = %source.display(),
        destination = %destination.display(),
        "Backing up database"
    );
    let conn: rusqlite::Connection = rusqlite::Connection::open(source)?;
    conn.busy_timeout(Duration::from_millis(u64::from(BUSY_TIMEOUT_MS)))?;
    conn.backup(DatabaseName::Main, destination, None)?;
    Ok(())
}
