// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference catalog mutations.
//!
//! Name uniqueness is enforced by case-insensitive unique indexes; a
//! duplicate surfaces as `UniqueViolation`.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::CatalogKind;
use crate::diesel_schema::leave_types;
use crate::error::PersistenceError;
use crate::queries::catalog::catalog_entry_exists;

/// Inserts a catalog entry.
///
/// # Errors
///
/// Returns `UniqueViolation` if the name is taken.
pub fn insert_catalog_entry(
    conn: &mut SqliteConnection,
    kind: CatalogKind,
    name: &str,
    description: Option<&str>,
) -> Result<i64, PersistenceError> {
    with_catalog_table!(kind, t => {
        diesel::insert_into(t::table)
            .values((t::name.eq(name), t::description.eq(description)))
            .execute(conn)?;
    });

    let entry_id: i64 = conn.get_last_insert_rowid()?;
    info!(catalog = kind.label(), entry_id, name, "Catalog entry created");
    Ok(entry_id)
}

/// Updates a catalog entry. `None` leaves a field unchanged.
///
/// Returns the number of rows updated.
///
/// # Errors
///
/// Returns `UniqueViolation` if the new name is taken.
#[allow(clippy::option_option)]
pub fn update_catalog_entry(
    conn: &mut SqliteConnection,
    kind: CatalogKind,
    entry_id: i64,
    name: Option<&str>,
    description: Option<Option<&str>>,
) -> Result<usize, PersistenceError> {
    let updated: usize = with_catalog_table!(kind, t => {
        let target = t::table.filter(t::id.eq(entry_id));
        match (name, description) {
            (None, None) => {
                return Ok(usize::from(catalog_entry_exists(conn, kind, entry_id)?));
            }
            (Some(name), None) => diesel::update(target).set(t::name.eq(name)).execute(conn)?,
            (None, Some(description)) => diesel::update(target)
                .set(t::description.eq(description))
                .execute(conn)?,
            (Some(name), Some(description)) => diesel::update(target)
                .set((t::name.eq(name), t::description.eq(description)))
                .execute(conn)?,
        }
    });

    info!(catalog = kind.label(), entry_id, updated, "Catalog entry updated");
    Ok(updated)
}

/// Inserts a leave type.
///
/// # Errors
///
/// Returns `UniqueViolation` if the name is taken.
pub fn insert_leave_type(
    conn: &mut SqliteConnection,
    name: &str,
    default_days: i64,
    description: Option<&str>,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(leave_types::table)
        .values((
            leave_types::name.eq(name),
            leave_types::default_days.eq(default_days),
            leave_types::description.eq(description),
        ))
        .execute(conn)?;

    let leave_type_id: i64 = conn.get_last_insert_rowid()?;
    info!(leave_type_id, name, default_days, "Leave type created");
    Ok(leave_type_id)
}

#[derive(AsChangeset)]
#[diesel(table_name = leave_types)]
struct LeaveTypeChangeset<'a> {
    name: Option<&'a str>,
    default_days: Option<i64>,
    description: Option<Option<&'a str>>,
}

/// Updates a leave type. `None` leaves a field unchanged.
///
/// Returns the number of rows updated.
///
/// # Errors
///
/// Returns `UniqueViolation` if the new name is taken.
#[allow(clippy::option_option)]
pub fn update_leave_type(
    conn: &mut SqliteConnection,
    leave_type_id: i64,
    name: Option<&str>,
    default_days: Option<i64>,
    description: Option<Option<&str>>,
) -> Result<usize, PersistenceError> {
    if name.is_none() && default_days.is_none() && description.is_none() {
        let count: i64 = leave_types::table
            .filter(leave_types::id.eq(leave_type_id))
            .count()
            .get_result(conn)?;
        return Ok(usize::from(count > 0));
    }

    let updated: usize = diesel::update(leave_types::table.filter(leave_types::id.eq(leave_type_id)))
        .set(LeaveTypeChangeset {
            name,
            default_days,
            description,
        })
        .execute(conn)?;

    info!(leave_type_id, updated, "Leave type updated");
    Ok(updated)
}
