// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference catalog queries.
//!
//! All simple catalogs share the `(id, name, description)` shape, so each
//! query is written once and dispatched per table by `with_catalog_table!`.

use std::collections::HashMap;

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Text};
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::{CatalogEntry, CatalogKind};
use crate::error::PersistenceError;

type CatalogTuple = (i64, String, Option<String>);

fn into_entry((id, name, description): CatalogTuple) -> CatalogEntry {
    CatalogEntry {
        id,
        name,
        description,
    }
}

/// Lists a catalog ordered by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_catalog(
    conn: &mut SqliteConnection,
    kind: CatalogKind,
) -> Result<Vec<CatalogEntry>, PersistenceError> {
    let rows: Vec<CatalogTuple> = with_catalog_table!(kind, t => {
        t::table
            .select((t::id, t::name, t::description))
            .order(t::name.asc())
            .load(conn)?
    });
    Ok(rows.into_iter().map(into_entry).collect())
}

/// Retrieves one catalog entry by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the entry is not found.
pub fn find_catalog_entry(
    conn: &mut SqliteConnection,
    kind: CatalogKind,
    id: i64,
) -> Result<Option<CatalogEntry>, PersistenceError> {
    let row: Option<CatalogTuple> = with_catalog_table!(kind, t => {
        t::table
            .filter(t::id.eq(id))
            .select((t::id, t::name, t::description))
            .first(conn)
            .optional()?
    });
    Ok(row.map(into_entry))
}

/// Retrieves a catalog entry by name, ignoring case.
///
/// Matching uses `COLLATE NOCASE`, the same folding as the unique name
/// index, so a name the index rejects as a duplicate is always found here.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no entry has that name.
pub fn find_catalog_by_name(
    conn: &mut SqliteConnection,
    kind: CatalogKind,
    name: &str,
) -> Result<Option<CatalogEntry>, PersistenceError> {
    debug!(catalog = kind.label(), name, "Looking up catalog entry by name");
    let needle: &str = name.trim();
    let row: Option<CatalogTuple> = with_catalog_table!(kind, t => {
        t::table
            .filter(sql::<Bool>("name = ").bind::<Text, _>(needle).sql(" COLLATE NOCASE"))
            .select((t::id, t::name, t::description))
            .first(conn)
            .optional()?
    });
    Ok(row.map(into_entry))
}

/// Checks whether a catalog entry exists.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn catalog_entry_exists(
    conn: &mut SqliteConnection,
    kind: CatalogKind,
    id: i64,
) -> Result<bool, PersistenceError> {
    let count: i64 = with_catalog_table!(kind, t => {
        t::table.filter(t::id.eq(id)).count().get_result(conn)?
    });
    Ok(count > 0)
}

/// Resolves names for a set of catalog IDs.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn catalog_names(
    conn: &mut SqliteConnection,
    kind: CatalogKind,
    ids: &[i64],
) -> Result<HashMap<i64, String>, PersistenceError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows: Vec<(i64, String)> = with_catalog_table!(kind, t => {
        t::table
            .filter(t::id.eq_any(ids))
            .select((t::id, t::name))
            .load(conn)?
    });
    Ok(rows.into_iter().collect())
}
