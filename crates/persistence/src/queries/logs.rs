// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{LogData, Page, PageRequest};
use crate::diesel_schema::system_logs;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = system_logs)]
struct LogRow {
    id: i64,
    actor_id: Option<i64>,
    action: String,
    entity_type: String,
    entity_id: i64,
    details: Option<String>,
    created_at: String,
}

impl From<LogRow> for LogData {
    fn from(row: LogRow) -> Self {
        Self {
            id: row.id,
            actor_id: row.actor_id,
            action: row.action,
            entity_type: row.entity_type,
            entity_id: row.entity_id,
            details: row.details,
            created_at: row.created_at,
        }
    }
}

/// Lists the system log, newest first, optionally for one entity type.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_logs(
    conn: &mut SqliteConnection,
    entity_type: Option<&str>,
    page: PageRequest,
) -> Result<Page<LogData>, PersistenceError> {
    let scoped = || {
        let query = system_logs::table.into_boxed();
        match entity_type {
            Some(entity_type) => query.filter(system_logs::entity_type.eq(entity_type.to_string())),
            None => query,
        }
    };

    let total: i64 = scoped().count().get_result(conn)?;
    let rows: Vec<LogRow> = scoped()
        .select(LogRow::as_select())
        .order(system_logs::id.desc())
        .limit(page.per_page)
        .offset(page.offset())
        .load(conn)?;

    Ok(Page {
        items: rows.into_iter().map(LogData::from).collect(),
        total,
        page: page.page,
        per_page: page.per_page,
    })
}
