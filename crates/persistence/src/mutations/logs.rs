// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use hrdesk_audit::LogEntry;
use hrdesk_domain::now_timestamp;
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::system_logs;
use crate::error::PersistenceError;

/// Appends one row to the system log.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn append_log(conn: &mut SqliteConnection, entry: &LogEntry) -> Result<i64, PersistenceError> {
    let created_at: String = now_timestamp()?;

    diesel::insert_into(system_logs::table)
        .values((
            system_logs::actor_id.eq(entry.actor.employee_id),
            system_logs::action.eq(entry.action.as_str()),
            system_logs::entity_type.eq(entry.entity.entity_type.as_str()),
            system_logs::entity_id.eq(entry.entity.entity_id),
            system_logs::details.eq(entry.details.as_deref()),
            system_logs::created_at.eq(&created_at),
        ))
        .execute(conn)?;

    let log_id: i64 = conn.get_last_insert_rowid()?;
    debug!(log_id, action = entry.action.as_str(), "System log appended");
    Ok(log_id)
}
