// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use hrdesk::NotificationDraft;
use hrdesk_domain::now_timestamp;
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::notifications;
use crate::error::PersistenceError;

/// Appends a notification to an employee's inbox.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_notification(
    conn: &mut SqliteConnection,
    draft: &NotificationDraft,
) -> Result<i64, PersistenceError> {
    let created_at: String = now_timestamp()?;

    diesel::insert_into(notifications::table)
        .values((
            notifications::employee_id.eq(draft.employee_id),
            notifications::title.eq(&draft.title),
            notifications::message.eq(&draft.message),
            notifications::is_read.eq(0),
            notifications::created_at.eq(&created_at),
        ))
        .execute(conn)?;

    let notification_id: i64 = conn.get_last_insert_rowid()?;
    debug!(notification_id, employee_id = draft.employee_id, "Notification stored");
    Ok(notification_id)
}

/// Marks one notification read. Returns the number of rows touched.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn mark_read(
    conn: &mut SqliteConnection,
    employee_id: i64,
    notification_id: i64,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(notifications::table)
        .filter(notifications::id.eq(notification_id))
        .filter(notifications::employee_id.eq(employee_id))
        .set(notifications::is_read.eq(1))
        .execute(conn)?)
}

/// Marks a whole inbox read. Returns the number of rows touched.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn mark_all_read(conn: &mut SqliteConnection, employee_id: i64) -> Result<usize, PersistenceError> {
    Ok(diesel::update(notifications::table)
        .filter(notifications::employee_id.eq(employee_id))
        .filter(notifications::is_read.eq(0))
        .set(notifications::is_read.eq(1))
        .execute(conn)?)
}

/// Deletes a notification owned by the employee. Returns the number of rows removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_notification(
    conn: &mut SqliteConnection,
    employee_id: i64,
    notification_id: i64,
) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(
        notifications::table
            .filter(notifications::id.eq(notification_id))
            .filter(notifications::employee_id.eq(employee_id)),
    )
    .execute(conn)?)
}
