// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{NotificationData, NotificationPage, PageRequest};
use crate::diesel_schema::notifications;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = notifications)]
struct NotificationRow {
    id: i64,
    employee_id: i64,
    title: String,
    message: String,
    is_read: i32,
    created_at: String,
}

impl From<NotificationRow> for NotificationData {
    fn from(row: NotificationRow) -> Self {
        Self {
            id: row.id,
            employee_id: row.employee_id,
            title: row.title,
            message: row.message,
            is_read: row.is_read != 0,
            created_at: row.created_at,
        }
    }
}

/// Counts unread notifications in an inbox.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn unread_count(conn: &mut SqliteConnection, employee_id: i64) -> Result<i64, PersistenceError> {
    Ok(notifications::table
        .filter(notifications::employee_id.eq(employee_id))
        .filter(notifications::is_read.eq(0))
        .count()
        .get_result(conn)?)
}

/// Lists one page of an inbox, newest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - Inbox owner
/// * `unread_only` - Whether to skip read notifications
/// * `page` - Page to return
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_notifications(
    conn: &mut SqliteConnection,
    employee_id: i64,
    unread_only: bool,
    page: PageRequest,
) -> Result<NotificationPage, PersistenceError> {
    let inbox = || {
        let query = notifications::table
            .filter(notifications::employee_id.eq(employee_id))
            .into_boxed();
        if unread_only {
            query.filter(notifications::is_read.eq(0))
        } else {
            query
        }
    };

    let total: i64 = inbox().count().get_result(conn)?;
    let rows: Vec<NotificationRow> = inbox()
        .select(NotificationRow::as_select())
        .order((notifications::created_at.desc(), notifications::id.desc()))
        .limit(page.per_page)
        .offset(page.offset())
        .load(conn)?;

    Ok(NotificationPage {
        items: rows.into_iter().map(NotificationData::from).collect(),
        total,
        page: page.page,
        per_page: page.per_page,
        unread_count: unread_count(conn, employee_id)?,
    })
}

/// Checks that a notification belongs to the given inbox.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn owns_notification(
    conn: &mut SqliteConnection,
    employee_id: i64,
    notification_id: i64,
) -> Result<bool, PersistenceError> {
    let count: i64 = notifications::table
        .filter(notifications::id.eq(notification_id))
        .filter(notifications::employee_id.eq(employee_id))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}
