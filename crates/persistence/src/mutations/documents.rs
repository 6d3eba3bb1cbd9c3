// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::NewDocument;
use crate::diesel_schema::documents;
use crate::error::PersistenceError;

/// Records metadata for a stored upload.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_document(
    conn: &mut SqliteConnection,
    document: &NewDocument,
    now: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(documents::table)
        .values((
            documents::employee_id.eq(document.employee_id),
            documents::title.eq(&document.title),
            documents::file_path.eq(&document.file_path),
            documents::content_type.eq(&document.content_type),
            documents::size_bytes.eq(document.size_bytes),
            documents::uploaded_by.eq(document.uploaded_by),
            documents::created_at.eq(now),
        ))
        .execute(conn)?;

    let document_id: i64 = conn.get_last_insert_rowid()?;
    info!(document_id, employee_id = document.employee_id, "Document recorded");
    Ok(document_id)
}
