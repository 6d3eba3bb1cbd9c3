// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::DocumentData;
use crate::diesel_schema::documents;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = documents)]
struct DocumentRow {
    id: i64,
    employee_id: i64,
    title: String,
    file_path: String,
    content_type: String,
    size_bytes: i64,
    uploaded_by: i64,
    created_at: String,
}

impl From<DocumentRow> for DocumentData {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: row.id,
            employee_id: row.employee_id,
            title: row.title,
            file_path: row.file_path,
            content_type: row.content_type,
            size_bytes: row.size_bytes,
            uploaded_by: row.uploaded_by,
            created_at: row.created_at,
        }
    }
}

/// Lists an employee's documents, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_documents(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Vec<DocumentData>, PersistenceError> {
    let rows: Vec<DocumentRow> = documents::table
        .filter(documents::employee_id.eq(employee_id))
        .select(DocumentRow::as_select())
        .order((documents::created_at.desc(), documents::id.desc()))
        .load(conn)?;
    Ok(rows.into_iter().map(DocumentData::from).collect())
}

/// Retrieves a document by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the document is not found.
pub fn find_document(
    conn: &mut SqliteConnection,
    document_id: i64,
) -> Result<Option<DocumentData>, PersistenceError> {
    let row: Option<DocumentRow> = documents::table
        .filter(documents::id.eq(document_id))
        .select(DocumentRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.map(DocumentData::from))
}
