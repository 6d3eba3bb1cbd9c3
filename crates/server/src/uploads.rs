// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Upload intake and storage.
//!
//! Files are checked against an extension allowlist, a size cap and the
//! declared content type, then written under the upload directory with a
//! generated name. Metadata is recorded by the caller afterwards; if that
//! fails the stored file is discarded.

use std::path::{Path, PathBuf};

use axum::body::Bytes;
use axum::extract::Multipart;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, warn};

/// Content type sent by clients that do not know better.
const GENERIC_CONTENT_TYPE: &str = "application/octet-stream";

/// Upload validation and storage errors.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file was uploaded")]
    MissingFile,
    #[error("Uploaded file is empty")]
    EmptyFile,
    #[error("File type '{0}' is not allowed")]
    UnsupportedExtension(String),
    #[error("Content type '{declared}' does not match a .{extension} file")]
    ContentTypeMismatch { declared: String, extension: String },
    #[error("File exceeds the {max} byte limit")]
    TooLarge { max: usize },
    #[error("Malformed upload: {0}")]
    Malformed(String),
    #[error("Could not store file: {0}")]
    Storage(#[from] std::io::Error),
}

/// What an upload is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Document,
    ProfileImage,
}

impl UploadKind {
    /// Subdirectory of the upload root for this kind.
    #[must_use]
    pub const fn subdirectory(self) -> &'static str {
        match self {
            Self::Document => "documents",
            Self::ProfileImage => "profile-images",
        }
    }

    fn allows(self, extension: &str) -> bool {
        match self {
            Self::Document => matches!(extension, "pdf" | "png" | "jpg" | "jpeg" | "doc" | "docx"),
            Self::ProfileImage => matches!(extension, "png" | "jpg" | "jpeg"),
        }
    }
}

fn content_type_for(extension: &str) -> &'static str {
    match extension {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => GENERIC_CONTENT_TYPE,
    }
}

/// A multipart upload as received.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub title: Option<String>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Option<Bytes>,
}

/// A file that passed validation.
#[derive(Debug)]
pub struct AcceptedUpload {
    /// Lower-case extension without the dot.
    pub extension: String,
    /// Canonical content type for the extension.
    pub content_type: &'static str,
    pub data: Bytes,
}

/// Reads the `title` and `file` fields of a multipart body.
///
/// Unknown fields are skipped.
///
/// # Errors
///
/// Returns `Malformed` if the body cannot be parsed.
pub async fn read_form(mut multipart: Multipart) -> Result<UploadForm, UploadError> {
    let mut form: UploadForm = UploadForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Malformed(e.body_text()))?
    {
        match field.name() {
            Some("title") => {
                form.title = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| UploadError::Malformed(e.body_text()))?,
                );
            }
            Some("file") => {
                form.file_name = field.file_name().map(str::to_string);
                form.content_type = field.content_type().map(str::to_string);
                form.data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| UploadError::Malformed(e.body_text()))?,
                );
            }
            other => debug!(field = ?other, "Ignoring multipart field"),
        }
    }
    Ok(form)
}

/// Checks a received file against the rules for `kind`.
///
/// # Errors
///
/// Returns an `UploadError` naming the first rule the file breaks.
pub fn validate(
    kind: UploadKind,
    file_name: Option<&str>,
    declared_type: Option<&str>,
    data: Option<Bytes>,
    max_bytes: usize,
) -> Result<AcceptedUpload, UploadError> {
    let data: Bytes = data.ok_or(UploadError::MissingFile)?;
    if data.is_empty() {
        return Err(UploadError::EmptyFile);
    }
    if data.len() > max_bytes {
        return Err(UploadError::TooLarge { max: max_bytes });
    }

    let extension: String = file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if !kind.allows(&extension) {
        return Err(UploadError::UnsupportedExtension(extension));
    }

    let content_type: &'static str = content_type_for(&extension);
    if let Some(declared) = declared_type {
        let declared: &str = declared.split(';').next().unwrap_or_default().trim();
        if !declared.eq_ignore_ascii_case(content_type) && declared != GENERIC_CONTENT_TYPE {
            return Err(UploadError::ContentTypeMismatch {
                declared: declared.to_string(),
                extension,
            });
        }
    }

    Ok(AcceptedUpload {
        extension,
        content_type,
        data,
    })
}

/// Builds a collision-resistant stored name.
#[must_use]
pub fn generated_name(employee_id: i64, extension: &str, now: OffsetDateTime) -> String {
    format!(
        "{employee_id}-{}-{:x}.{extension}",
        now.unix_timestamp(),
        rand::random::<u64>()
    )
}

/// Writes an accepted upload and returns its path relative to `root`.
///
/// # Errors
///
/// Returns `Storage` if the directory or file cannot be written.
pub async fn store(
    root: &Path,
    kind: UploadKind,
    employee_id: i64,
    upload: &AcceptedUpload,
) -> Result<String, UploadError> {
    let directory: PathBuf = root.join(kind.subdirectory());
    tokio::fs::create_dir_all(&directory).await?;

    let name: String = generated_name(employee_id, &upload.extension, OffsetDateTime::now_utc());
    tokio::fs::write(directory.join(&name), &upload.data).await?;

    let relative: String = format!("{}/{name}", kind.subdirectory());
    debug!(path = %relative, bytes = upload.data.len(), "Upload stored");
    Ok(relative)
}

/// Removes a stored upload that is no longer referenced.
pub async fn discard(root: &Path, relative: &str) {
    if let Err(e) = tokio::fs::remove_file(root.join(relative)).await {
        warn!(path = %relative, error = %e, "Failed to discard unreferenced upload");
    }
}
