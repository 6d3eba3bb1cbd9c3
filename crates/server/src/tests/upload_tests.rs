// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::PathBuf;

use axum::body::Bytes;
use axum::http::StatusCode;
use time::macros::datetime;

use super::helpers::{
    ADMIN_EMAIL, TEST_PASSWORD, TestServer, create_test_server, login, register_report, send,
    send_upload,
};
use crate::uploads::{self, AcceptedUpload, UploadError, UploadKind};

const PDF_BYTES: &[u8] = b"%PDF-1.4 hrdesk test document";

// ============================================================================
// Validation rules
// ============================================================================

#[test]
fn test_document_accepts_pdf_and_canonicalizes_content_type() {
    let accepted: AcceptedUpload = uploads::validate(
        UploadKind::Document,
        Some("Contract.PDF"),
        Some("application/pdf"),
        Some(Bytes::from_static(PDF_BYTES)),
        1024,
    )
    .unwrap();

    assert_eq!(accepted.extension, "pdf");
    assert_eq!(accepted.content_type, "application/pdf");
}

#[test]
fn test_generic_content_type_is_accepted() {
    let accepted: AcceptedUpload = uploads::validate(
        UploadKind::Document,
        Some("cv.docx"),
        Some("application/octet-stream"),
        Some(Bytes::from_static(b"PK")),
        1024,
    )
    .unwrap();

    assert_eq!(
        accepted.content_type,
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
}

#[test]
fn test_profile_image_rejects_pdf() {
    let result: Result<AcceptedUpload, UploadError> = uploads::validate(
        UploadKind::ProfileImage,
        Some("photo.pdf"),
        None,
        Some(Bytes::from_static(PDF_BYTES)),
        1024,
    );

    assert!(matches!(result, Err(UploadError::UnsupportedExtension(ext)) if ext == "pdf"));
}

#[test]
fn test_file_without_extension_is_rejected() {
    let result: Result<AcceptedUpload, UploadError> = uploads::validate(
        UploadKind::Document,
        Some("README"),
        None,
        Some(Bytes::from_static(b"text")),
        1024,
    );

    assert!(matches!(result, Err(UploadError::UnsupportedExtension(ext)) if ext.is_empty()));
}

#[test]
fn test_mismatched_content_type_is_rejected() {
    let result: Result<AcceptedUpload, UploadError> = uploads::validate(
        UploadKind::Document,
        Some("scan.png"),
        Some("application/pdf"),
        Some(Bytes::from_static(b"\x89PNG")),
        1024,
    );

    assert!(matches!(result, Err(UploadError::ContentTypeMismatch { .. })));
}

#[test]
fn test_size_limits() {
    let too_large: Result<AcceptedUpload, UploadError> = uploads::validate(
        UploadKind::Document,
        Some("big.pdf"),
        None,
        Some(Bytes::from(vec![b'x'; 11])),
        10,
    );
    let empty: Result<AcceptedUpload, UploadError> = uploads::validate(
        UploadKind::Document,
        Some("empty.pdf"),
        None,
        Some(Bytes::new()),
        10,
    );
    let missing: Result<AcceptedUpload, UploadError> =
        uploads::validate(UploadKind::Document, None, None, None, 10);

    assert!(matches!(too_large, Err(UploadError::TooLarge { max: 10 })));
    assert!(matches!(empty, Err(UploadError::EmptyFile)));
    assert!(matches!(missing, Err(UploadError::MissingFile)));
}

#[test]
fn test_generated_name_keeps_employee_time_and_extension() {
    let name: String = uploads::generated_name(42, "pdf", datetime!(2026-03-01 10:00 UTC));

    assert!(name.starts_with("42-1772359200-"));
    assert!(name.ends_with(".pdf"));
}

// ============================================================================
// HTTP uploads
// ============================================================================

#[tokio::test]
async fn test_document_upload_is_stored_listed_and_served() {
    let server: TestServer = create_test_server();
    let admin: String = login(&server.app, ADMIN_EMAIL, TEST_PASSWORD).await;
    let erin_id: i64 = register_report(&server, &admin, "Erin Employee", "erin@example.com").await;
    let erin: String = login(&server.app, "erin@example.com", TEST_PASSWORD).await;

    let (status, body) = send_upload(
        &server.app,
        &format!("/employees/{erin_id}/documents"),
        &erin,
        "Signed contract",
        "contract.pdf",
        "application/pdf",
        PDF_BYTES,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let file_path: &str = body["file_path"].as_str().unwrap();
    assert!(file_path.starts_with("documents/"));
    assert_eq!(body["content_type"], "application/pdf");
    let stored: PathBuf = server.upload_dir.path().join(file_path);
    assert_eq!(std::fs::read(&stored).unwrap(), PDF_BYTES);

    let (status, listed) = send(
        &server.app,
        "GET",
        &format!("/employees/{erin_id}/documents"),
        Some(&erin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, _) = send(&server.app, "GET", &format!("/uploads/{file_path}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_bad_extension_is_rejected_before_storage() {
    let server: TestServer = create_test_server();
    let admin: String = login(&server.app, ADMIN_EMAIL, TEST_PASSWORD).await;

    let (status, body) = send_upload(
        &server.app,
        &format!("/employees/{}/documents", server.admin_id),
        &admin,
        "Installer",
        "setup.exe",
        "application/octet-stream",
        b"MZ",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
    assert!(!server.upload_dir.path().join("documents").exists());
}

#[tokio::test]
async fn test_rejected_metadata_discards_stored_file() {
    let server: TestServer = create_test_server();
    let admin: String = login(&server.app, ADMIN_EMAIL, TEST_PASSWORD).await;

    let (status, _) = send_upload(
        &server.app,
        &format!("/employees/{}/documents", server.admin_id),
        &admin,
        "   ",
        "contract.pdf",
        "application/pdf",
        PDF_BYTES,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let remaining: usize = std::fs::read_dir(server.upload_dir.path().join("documents"))
        .unwrap()
        .count();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn test_colleague_cannot_upload_to_another_employee() {
    let server: TestServer = create_test_server();
    let admin: String = login(&server.app, ADMIN_EMAIL, TEST_PASSWORD).await;
    let erin_id: i64 = register_report(&server, &admin, "Erin Employee", "erin@example.com").await;
    register_report(&server, &admin, "Finn Fellow", "finn@example.com").await;
    let finn: String = login(&server.app, "finn@example.com", TEST_PASSWORD).await;

    let (status, _) = send_upload(
        &server.app,
        &format!("/employees/{erin_id}/documents"),
        &finn,
        "Not mine",
        "contract.pdf",
        "application/pdf",
        PDF_BYTES,
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_profile_image_upload_updates_employee() {
    let server: TestServer = create_test_server();
    let admin: String = login(&server.app, ADMIN_EMAIL, TEST_PASSWORD).await;

    let (status, body) = send_upload(
        &server.app,
        "/employees/me/profile-image",
        &admin,
        "",
        "me.png",
        "image/png",
        b"\x89PNG\r\n",
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(
        body["profile_image"]
            .as_str()
            .unwrap()
            .starts_with("profile-images/")
    );
}

#[tokio::test]
async fn test_replacing_profile_image_removes_previous_file() {
    let server: TestServer = create_test_server();
    let admin: String = login(&server.app, ADMIN_EMAIL, TEST_PASSWORD).await;

    let (status, first) = send_upload(
        &server.app,
        "/employees/me/profile-image",
        &admin,
        "",
        "first.png",
        "image/png",
        b"\x89PNG\r\nfirst",
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{first}");
    let first_path: PathBuf = server
        .upload_dir
        .path()
        .join(first["profile_image"].as_str().unwrap());
    assert!(first_path.exists());

    let (status, second) = send_upload(
        &server.app,
        "/employees/me/profile-image",
        &admin,
        "",
        "second.jpg",
        "image/jpeg",
        b"\xff\xd8\xffsecond",
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{second}");
    let second_path: PathBuf = server
        .upload_dir
        .path()
        .join(second["profile_image"].as_str().unwrap());

    assert!(second_path.exists());
    assert!(!first_path.exists());
    let remaining: usize = std::fs::read_dir(server.upload_dir.path().join("profile-images"))
        .unwrap()
        .count();
    assert_eq!(remaining, 1);
}
