// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::Path;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use hrdesk_domain::{DEFAULT_HALF_DAY_MINUTES, WorkdayPolicy};
use hrdesk_persistence::{Persistence, RegisteredEmployee};
use serde_json::{Value, json};
use tempfile::TempDir;
use time::OffsetDateTime;
use tower::ServiceExt;

use crate::config::{AdminSeed, ServerConfig};
use crate::{AppState, bootstrap, build_router};

pub const TEST_SECRET: &str = "hrdesk-server-test-secret-with-plenty-of-bytes";
pub const ADMIN_EMAIL: &str = "ada@example.com";
pub const TEST_PASSWORD: &str = "Password1!";
pub const MULTIPART_BOUNDARY: &str = "hrdesk-test-boundary";

pub fn create_test_seed() -> AdminSeed {
    AdminSeed {
        name: String::from("Ada Admin"),
        email: String::from(ADMIN_EMAIL),
        password: String::from(TEST_PASSWORD),
        salary: 90_000.0,
    }
}

pub fn create_test_config(upload_dir: &Path) -> ServerConfig {
    ServerConfig {
        database: None,
        listen: "127.0.0.1:0".parse().unwrap(),
        jwt_secret: TEST_SECRET.as_bytes().to_vec(),
        upload_dir: upload_dir.to_path_buf(),
        max_upload_bytes: 1024,
        policy: WorkdayPolicy::new("UTC", "09:30", DEFAULT_HALF_DAY_MINUTES).unwrap(),
        production: false,
        admin: Some(create_test_seed()),
        init_only: false,
    }
}

/// A router over a fresh in-memory database with one administrator.
pub struct TestServer {
    pub app: Router,
    pub persistence: Persistence,
    pub upload_dir: TempDir,
    pub admin_id: i64,
}

pub fn create_test_server() -> TestServer {
    let upload_dir: TempDir = tempfile::tempdir().expect("Failed to create upload dir");
    let config: ServerConfig = create_test_config(upload_dir.path());
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create persistence");
    let admin: RegisteredEmployee =
        bootstrap::ensure_administrator(&persistence, config.admin.as_ref())
            .expect("Bootstrap failed")
            .expect("Administrator not created");
    let app_state: AppState =
        AppState::new(persistence.clone(), config).expect("Failed to create app state");

    TestServer {
        app: build_router(app_state),
        persistence,
        upload_dir,
        admin_id: admin.id,
    }
}

pub fn january(day: u8) -> String {
    format!("{}-01-{day:02}", OffsetDateTime::now_utc().year())
}

async fn dispatch(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// Sends a request with an optional bearer token and JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let body: Body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    dispatch(app, builder.body(body).unwrap()).await
}

/// Sends a multipart upload with a `title` and a `file` field.
pub async fn send_upload(
    app: &Router,
    uri: &str,
    token: &str,
    title: &str,
    file_name: &str,
    content_type: &str,
    data: &[u8],
) -> (StatusCode, Value) {
    let mut body: Vec<u8> = Vec::new();
    body.extend_from_slice(
        format!(
            "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\n{title}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!(
            "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    let request: Request<Body> = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    dispatch(app, request).await
}

pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

/// Registers a regular employee reporting to the administrator.
pub async fn register_report(server: &TestServer, admin_token: &str, name: &str, email: &str) -> i64 {
    let (status, body) = send(
        &server.app,
        "POST",
        "/auth/register",
        Some(admin_token),
        Some(json!({
            "name": name,
            "email": email,
            "password": TEST_PASSWORD,
            "reports_to": server.admin_id,
            "hire_date": "2024-01-15",
            "initial_salary": 52_000.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");
    body["id"].as_i64().unwrap()
}
