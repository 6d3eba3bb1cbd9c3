// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use clap::Parser;

use super::helpers::TEST_SECRET;
use crate::config::{
    Args, ConfigError, DEFAULT_ADMIN_NAME, DEFAULT_MAX_UPLOAD_BYTES, ServerConfig,
};

fn parse(extra: &[&str]) -> Args {
    let mut argv: Vec<&str> = vec!["hrdesk-server"];
    argv.extend_from_slice(extra);
    Args::try_parse_from(argv).expect("Failed to parse arguments")
}

#[test]
fn test_defaults_generate_a_random_secret() {
    let config: ServerConfig = ServerConfig::from_args(parse(&[])).unwrap();

    assert_eq!(config.listen.to_string(), "127.0.0.1:3000");
    assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    assert_eq!(config.jwt_secret.len(), 64);
    assert!(config.database.is_none());
    assert!(config.admin.is_none());
    assert!(config.expose_details());
}

#[test]
fn test_production_requires_secret() {
    let result: Result<ServerConfig, ConfigError> =
        ServerConfig::from_args(parse(&["--production"]));

    assert!(matches!(result, Err(ConfigError::MissingSecret)));
}

#[test]
fn test_production_hides_details() {
    let config: ServerConfig =
        ServerConfig::from_args(parse(&["--production", "--jwt-secret", TEST_SECRET])).unwrap();

    assert!(!config.expose_details());
    assert_eq!(config.jwt_secret, TEST_SECRET.as_bytes());
}

#[test]
fn test_short_secret_is_rejected() {
    let result: Result<ServerConfig, ConfigError> =
        ServerConfig::from_args(parse(&["--jwt-secret", "short"]));

    assert!(matches!(result, Err(ConfigError::SecretTooShort { min: 32 })));
}

#[test]
fn test_unknown_timezone_is_rejected() {
    let result: Result<ServerConfig, ConfigError> =
        ServerConfig::from_args(parse(&["--timezone", "Mars/Olympus"]));

    assert!(matches!(result, Err(ConfigError::InvalidWorkday(_))));
}

#[test]
fn test_zero_upload_limit_is_rejected() {
    let result: Result<ServerConfig, ConfigError> =
        ServerConfig::from_args(parse(&["--max-upload-bytes", "0"]));

    assert!(matches!(result, Err(ConfigError::ZeroUploadLimit)));
}

#[test]
fn test_partial_administrator_is_rejected() {
    let result: Result<ServerConfig, ConfigError> =
        ServerConfig::from_args(parse(&["--admin-email", "ada@example.com"]));

    assert!(matches!(result, Err(ConfigError::IncompleteAdministrator)));
}

#[test]
fn test_administrator_name_defaults() {
    let config: ServerConfig = ServerConfig::from_args(parse(&[
        "--admin-email",
        "ada@example.com",
        "--admin-password",
        "Password1!",
        "--admin-salary",
        "1000",
        "--bind",
        "0.0.0.0",
        "--port",
        "8080",
    ]))
    .unwrap();

    let admin = config.admin.unwrap();
    assert_eq!(admin.name, DEFAULT_ADMIN_NAME);
    assert!((admin.salary - 1000.0).abs() < f64::EPSILON);
    assert_eq!(config.listen.to_string(), "0.0.0.0:8080");
}
