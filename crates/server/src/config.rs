// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command-line and environment configuration.
//!
//! Every option can be given as a flag or through its `HRDESK_*`
//! environment variable. [`Args`] is validated once at startup into a
//! [`ServerConfig`]; handlers only ever see the validated form.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use hrdesk_api::MIN_SECRET_BYTES;
use hrdesk_domain::{DEFAULT_HALF_DAY_MINUTES, DEFAULT_LATE_AFTER, DomainError, WorkdayPolicy};
use thiserror::Error;
use tracing::warn;

/// Default cap on a single uploaded file.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Name given to the first administrator when none is configured.
pub const DEFAULT_ADMIN_NAME: &str = "Administrator";

/// hrdesk Server - HTTP server for the hrdesk HR backend
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "HRDESK_DATABASE")]
    pub database: Option<PathBuf>,

    /// Port to bind the server to
    #[arg(short, long, env = "HRDESK_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Address to bind the server to
    #[arg(long, env = "HRDESK_BIND", default_value = "127.0.0.1")]
    pub bind: IpAddr,

    /// Secret used to sign session and password-reset tokens
    #[arg(long, env = "HRDESK_JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// Directory where uploaded documents and images are stored
    #[arg(long, env = "HRDESK_UPLOAD_DIR", default_value = "uploads")]
    pub upload_dir: PathBuf,

    /// Largest accepted upload, in bytes
    #[arg(long, env = "HRDESK_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    /// IANA time zone used for attendance dates
    #[arg(long, env = "HRDESK_TIMEZONE", default_value = "UTC")]
    pub timezone: String,

    /// Local `HH:MM` after which a check-in counts as late
    #[arg(long, env = "HRDESK_LATE_AFTER", default_value = DEFAULT_LATE_AFTER)]
    pub late_after: String,

    /// Production mode: requires a signing secret and hides fault details
    #[arg(long, env = "HRDESK_PRODUCTION")]
    pub production: bool,

    /// Email of the first administrator, created when the database is empty
    #[arg(long, env = "HRDESK_ADMIN_EMAIL")]
    pub admin_email: Option<String>,

    /// Password of the first administrator
    #[arg(long, env = "HRDESK_ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<String>,

    /// Display name of the first administrator
    #[arg(long, env = "HRDESK_ADMIN_NAME")]
    pub admin_name: Option<String>,

    /// Initial salary of the first administrator
    #[arg(long, env = "HRDESK_ADMIN_SALARY")]
    pub admin_salary: Option<f64>,

    /// Apply migrations and create the first administrator, then exit
    #[arg(long)]
    pub init_only: bool,
}

/// Configuration errors detected at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Production mode was requested without a signing secret.
    #[error("HRDESK_JWT_SECRET is required in production mode")]
    MissingSecret,
    /// The signing secret is too short.
    #[error("HRDESK_JWT_SECRET must be at least {min} bytes")]
    SecretTooShort { min: usize },
    /// The time zone or late-after time is invalid.
    #[error("Invalid workday settings: {0}")]
    InvalidWorkday(#[from] DomainError),
    /// An upload limit of zero would reject every file.
    #[error("HRDESK_MAX_UPLOAD_BYTES must be greater than zero")]
    ZeroUploadLimit,
    /// Only part of the first administrator was configured.
    #[error("HRDESK_ADMIN_EMAIL, HRDESK_ADMIN_PASSWORD and HRDESK_ADMIN_SALARY must be set together")]
    IncompleteAdministrator,
}

/// The first administrator to create in an empty database.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub name: String,
    pub email: String,
    pub password: String,
    pub salary: f64,
}

/// Validated server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Database file, or `None` for an in-memory database.
    pub database: Option<PathBuf>,
    /// Address to listen on.
    pub listen: SocketAddr,
    /// Token signing secret.
    pub jwt_secret: Vec<u8>,
    /// Root of the upload store.
    pub upload_dir: PathBuf,
    /// Largest accepted upload, in bytes.
    pub max_upload_bytes: usize,
    /// Clock rules for attendance.
    pub policy: WorkdayPolicy,
    /// Production mode.
    pub production: bool,
    /// First administrator, if configured.
    pub admin: Option<AdminSeed>,
    /// Exit after initialization.
    pub init_only: bool,
}

impl ServerConfig {
    /// Validates parsed arguments.
    ///
    /// Outside production a missing secret is replaced with a random one,
    /// which invalidates every session on restart.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` describing the first invalid setting.
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let jwt_secret: Vec<u8> = match args.jwt_secret {
            Some(secret) if secret.len() < MIN_SECRET_BYTES => {
                return Err(ConfigError::SecretTooShort {
                    min: MIN_SECRET_BYTES,
                });
            }
            Some(secret) => secret.into_bytes(),
            None if args.production => return Err(ConfigError::MissingSecret),
            None => {
                warn!("HRDESK_JWT_SECRET not set; using a random secret for this run");
                random_secret()
            }
        };

        if args.max_upload_bytes == 0 {
            return Err(ConfigError::ZeroUploadLimit);
        }

        let policy: WorkdayPolicy =
            WorkdayPolicy::new(&args.timezone, &args.late_after, DEFAULT_HALF_DAY_MINUTES)?;

        let admin: Option<AdminSeed> = match (args.admin_email, args.admin_password, args.admin_salary) {
            (None, None, None) => None,
            (Some(email), Some(password), Some(salary)) => Some(AdminSeed {
                name: args
                    .admin_name
                    .unwrap_or_else(|| DEFAULT_ADMIN_NAME.to_string()),
                email,
                password,
                salary,
            }),
            _ => return Err(ConfigError::IncompleteAdministrator),
        };

        Ok(Self {
            database: args.database,
            listen: SocketAddr::new(args.bind, args.port),
            jwt_secret,
            upload_dir: args.upload_dir,
            max_upload_bytes: args.max_upload_bytes,
            policy,
            production: args.production,
            admin,
            init_only: args.init_only,
        })
    }

    /// Whether error responses may carry fault details.
    #[must_use]
    pub const fn expose_details(&self) -> bool {
        !self.production
    }
}

fn random_secret() -> Vec<u8> {
    (0..8)
        .flat_map(|_| rand::random::<u64>().to_le_bytes())
        .collect()
}
