use std::path::PathBuf;
use std::time::Duration;

use ecotour_core::retry::RetryPolicy;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on draining in-flight requests after a shutdown signal.
    pub shutdown_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Media object storage settings.
    pub storage: StorageConfig,
}

/// Where uploaded media lands and how uploads are retried.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Filesystem root; each bucket is a subdirectory.
    pub root: PathBuf,
    /// Base URL the stored objects are reachable under.
    pub public_url: String,
    /// Per-attempt upload timeout in seconds.
    pub timeout_secs: u64,
    /// Upload attempts before giving up.
    pub max_attempts: u32,
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
}

impl StorageConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            attempt_timeout: Duration::from_secs(self.timeout_secs),
            ..RetryPolicy::default()
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                         |
    /// |-------------------------|---------------------------------|
    /// | `HOST`                  | `0.0.0.0`                       |
    /// | `PORT`                  | `3000`                          |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`         |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                            |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                            |
    /// | `STORAGE_ROOT`          | `./storage`                     |
    /// | `STORAGE_PUBLIC_URL`    | `http://localhost:3000/media`   |
    /// | `STORAGE_TIMEOUT_SECS`  | `10`                            |
    /// | `STORAGE_MAX_ATTEMPTS`  | `3`                             |
    /// | `MAX_UPLOAD_BYTES`      | `10485760` (10 MiB)             |
    ///
    /// See [`JwtConfig::from_env`] for the JWT variables.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        let storage = StorageConfig {
            root: std::env::var("STORAGE_ROOT")
                .unwrap_or_else(|_| "./storage".into())
                .into(),
            public_url: std::env::var("STORAGE_PUBLIC_URL")
                .unwrap_or_else(|_| "http://localhost:3000/media".into()),
            timeout_secs: std::env::var("STORAGE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".into())
                .parse()
                .expect("STORAGE_TIMEOUT_SECS must be a valid u64"),
            max_attempts: std::env::var("STORAGE_MAX_ATTEMPTS")
                .unwrap_or_else(|_| "3".into())
                .parse()
                .expect("STORAGE_MAX_ATTEMPTS must be a valid u32"),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| "10485760".into())
                .parse()
                .expect("MAX_UPLOAD_BYTES must be a valid usize"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt,
            storage,
        }
    }
}
