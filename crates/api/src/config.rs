use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Startup configuration problems. The server refuses to start on any of these.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins, from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
    /// Directory evidence photos are written to and served from at `/uploads`.
    pub upload_dir: PathBuf,
    /// URL prefix under which stored photos are reachable.
    pub public_base_url: String,
    /// Largest accepted request body, multipart uploads included.
    pub max_upload_bytes: usize,
}

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:5000";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                                      |
    /// |------------------------|----------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                    |
    /// | `PORT`                 | `3000`                                       |
    /// | `CORS_ORIGINS`         | `http://localhost:3000,http://localhost:5000` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                         |
    /// | `JWT_SECRET`           | required                                     |
    /// | `JWT_EXPIRY_HOURS`     | `12`                                         |
    /// | `UPLOAD_DIR`           | `uploads`                                    |
    /// | `PUBLIC_BASE_URL`      | `http://localhost:3000/uploads`              |
    /// | `MAX_UPLOAD_BYTES`     | `10485760`                                   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; used directly by tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&lookup, "PORT", 3000)?,
            cors_origins,
            request_timeout_secs: parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?,
            jwt: JwtConfig::from_lookup(&lookup)?,
            upload_dir: PathBuf::from(lookup("UPLOAD_DIR").unwrap_or_else(|| "uploads".into())),
            public_base_url: lookup("PUBLIC_BASE_URL")
                .unwrap_or_else(|| "http://localhost:3000/uploads".into())
                .trim_end_matches('/')
                .to_string(),
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}

/// Parse `key` if present, else use `default`.
pub(crate) fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(value) => match value.trim().parse() {
            Ok(parsed) => Ok(parsed),
            Err(_) => Err(ConfigError::Invalid { key, value }),
        },
        None => Ok(default),
    }
}
