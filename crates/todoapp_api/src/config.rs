//! Server configuration loaded from environment variables.
//!
//! # Responsibility
//! - Read `TODOAPP_*` variables (a `.env` file is honored by the binary).
//! - Validate every value before the server starts.
//!
//! # Invariants
//! - Parsing is pure over a lookup function, so tests never touch the
//!   process environment.
//! - Unset or blank variables fall back to documented defaults.

use axum::http::HeaderValue;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

pub const ENV_DB_PATH: &str = "TODOAPP_DB_PATH";
pub const ENV_HOST: &str = "TODOAPP_HOST";
pub const ENV_PORT: &str = "TODOAPP_PORT";
pub const ENV_LOG_LEVEL: &str = "TODOAPP_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "TODOAPP_LOG_DIR";
pub const ENV_CORS_ORIGINS: &str = "TODOAPP_CORS_ORIGINS";

const DEFAULT_DB_PATH: &str = "todoapp.sqlite3";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5080;
const DEFAULT_LOG_DIR_NAME: &str = "logs";

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationError {
    pub variable: &'static str,
    pub message: String,
}

impl Display for ConfigurationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.variable, self.message)
    }
}

impl Error for ConfigurationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub db_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub log_dir: PathBuf,
    /// Empty means any origin is allowed.
    pub cors_origins: Vec<HeaderValue>,
}

impl ServerConfig {
    /// Reads the process environment. `log_dir` defaults to `<cwd>/logs`.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        let cwd = std::env::current_dir().map_err(|err| ConfigurationError {
            variable: ENV_LOG_DIR,
            message: format!("cannot resolve current directory: {err}"),
        })?;
        Self::from_lookup(|name| std::env::var(name).ok(), &cwd)
    }

    /// Builds the configuration from `lookup`, resolving defaults against
    /// `working_dir`.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        working_dir: &Path,
    ) -> Result<Self, ConfigurationError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = read(ENV_DB_PATH).map_or_else(|| PathBuf::from(DEFAULT_DB_PATH), PathBuf::from);

        let host_text = read(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host: IpAddr = host_text.parse().map_err(|_| ConfigurationError {
            variable: ENV_HOST,
            message: format!("`{host_text}` is not an IP address"),
        })?;

        let port = match read(ENV_PORT) {
            Some(text) => text.parse::<u16>().map_err(|_| ConfigurationError {
                variable: ENV_PORT,
                message: format!("`{text}` is not a port number"),
            })?,
            None => DEFAULT_PORT,
        };

        let log_level = read(ENV_LOG_LEVEL)
            .map(|value| value.to_ascii_lowercase())
            .unwrap_or_else(|| todoapp_core::default_log_level().to_string());
        if !matches!(
            log_level.as_str(),
            "trace" | "debug" | "info" | "warn" | "warning" | "error"
        ) {
            return Err(ConfigurationError {
                variable: ENV_LOG_LEVEL,
                message: format!("`{log_level}` is not one of trace|debug|info|warn|error"),
            });
        }

        let log_dir = match read(ENV_LOG_DIR) {
            Some(text) => {
                let path = PathBuf::from(&text);
                if !path.is_absolute() {
                    return Err(ConfigurationError {
                        variable: ENV_LOG_DIR,
                        message: format!("`{text}` must be an absolute path"),
                    });
                }
                path
            }
            None => working_dir.join(DEFAULT_LOG_DIR_NAME),
        };

        let cors_origins = read(ENV_CORS_ORIGINS)
            .map(|text| parse_origins(&text))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            db_path,
            bind_addr: SocketAddr::new(host, port),
            log_level,
            log_dir,
            cors_origins,
        })
    }
}

fn parse_origins(text: &str) -> Result<Vec<HeaderValue>, ConfigurationError> {
    text.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ConfigurationError {
                variable: ENV_CORS_ORIGINS,
                message: format!("`{origin}` is not a valid origin"),
            })
        })
        .collect()
}
