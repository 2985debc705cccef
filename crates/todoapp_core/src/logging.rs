//! Process logging bootstrap.
//!
//! # Responsibility
//! - Start one rolling file logger per process, optionally mirrored to stderr.
//! - Capture panics as sanitized `event=panic_captured` records.
//!
//! # Invariants
//! - Starting twice with an equal `LogConfig` is a no-op; a different one is
//!   rejected.
//! - Initialization never panics.
//! - Todo titles, descriptions and note content are never logged.

use flexi_logger::{
    Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "todoapp";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static ACTIVE_LOGGER: OnceCell<(LogConfig, LoggerHandle)> = OnceCell::new();

/// Where and how verbosely the process logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    level: &'static str,
    log_dir: PathBuf,
    mirror_stderr: bool,
}

impl LogConfig {
    /// Checks `level` (`trace|debug|info|warn|error`, `warning` accepted)
    /// and requires an absolute `log_dir`.
    pub fn new(level: &str, log_dir: &Path, mirror_stderr: bool) -> Result<Self, String> {
        if !log_dir.is_absolute() {
            return Err(format!(
                "log_dir must be an absolute path, got `{}`",
                log_dir.display()
            ));
        }
        Ok(Self {
            level: normalize_level(level)?,
            log_dir: log_dir.to_path_buf(),
            mirror_stderr,
        })
    }

    pub fn level(&self) -> &'static str {
        self.level
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// Starts process logging.
///
/// # Errors
/// - The log directory cannot be created or the backend fails to start.
/// - Logging is already running with a different configuration.
pub fn init_logging(config: &LogConfig) -> Result<(), String> {
    let (active, _) = ACTIVE_LOGGER.get_or_try_init(|| start_logger(config))?;
    if active != config {
        return Err(format!(
            "logging already initialized with level `{}` at `{}`; refusing to switch",
            active.level,
            active.log_dir.display()
        ));
    }
    Ok(())
}

fn start_logger(config: &LogConfig) -> Result<(LogConfig, LoggerHandle), String> {
    std::fs::create_dir_all(&config.log_dir).map_err(|err| {
        format!(
            "failed to create log directory `{}`: {err}",
            config.log_dir.display()
        )
    })?;

    let duplicate = if config.mirror_stderr {
        duplicate_for(config.level)
    } else {
        Duplicate::None
    };
    let handle = Logger::try_with_str(config.level)
        .map_err(|err| format!("invalid log level `{}`: {err}", config.level))?
        .log_to_file(
            FileSpec::default()
                .directory(config.log_dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .duplicate_to_stderr(duplicate)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    install_panic_hook();
    info!(
        "event=logging_init module=logging status=ok level={} log_dir={} stderr={} version={}",
        config.level,
        config.log_dir.display(),
        config.mirror_stderr,
        env!("CARGO_PKG_VERSION")
    );
    Ok((config.clone(), handle))
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

fn duplicate_for(level: &str) -> Duplicate {
    match level {
        "trace" => Duplicate::Trace,
        "debug" => Duplicate::Debug,
        "info" => Duplicate::Info,
        "warn" => Duplicate::Warn,
        _ => Duplicate::Error,
    }
}

// Only reached from `start_logger`, which runs at most once.
fn install_panic_hook() {
    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = if let Some(message) = panic_info.payload().downcast_ref::<&str>() {
            (*message).to_string()
        } else if let Some(message) = panic_info.payload().downcast_ref::<String>() {
            message.clone()
        } else {
            "non-string panic payload".to_string()
        };
        error!(
            "event=panic_captured module=logging status=error location={} payload={}",
            location,
            single_line(&payload, MAX_PANIC_PAYLOAD_CHARS)
        );
        previous_hook(panic_info);
    }));
}

/// Panic payloads may carry user text: newlines go, length is capped.
fn single_line(value: &str, max_chars: usize) -> String {
    let flattened = value.replace(['\n', '\r'], " ");
    let mut line = flattened.chars().take(max_chars).collect::<String>();
    if flattened.chars().count() > max_chars {
        line.push_str("...");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::{duplicate_for, init_logging, single_line, LogConfig};
    use flexi_logger::Duplicate;
    use std::path::Path;

    #[test]
    fn config_normalizes_level_and_requires_absolute_dir() {
        let dir = std::env::temp_dir();
        assert_eq!(LogConfig::new(" WARNING ", &dir, false).unwrap().level(), "warn");
        assert!(LogConfig::new("verbose", &dir, false).is_err());

        let err = LogConfig::new("info", Path::new("logs/dev"), false).unwrap_err();
        assert!(err.contains("absolute"));
    }

    #[test]
    fn stderr_mirror_follows_level() {
        assert!(matches!(duplicate_for("debug"), Duplicate::Debug));
        assert!(matches!(duplicate_for("warn"), Duplicate::Warn));
        assert!(matches!(duplicate_for("error"), Duplicate::Error));
    }

    #[test]
    fn single_line_strips_newlines_and_truncates() {
        let line = single_line("line1\nline2\rline3", 8);
        assert_eq!(line, "line1 li...");
        assert_eq!(single_line("short", 8), "short");
    }

    #[test]
    fn init_is_idempotent_and_rejects_a_different_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig::new("info", dir.path(), false).unwrap();

        init_logging(&config).unwrap();
        init_logging(&config).unwrap();

        let louder = LogConfig::new("debug", dir.path(), false).unwrap();
        assert!(init_logging(&louder).unwrap_err().contains("refusing to switch"));
        let elsewhere = LogConfig::new("info", &dir.path().join("other"), false).unwrap();
        assert!(init_logging(&elsewhere).is_err());
    }
}
