//! Structured logging setup.
//!
//! Logging is off unless a level is passed or `MIPMODEL_TRACE` is set. The
//! level string is an [`EnvFilter`] directive, so `mipmodel_core=debug` works
//! as well as a bare `debug`.

use std::env;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const TRACE_ENV: &str = "MIPMODEL_TRACE";
pub const LOG_FORMAT_ENV: &str = "MIPMODEL_LOG_FORMAT";
pub const LOG_FILE_ENV: &str = "MIPMODEL_LOG_FILE";

/// Errors produced while installing the logging subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("[LOG_INVALID_FILTER] invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },
    #[error("[LOG_INVALID_FORMAT] invalid MIPMODEL_LOG_FORMAT '{0}' (expected 'json' or 'pretty')")]
    InvalidFormat(String),
    #[error("[LOG_FILE] failed to open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("[LOG_INIT] failed to initialize logging: {0}")]
    Init(String),
}

impl LoggingError {
    pub fn code(&self) -> &'static str {
        match self {
            LoggingError::InvalidFilter { .. } => "LOG_INVALID_FILTER",
            LoggingError::InvalidFormat(_) => "LOG_INVALID_FORMAT",
            LoggingError::LogFile { .. } => "LOG_FILE",
            LoggingError::Init(_) => "LOG_INIT",
        }
    }
}

/// Output format of every installed layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Result<Self, LoggingError> {
        if value.eq_ignore_ascii_case("pretty") {
            Ok(LogFormat::Pretty)
        } else if value.eq_ignore_ascii_case("json") {
            Ok(LogFormat::Json)
        } else {
            Err(LoggingError::InvalidFormat(value.to_string()))
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoggingConfig {
    /// Filter directive; `None` means off.
    pub level: Option<String>,
    pub format: LogFormat,
    /// Extra non-ANSI layer appending to this file.
    pub log_file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, LoggingError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LoggingError> {
        let format = match lookup(LOG_FORMAT_ENV) {
            Some(value) => LogFormat::parse(&value)?,
            None => LogFormat::default(),
        };
        Ok(Self {
            level: lookup(TRACE_ENV),
            format,
            log_file: lookup(LOG_FILE_ENV).map(PathBuf::from),
        })
    }

    /// Override the level when one is given.
    pub fn with_level(mut self, level: Option<String>) -> Self {
        if level.is_some() {
            self.level = level;
        }
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Build the filter for the configured level.
    pub fn filter(&self) -> Result<EnvFilter, LoggingError> {
        match self.level.as_deref() {
            None => Ok(EnvFilter::default().add_directive(LevelFilter::OFF.into())),
            Some(level) if level.eq_ignore_ascii_case("off") => {
                Ok(EnvFilter::default().add_directive(LevelFilter::OFF.into()))
            }
            Some(level) => {
                EnvFilter::try_new(level).map_err(|err| LoggingError::InvalidFilter {
                    filter: level.to_string(),
                    reason: err.to_string(),
                })
            }
        }
    }

    /// Install the global subscriber.
    ///
    /// Returns `Ok(false)` when a subscriber is already configured.
    pub fn init(&self) -> Result<bool, LoggingError> {
        if tracing::dispatcher::has_been_set() {
            return Ok(false);
        }

        let filter = self.filter()?;
        let log_file = self.log_file.as_deref().map(open_log_file).transpose()?;

        match self.format {
            LogFormat::Json => {
                let stderr_layer = tracing_subscriber::fmt::layer()
                    .with_writer(io::stderr)
                    .json();
                let file_layer = log_file.map(|file| {
                    tracing_subscriber::fmt::layer()
                        .with_writer(file)
                        .with_ansi(false)
                        .json()
                });
                tracing_subscriber::registry()
                    .with(filter)
                    .with(stderr_layer)
                    .with(file_layer)
                    .try_init()
                    .map_err(map_init_err)?;
            }
            LogFormat::Pretty => {
                let stderr_layer = tracing_subscriber::fmt::layer()
                    .with_writer(io::stderr)
                    .pretty();
                let file_layer = log_file.map(|file| {
                    tracing_subscriber::fmt::layer()
                        .with_writer(file)
                        .with_ansi(false)
                        .pretty()
                });
                tracing_subscriber::registry()
                    .with(filter)
                    .with(stderr_layer)
                    .with(file_layer)
                    .try_init()
                    .map_err(map_init_err)?;
            }
        }

        tracing::debug!(
            component = "logging",
            operation = "init",
            status = "success",
            format = ?self.format,
            "Logging enabled"
        );
        Ok(true)
    }
}

fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::LogFile {
            path: path.to_path_buf(),
            source,
        })
}

fn map_init_err<E: std::fmt::Display>(err: E) -> LoggingError {
    LoggingError::Init(err.to_string())
}

/// Enable structured logging.
///
/// When `level` is None, this reads `MIPMODEL_TRACE` if set. If
/// `MIPMODEL_TRACE` is unset, the default level is `off`. Returns true when
/// logging is initialized, false if a subscriber is already configured.
pub fn enable_logging(level: Option<String>) -> Result<bool, LoggingError> {
    LoggingConfig::from_env()?.with_level(level).init()
}
