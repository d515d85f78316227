//! Runtime configuration for the attendance core.
//!
//! # Responsibility
//! - Decode JSON configuration with defaults for every field.
//! - Validate settings before any subsystem is started.
//!
//! # Invariants
//! - A `CoreConfig` returned by `from_json_str`/`from_path` is valid.

use crate::logging::{default_log_level, normalize_level};
use crate::state::pagination::{Pagination, PaginationError, DEFAULT_ITEMS_PER_PAGE};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_ACTIVITY_LOG_FILE: &str = "activity.log";

/// Configuration loading and validation errors.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    UnsupportedLogLevel(String),
    RelativeLogDir(PathBuf),
    EmptyActivityLogPath,
    Pagination(PaginationError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
            Self::UnsupportedLogLevel(level) => {
                write!(f, "unsupported log level in config: `{level}`")
            }
            Self::RelativeLogDir(dir) => {
                write!(f, "log_dir must be an absolute path, got `{}`", dir.display())
            }
            Self::EmptyActivityLogPath => write!(f, "activity_log_path cannot be empty"),
            Self::Pagination(err) => write!(f, "invalid pagination config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Pagination(err) => Some(err),
            Self::UnsupportedLogLevel(_) | Self::RelativeLogDir(_) | Self::EmptyActivityLogPath => {
                None
            }
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<PaginationError> for ConfigError {
    fn from(value: PaginationError) -> Self {
        Self::Pagination(value)
    }
}

/// Core settings.
///
/// `log_dir = None` leaves diagnostics to whatever logger the host installed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
    pub activity_log_path: PathBuf,
    pub items_per_page: u32,
    pub initial_page: u32,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            activity_log_path: PathBuf::from(DEFAULT_ACTIVITY_LOG_FILE),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            initial_page: 1,
        }
    }
}

impl CoreConfig {
    /// Parses and validates JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Checks setting-level invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if normalize_level(&self.log_level).is_err() {
            return Err(ConfigError::UnsupportedLogLevel(self.log_level.clone()));
        }
        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::RelativeLogDir(dir.clone()));
            }
        }
        if self.activity_log_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyActivityLogPath);
        }
        self.pagination()?;
        Ok(())
    }

    /// Pagination state seeded from this config.
    pub fn pagination(&self) -> Result<Pagination, PaginationError> {
        Pagination::new(self.initial_page, self.items_per_page)
    }
}
