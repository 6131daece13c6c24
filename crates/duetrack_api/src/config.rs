//! Process configuration for hosting the item surface.
//!
//! # Responsibility
//! - Resolve database and logging settings from environment variables with
//!   compiled defaults.
//! - Bootstrap the storage connection once at process start.
//!
//! # Invariants
//! - The connection is opened by the host edge and injected downward;
//!   nothing in the core holds a module-level connection.

use duetrack_core::db::{open_db, DbError};
use duetrack_core::init_logging;
use rusqlite::Connection;
use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

const DB_PATH_ENV: &str = "DUETRACK_DB_PATH";
const LOG_LEVEL_ENV: &str = "DUETRACK_LOG_LEVEL";
const LOG_DIR_ENV: &str = "DUETRACK_LOG_DIR";

const DEFAULT_DB_FILE: &str = "duetrack.sqlite3";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Resolved process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite database file opened at process start.
    pub db_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rolling logs; `None` leaves file logging off.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Reads configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            db_path: env::var(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            log_level: env::var(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
            log_dir: env::var(LOG_DIR_ENV).ok().map(PathBuf::from),
        }
    }

    /// Initializes logging (when configured) and opens the database.
    ///
    /// Called once at process start. The returned connection is injected
    /// into repositories and closed at shutdown by dropping it.
    pub fn bootstrap(&self) -> Result<Connection, BootstrapError> {
        if let Some(log_dir) = &self.log_dir {
            init_logging(&self.log_level, &log_dir.to_string_lossy())
                .map_err(BootstrapError::Logging)?;
        }
        open_db(&self.db_path).map_err(BootstrapError::Db)
    }
}

/// Failure during process bootstrap.
#[derive(Debug)]
pub enum BootstrapError {
    Logging(String),
    Db(DbError),
}

impl Display for BootstrapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(message) => write!(f, "logging bootstrap failed: {message}"),
            Self::Db(err) => write!(f, "database bootstrap failed: {err}"),
        }
    }
}

impl Error for BootstrapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(_) => None,
            Self::Db(err) => Some(err),
        }
    }
}
