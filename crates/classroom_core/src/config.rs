//! Runtime configuration for hosts embedding the core.
//!
//! Values come from the environment with fallbacks, so the CLI probe and
//! tests can run without any setup.

use crate::logging::default_log_level;
use std::path::PathBuf;

/// Env var overriding the SQLite storage file.
pub const DB_PATH_ENV: &str = "CLASSROOM_DB_PATH";
/// Env var overriding the log level.
pub const LOG_LEVEL_ENV: &str = "CLASSROOM_LOG_LEVEL";
/// Env var enabling file logging in the given absolute directory.
pub const LOG_DIR_ENV: &str = "CLASSROOM_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "classroom_storage.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// File logging stays off when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = read(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = read(LOG_LEVEL_ENV) {
            config.log_level = level;
        }
        config.log_dir = read(LOG_DIR_ENV).map(PathBuf::from);
        config
    }
}
