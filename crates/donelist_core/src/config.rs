//! Runtime configuration resolved from environment variables.
//!
//! # Invariants
//! - Blank values are treated as unset.
//! - `log_level` is always a normalized level name.

use crate::logging::{default_log_level, normalize_level, LoggingError};
use crate::storage::persistence::DEFAULT_STORAGE_KEY;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "DONELIST_DB_PATH";
pub const ENV_STORAGE_KEY: &str = "DONELIST_STORAGE_KEY";
pub const ENV_LOG_LEVEL: &str = "DONELIST_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "DONELIST_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "donelist.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(LoggingError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(err) => write!(f, "{ENV_LOG_LEVEL}: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidLogLevel(err) => Some(err),
        }
    }
}

/// Resolved settings for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite file holding the key-value table.
    pub db_path: PathBuf,
    /// Key under which the todo list is stored.
    pub storage_key: String,
    pub log_level: &'static str,
    /// File logging is disabled when `None`.
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Resolves configuration from the process environment.
    ///
    /// # Errors
    /// - `DONELIST_LOG_LEVEL` holds an unknown level.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    /// - The log level variable holds an unknown level.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let log_level = match value(ENV_LOG_LEVEL) {
            Some(raw) => normalize_level(&raw).map_err(ConfigError::InvalidLogLevel)?,
            None => default_log_level(),
        };

        Ok(Self {
            db_path: value(ENV_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(default_db_path),
            storage_key: value(ENV_STORAGE_KEY).unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
            log_level,
            log_dir: value(ENV_LOG_DIR).map(PathBuf::from),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

fn default_db_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, ENV_DB_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL, ENV_STORAGE_KEY};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn resolve(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(resolve(&[]).unwrap(), AppConfig::default());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = resolve(&[
            (ENV_DB_PATH, "/var/lib/donelist/todos.db"),
            (ENV_STORAGE_KEY, " work "),
            (ENV_LOG_LEVEL, "WARNING"),
            (ENV_LOG_DIR, "/var/log/donelist"),
        ])
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/var/lib/donelist/todos.db"));
        assert_eq!(config.storage_key, "work");
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/donelist")));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = resolve(&[(ENV_STORAGE_KEY, "   "), (ENV_LOG_DIR, "")]).unwrap();
        assert_eq!(config.storage_key, "todos");
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let err = resolve(&[(ENV_LOG_LEVEL, "loud")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(_)));
    }
}
