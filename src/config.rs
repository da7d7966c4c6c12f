//! Конфигурация запуска.
//!
//! Все чтения переменных окружения собраны здесь; значения из CLI
//! имеют приоритет над окружением.

use std::path::PathBuf;

use thiserror::Error;

/// Каталог хранилища.
pub const DATA_DIR_ENV: &str = "PADELSYNC_DATA_DIR";
/// Фильтр логов (синтаксис `EnvFilter`), если не задан `RUST_LOG`.
pub const LOG_ENV: &str = "PADELSYNC_LOG";

pub const DEFAULT_DATA_DIR: &str = ".padelsync";
pub const DEFAULT_LOG_FILTER: &str = "padelsync=info";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("data directory must not be empty")]
    EmptyDataDir,

    #[error("data directory {0} exists and is not a directory")]
    NotADirectory(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Где лежат записи хранилища (по файлу на ключ).
    pub data_dir: PathBuf,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Собрать конфиг из окружения с оверрайдами из CLI.
    pub fn from_env(data_dir_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::from_lookup(data_dir_override, |key| std::env::var(key).ok())
    }

    /// То же самое, но с произвольным источником переменных (для тестов).
    pub fn from_lookup(
        data_dir_override: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_dir = data_dir_override
            .or_else(|| lookup(DATA_DIR_ENV).map(PathBuf::from))
            .unwrap_or(defaults.data_dir);

        let log_filter = lookup(LOG_ENV)
            .filter(|f| !f.trim().is_empty())
            .unwrap_or(defaults.log_filter);

        let config = Self {
            data_dir,
            log_filter,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDataDir);
        }
        if self.data_dir.exists() && !self.data_dir.is_dir() {
            return Err(ConfigError::NotADirectory(self.data_dir.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_over_env() {
        let cfg = AppConfig::from_lookup(Some(PathBuf::from("/tmp/cli")), |key| match key {
            DATA_DIR_ENV => Some("/tmp/env".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(cfg.data_dir, PathBuf::from("/tmp/cli"));
        assert_eq!(cfg.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn empty_data_dir_is_rejected() {
        let err = AppConfig::from_lookup(Some(PathBuf::new()), |_| None).unwrap_err();
        assert_eq!(err, ConfigError::EmptyDataDir);
    }
}
