use std::env;
use std::str::FromStr;

use crate::error::AppError;

const DEFAULT_DATABASE_URL: &str = "sqlite://sqlite.db";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub max_connections: Option<u32>,
    pub slow_statement_ms: u64,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS")?,
            slow_statement_ms: parse_var(&lookup, "DB_SLOW_STATEMENT_MS")?.unwrap_or(500),
            log_dir: lookup("LOG_DIR").unwrap_or_else(|| "./logs".to_string()),
        })
    }

    pub fn is_postgres(&self) -> bool {
        self.database_url.starts_with("postgres://") || self.database_url.starts_with("postgresql://")
    }

    pub fn pool_size(&self) -> u32 {
        match self.max_connections {
            Some(n) => n,
            None if self.is_postgres() => 10,
            None => 5,
        }
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AppError::Configuration(format!("{} must be a number, got '{}'", key, raw))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.database_url, "sqlite://sqlite.db");
        assert!(!config.is_postgres());
        assert_eq!(config.pool_size(), 5);
        assert_eq!(config.slow_statement_ms, 500);
        assert_eq!(config.log_dir, "./logs");
    }

    #[test]
    fn test_postgres_url_selects_backend() {
        let config = config_from(&[("DATABASE_URL", "postgresql://localhost/travel")]).unwrap();
        assert!(config.is_postgres());
        assert_eq!(config.pool_size(), 10);

        let config = config_from(&[("DATABASE_URL", "postgres://localhost/travel"), ("DB_MAX_CONNECTIONS", "3")]).unwrap();
        assert_eq!(config.pool_size(), 3);
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let err = config_from(&[("DB_SLOW_STATEMENT_MS", "fast")]).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
