use database::db::DatabaseSettings;
use log::info;
use models::semester::Semester;
use std::{net::SocketAddr, time::Duration};
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_DATABASE_TIMEOUT_SECS: u64 = 5;
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {name}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime configuration, read from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    /// Semester used when a course listing does not name one
    pub current_semester: Semester,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Load configuration from the process environment, reading a `.env`
    /// file first if one exists
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            info!("Loaded environment from {}", path.display());
        }

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        let url = required("DATABASE_URL")?;
        let current_semester = parse("CURRENT_SEMESTER", required("CURRENT_SEMESTER")?)?;

        let bind_addr = parse(
            "BIND_ADDR",
            lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        )?;

        let timeout_secs: u64 = match lookup("DATABASE_TIMEOUT_SECS") {
            Some(value) => parse("DATABASE_TIMEOUT_SECS", value)?,
            None => DEFAULT_DATABASE_TIMEOUT_SECS,
        };

        let max_connections: u32 = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => parse("DATABASE_MAX_CONNECTIONS", value)?,
            None => DEFAULT_DATABASE_MAX_CONNECTIONS,
        };

        Ok(Self {
            database: DatabaseSettings {
                url,
                timeout: Duration::from_secs(timeout_secs),
                max_connections,
            },
            current_semester,
            bind_addr,
        })
    }
}

fn parse<T>(name: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|err: T::Err| ConfigError::Invalid {
        name,
        reason: err.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_apply() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/courses"),
            ("CURRENT_SEMESTER", "20163"),
        ]))
        .unwrap();

        assert_eq!(config.current_semester.as_str(), "20163");
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert_eq!(config.database.timeout, Duration::from_secs(5));
        assert_eq!(config.database.max_connections, 10);
    }

    #[test]
    fn test_missing_semester_is_an_error() {
        let err = AppConfig::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "postgres://localhost/courses",
        )]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::Missing("CURRENT_SEMESTER")));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/courses"),
            ("CURRENT_SEMESTER", "fall"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "CURRENT_SEMESTER",
                ..
            }
        ));

        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/courses"),
            ("CURRENT_SEMESTER", "20163"),
            ("DATABASE_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "DATABASE_TIMEOUT_SECS",
                ..
            }
        ));
    }
}
