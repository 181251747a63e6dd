use std::env;

use secrecy::SecretString;
use thiserror::Error;

use crate::properties::{Properties, PropertiesError};

/// Effective application configuration, built from a properties file plus
/// `CLIENTELA_*` environment overrides.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    /// Kept for parity with the deployment interface; the SQLite driver does
    /// not consume credentials.
    pub username: Option<String>,
    pub password: Option<SecretString>,
    /// Extra driver options appended to the URL as a query string.
    pub options: Option<String>,
    pub max_connections: u32,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Properties(#[from] PropertiesError),
    #[error("invalid value for `{key}`: `{value}`")]
    InvalidValue { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    /// Builds the configuration from a loaded properties set. `db.url` is
    /// required; everything else falls back to defaults. Environment
    /// overrides are applied after the file, and the result is validated
    /// before it is handed out.
    pub fn from_properties(properties: &Properties) -> Result<Self, ConfigError> {
        let mut config = Self {
            database: DatabaseConfig {
                url: properties.get("db.url")?.to_string(),
                username: properties.get_optional("db.username").map(str::to_string),
                password: properties
                    .get_optional("db.password")
                    .map(|value| SecretString::from(value.to_string())),
                options: properties.get_optional("db.options").map(str::to_string),
                max_connections: match properties.get_optional("db.max_connections") {
                    Some(value) => parse_u32("db.max_connections", value)?,
                    None => 5,
                },
                timeout_secs: match properties.get_optional("db.timeout_secs") {
                    Some(value) => parse_u64("db.timeout_secs", value)?,
                    None => 30,
                },
            },
            logging: LoggingConfig {
                level: properties.get_optional("log.level").unwrap_or("info").to_string(),
                format: match properties.get_optional("log.format") {
                    Some(value) => value.parse()?,
                    None => LogFormat::Compact,
                },
            },
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("CLIENTELA_DATABASE_URL") {
            self.database.url = value;
        }
        if let Some(value) = read_env("CLIENTELA_DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections =
                parse_u32("CLIENTELA_DATABASE_MAX_CONNECTIONS", &value)?;
        }
        if let Some(value) = read_env("CLIENTELA_DATABASE_TIMEOUT_SECS") {
            self.database.timeout_secs = parse_u64("CLIENTELA_DATABASE_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = read_env("CLIENTELA_LOG_LEVEL") {
            self.logging.level = value;
        }
        if let Some(value) = read_env("CLIENTELA_LOG_FORMAT") {
            self.logging.format = value.parse()?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.database.url.trim();
        let sqlite_url =
            url.starts_with("sqlite://") || url.starts_with("sqlite::") || url == ":memory:";
        if !sqlite_url {
            return Err(ConfigError::Validation(
                "db.url must be a sqlite URL (`sqlite://...`, `sqlite::...`, or `:memory:`)"
                    .to_string(),
            ));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Validation(
                "db.max_connections must be greater than zero".to_string(),
            ));
        }

        if self.database.timeout_secs == 0 || self.database.timeout_secs > 300 {
            return Err(ConfigError::Validation(
                "db.timeout_secs must be in range 1..=300".to_string(),
            ));
        }

        let level = self.logging.level.trim().to_ascii_lowercase();
        match level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ConfigError::Validation(
                "log.level must be one of trace|debug|info|warn|error".to_string(),
            )),
        }
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
