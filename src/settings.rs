use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env::{self, VarError}, fmt, str::FromStr};
use url::Url;

use crate::constants::{
    DATABASE_URL_ENV, DEFAULT_DB_HOST, DEFAULT_DB_NAME, DEFAULT_DB_PASSWORD, DEFAULT_DB_PORT,
    DEFAULT_DB_USERNAME,
};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    /// Taken from `APP_ENV` before the sources are merged.
    #[serde(skip_deserializing, default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    /// Always resolved from `DATABASE_URL`, never from config files.
    #[serde(skip_deserializing, default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_connect_retries")]
    pub connect_retries: u32,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Alumni-Registry".to_string()
}
fn default_max_connections() -> u32 {
    5
}
fn default_connect_retries() -> u32 {
    5
}
fn default_log_level() -> String {
    "info".to_string()
}

/// The fallback connection string: a local instance with placeholder credentials.
pub fn default_database_url() -> String {
    format!(
        "postgresql://{}:{}@{}:{}/{}",
        DEFAULT_DB_USERNAME, DEFAULT_DB_PASSWORD, DEFAULT_DB_HOST, DEFAULT_DB_PORT, DEFAULT_DB_NAME
    )
}

/// Picks the override verbatim when it carries a value, the default otherwise.
/// A blank override counts as absent.
pub fn resolve_database_url(override_url: Option<String>) -> String {
    match override_url {
        Some(url) if !url.trim().is_empty() => url,
        _ => default_database_url(),
    }
}

/// Turns the raw `DATABASE_URL` lookup into a connection string. Only an
/// unset variable falls back to the default; a value that is set but not
/// valid UTF-8 is an error rather than a silent fallback.
pub fn database_url_from_env(lookup: Result<String, VarError>) -> Result<String, ConfigError> {
    match lookup {
        Ok(url) => Ok(resolve_database_url(Some(url))),
        Err(VarError::NotPresent) => Ok(resolve_database_url(None)),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::Message(format!(
            "{} is not valid UTF-8",
            DATABASE_URL_ENV
        ))),
    }
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .try_parsing(true)
                    .ignore_empty(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;
        config.database_url = database_url_from_env(env::var(DATABASE_URL_ENV))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.database_url.trim().is_empty() {
            errors.push("DATABASE_URL cannot be empty".to_string());
        } else {
            match Url::parse(&self.database_url) {
                Ok(url) if matches!(url.scheme(), "postgres" | "postgresql") => {}
                Ok(url) => errors.push(format!(
                    "DATABASE_URL must use the postgres scheme, got '{}'",
                    url.scheme()
                )),
                Err(e) => errors.push(format!("DATABASE_URL is not a valid URL: {}", e)),
            }
        }
        if self.max_connections == 0 {
            errors.push("MAX_CONNECTIONS must be at least 1".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    /// The connection string with its password masked, safe for logs.
    pub fn redacted_database_url(&self) -> String {
        self.database_url.redact()
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> String;
}

impl Redact for str {
    fn redact(&self) -> String {
        match Url::parse(self) {
            Ok(mut url) => {
                if url.password().is_some_and(|p| !p.is_empty()) {
                    // set_password only fails for URLs that cannot carry credentials
                    let _ = url.set_password(Some("****"));
                }
                url.to_string()
            }
            Err(_) if self.is_empty() => "[MISSING]".to_string(),
            Err(_) => "[UNPARSEABLE]".to_string(),
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("database_url", &self.database_url.redact())
            .field("max_connections", &self.max_connections)
            .field("connect_retries", &self.connect_retries)
            .field("log_level", &self.log_level)
            .finish()
    }
}
