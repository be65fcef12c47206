use std::io;
use std::path::PathBuf;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::SharedConfigError;

const CONFIG_FILE: &str = "shared-config";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub api_port: u16,
    pub env: String,
    pub log_format: String,

    // Weaviate Configuration
    pub wcd_url: Option<String>,
    pub wcd_token: Option<SecretString>,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    /// Loads settings from an optional `shared-config.toml` and then the
    /// process environment, environment taking precedence.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(config::Environment::default())
    }

    fn load_from(environment: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("api_port", 8000)?
            .set_default("env", "development")?
            .set_default("log_format", "pretty")?
            .set_default("request_timeout_secs", 10)?
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Resolves the store credentials for a single request.
    pub fn connection(&self) -> Result<ConnectionConfig, SharedConfigError> {
        ConnectionConfig::resolve(
            self.wcd_url.as_deref(),
            self.wcd_token.as_ref().map(|token| token.expose_secret().as_str()),
        )
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_port: 8000,
            env: "development".to_string(),
            log_format: "pretty".to_string(),
            wcd_url: None,
            wcd_token: None,
            request_timeout_secs: 10,
        }
    }
}

/// Credentials for the external store. Both fields are non-empty.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub base_url: String,
    pub auth_token: SecretString,
}

impl ConnectionConfig {
    pub fn resolve(
        base_url: Option<&str>,
        auth_token: Option<&str>,
    ) -> Result<Self, SharedConfigError> {
        let base_url = non_blank(base_url).ok_or(SharedConfigError::Configuration)?;
        let auth_token = non_blank(auth_token).ok_or(SharedConfigError::Configuration)?;

        Ok(Self {
            base_url: base_url.to_string(),
            auth_token: SecretString::new(auth_token.to_string()),
        })
    }
}

/// Applies `.env` over the process environment. A missing file is fine;
/// an unreadable or malformed one is not.
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
    skip_missing(dotenvy::dotenv_override())
}

fn skip_missing(
    result: Result<PathBuf, dotenvy::Error>,
) -> Result<Option<PathBuf>, dotenvy::Error> {
    match result {
        Ok(path) => Ok(Some(path)),
        Err(dotenvy::Error::Io(err)) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
