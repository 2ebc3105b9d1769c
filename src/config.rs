// src/config.rs
use std::env;

use axum::http::HeaderValue;

const DEFAULT_APP_ENV: &str = "dev";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "8000";
const DEFAULT_ALLOW_ORIGINS: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub struct Config {
    /// Deployment environment name: dev, uat or prod.
    pub app_env: String,
    pub host: String,
    pub port: u16,
    /// Comma-separated CORS origins, e.g. "http://localhost:3000,https://yourdomain.com".
    pub allow_origins_csv: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_env = lookup("APP_ENV").unwrap_or_else(|| DEFAULT_APP_ENV.to_string());

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| DEFAULT_PORT.to_string())
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid("PORT must be a number between 0 and 65535"))?;

        let allow_origins_csv =
            lookup("ALLOW_ORIGINS").unwrap_or_else(|| DEFAULT_ALLOW_ORIGINS.to_string());

        Ok(Self {
            app_env,
            host,
            port,
            allow_origins_csv,
        })
    }

    /// Parsed CORS origins: trimmed, empty entries dropped, order preserved.
    pub fn allow_origins(&self) -> Vec<String> {
        parse_origins(&self.allow_origins_csv)
    }

    /// CORS origins as header values for the CORS layer.
    ///
    /// Credentials are always allowed, so a wildcard origin is rejected.
    pub fn cors_origins(&self) -> Result<Vec<HeaderValue>, ConfigError> {
        self.allow_origins()
            .into_iter()
            .map(|origin| {
                if origin == "*" {
                    return Err(ConfigError::InvalidOrigin(origin));
                }
                HeaderValue::from_str(&origin).map_err(|_| ConfigError::InvalidOrigin(origin))
            })
            .collect()
    }

    pub fn bind_address(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }

    pub fn is_production(&self) -> bool {
        self.app_env.trim().eq_ignore_ascii_case("prod")
    }
}

fn parse_origins(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
    #[error("Invalid CORS origin in ALLOW_ORIGINS: {0:?}")]
    InvalidOrigin(String),
}
