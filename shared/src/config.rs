//! Startup configuration, read once from the environment.

use std::env;

use serde::Deserialize;
use thiserror::Error;

/// Address the service binds when `BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("GOOGLE_SERVICE_ACCOUNT_JSON is not a valid service account key: {0}")]
    InvalidServiceAccount(#[from] serde_json::Error),
}

/// The service-account key fields needed for the JWT-bearer grant.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    GOOGLE_TOKEN_URL.to_string()
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: String,
    pub spreadsheet_id: String,
    pub jwt_secret: String,
    pub service_account: ServiceAccountKey,
    /// Cookies are marked Secure only in production.
    pub secure_cookies: bool,
}

impl Settings {
    /// Reads and validates the environment. A missing session secret or
    /// an unparseable service-account key refuses startup.
    pub fn from_env() -> Result<Settings, ConfigError> {
        let jwt_secret = require("JWT_SECRET")?;
        let spreadsheet_id = require("SPREADSHEET_ID")?;
        let raw_key = require("GOOGLE_SERVICE_ACCOUNT_JSON")?;

        let mut service_account: ServiceAccountKey = serde_json::from_str(&raw_key)?;
        // Keys pasted into env vars usually arrive with escaped newlines.
        service_account.private_key = service_account.private_key.replace("\\n", "\n");

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let secure_cookies = env::var("APP_ENV")
            .map(|v| v == "production")
            .unwrap_or(false);

        Ok(Settings {
            bind_addr,
            spreadsheet_id,
            jwt_secret,
            service_account,
            secure_cookies,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}
