//! Runtime configuration read from the environment (and `.env` via dotenv)

use std::time::Duration;

use thiserror::Error;
use tracing::warn;

use health_dashboard_data::remote::SaveClientError;
use health_dashboard_domain::auth::token::{SecurityError, MAX_ACCESS_TOKEN_TTL_MINUTES};

/// Signing secret used when `JWT_SECRET` is unset outside production
pub const DEV_JWT_SECRET: &str = "health-dashboard-development-secret";

/// Where readings are forwarded unless `SAVE_ENDPOINT_URL` says otherwise
pub const DEFAULT_SAVE_ENDPOINT_URL: &str = "http://localhost/health_assistant_api/save_health_data.php";

/// Errors raised while building the application from configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("{0} must be set when APP_ENV is production")]
    MissingInProduction(&'static str),

    #[error(transparent)]
    Security(#[from] SecurityError),

    #[error(transparent)]
    SaveClient(#[from] SaveClientError),
}

/// Application settings
#[derive(Clone)]
pub struct AppConfig {
    pub port: u16,
    pub environment: String,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub access_token_ttl_minutes: i64,
    /// `None` disables forwarding readings
    pub save_endpoint_url: Option<String>,
    pub save_timeout: Duration,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("environment", &self.environment)
            .field("jwt_issuer", &self.jwt_issuer)
            .field("access_token_ttl_minutes", &self.access_token_ttl_minutes)
            .field("save_endpoint_url", &self.save_endpoint_url)
            .field("save_timeout", &self.save_timeout)
            .finish_non_exhaustive()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            environment: "development".to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_issuer: "health-dashboard-api".to_string(),
            access_token_ttl_minutes: 60,
            save_endpoint_url: Some(DEFAULT_SAVE_ENDPOINT_URL.to_string()),
            save_timeout: Duration::from_secs(5),
        }
    }
}

impl AppConfig {
    /// Read settings from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`; unset keys keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(env) = lookup("APP_ENV") {
            config.environment = env;
        }
        if let Some(port) = lookup("PORT") {
            config.port = parse("PORT", port)?;
        }

        match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => config.jwt_secret = secret,
            None if config.is_production() => return Err(ConfigError::MissingInProduction("JWT_SECRET")),
            None => warn!("JWT_SECRET not set, using the development secret"),
        }

        if let Some(issuer) = lookup("JWT_ISSUER") {
            config.jwt_issuer = issuer;
        }
        if let Some(ttl) = lookup("ACCESS_TOKEN_EXPIRATION_MINUTES") {
            let minutes: i64 = parse("ACCESS_TOKEN_EXPIRATION_MINUTES", ttl.clone())?;
            if !(1..=MAX_ACCESS_TOKEN_TTL_MINUTES).contains(&minutes) {
                return Err(ConfigError::InvalidValue {
                    key: "ACCESS_TOKEN_EXPIRATION_MINUTES",
                    value: ttl,
                });
            }
            config.access_token_ttl_minutes = minutes;
        }

        // Explicitly empty disables forwarding
        if let Some(url) = lookup("SAVE_ENDPOINT_URL") {
            let url = url.trim().to_string();
            config.save_endpoint_url = (!url.is_empty()).then_some(url);
        }
        if let Some(secs) = lookup("SAVE_TIMEOUT_SECS") {
            config.save_timeout = Duration::from_secs(parse("SAVE_TIMEOUT_SECS", secs)?);
        }

        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}
