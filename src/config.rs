//! Runtime configuration loaded from the environment (and `.env` via dotenvy).

use sqlx::postgres::PgConnectOptions;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

const DEV_SESSION_SECRET: &str = "catalog-api-dev-session-secret-change-me-in-production";

/// Minimum secret length accepted for signing session cookies.
pub const MIN_SESSION_SECRET_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct Config {
    /// Explicit connection URL. When absent the `db_*` fields are used.
    pub database_url: Option<String>,
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub db_max_connections: u32,
    pub port: u16,
    /// Empty means any origin (without credentials). `*` in the variable also means any origin.
    pub allowed_origins: Vec<String>,
    pub session_secret: String,
    pub session_ttl: Duration,
    pub secure_cookies: bool,
}

impl Config {
    /// Load `.env` if present, then read every variable with its default.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Used by `from_env` and by tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let session_secret = get("SESSION_SECRET", DEV_SESSION_SECRET);
        if session_secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(ConfigError::InvalidValue(format!(
                "SESSION_SECRET (must be at least {} bytes)",
                MIN_SESSION_SECRET_LEN
            )));
        }
        if session_secret == DEV_SESSION_SECRET {
            tracing::warn!("SESSION_SECRET not set; using the development default");
        }

        let mut allowed_origins: Vec<String> = lookup("ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        if allowed_origins.iter().any(|o| o == "*") {
            if allowed_origins.len() > 1 {
                tracing::warn!("ALLOWED_ORIGINS contains `*`; allowing any origin without credentials");
            }
            allowed_origins.clear();
        }

        Ok(Config {
            database_url: lookup("DATABASE_URL").filter(|s| !s.is_empty()),
            db_host: get("DB_HOST", "localhost"),
            db_port: parse_var(&get("DB_PORT", "5432"), "DB_PORT")?,
            db_user: get("DB_USER", "postgres"),
            db_password: get("DB_PASSWORD", ""),
            db_name: get("DB_NAME", "gg_catalog_db"),
            db_max_connections: parse_var(&get("DB_MAX_CONNECTIONS", "10"), "DB_MAX_CONNECTIONS")?,
            port: parse_var(&get("PORT", "3000"), "PORT")?,
            allowed_origins,
            session_secret,
            session_ttl: Duration::from_secs(parse_var(&get("SESSION_TTL_SECS", "86400"), "SESSION_TTL_SECS")?),
            secure_cookies: parse_var(&get("SECURE_COOKIES", "false"), "SECURE_COOKIES")?,
        })
    }

    /// Connection options for the application database.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        match &self.database_url {
            Some(url) => PgConnectOptions::from_str(url)
                .map_err(|_| ConfigError::InvalidValue("DATABASE_URL".into())),
            None => Ok(PgConnectOptions::new()
                .host(&self.db_host)
                .port(self.db_port)
                .username(&self.db_user)
                .password(&self.db_password)
                .database(&self.db_name)),
        }
    }

    /// Name of the application database, taken from the URL when one is given.
    pub fn database_name(&self) -> Result<String, ConfigError> {
        Ok(self
            .connect_options()?
            .get_database()
            .unwrap_or(&self.db_name)
            .to_string())
    }
}

fn parse_var<T: FromStr>(raw: &str, name: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(name.to_string()))
}
