//! Shared application state for all routes. Built once at startup.

use crate::auth::SessionStore;
use crate::config::Config;
use crate::middleware::RateLimits;
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub sessions: SessionStore,
    pub limits: RateLimits,
    /// Signs the session cookie.
    pub cookie_key: Key,
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(pool: PgPool, config: &Config) -> Self {
        AppState {
            pool,
            sessions: SessionStore::new(config.session_ttl),
            limits: RateLimits::standard(),
            cookie_key: Key::derive_from(config.session_secret.as_bytes()),
            secure_cookies: config.secure_cookies,
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
