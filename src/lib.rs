//! Catalog API: product catalog REST backend on PostgreSQL with session-based admin auth.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use app::build_router;
pub use config::Config;
pub use error::{AppError, ConfigError};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_schema, table_counts};
