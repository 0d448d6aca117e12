//! Create the catalog database and tables, optionally seed the first admin, then
//! print row counts. Safe to run repeatedly.

use catalog_api::error::AppError;
use catalog_api::service::validation::ADMIN_RULES;
use catalog_api::service::AdminService;
use catalog_api::{ensure_database_exists, ensure_schema, table_counts, Config};
use serde_json::{Map, Value};
use sqlx::postgres::PgPoolOptions;
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("catalog_api=info,catalog_setup=info")),
        )
        .init();

    let config = Config::from_env()?;
    ensure_database_exists(&config).await?;

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect_with(config.connect_options()?)
        .await?;
    ensure_schema(&pool).await?;

    match (env::var("ADMIN_USERNAME").ok(), env::var("ADMIN_PASSWORD").ok()) {
        (Some(username), Some(password)) => {
            // Same rules as the admin-create route.
            let mut body = Map::new();
            body.insert("username".into(), Value::String(username));
            body.insert("password".into(), Value::String(password.clone()));
            let violations = ADMIN_RULES.apply(&mut body);
            if !violations.is_empty() {
                let reasons: Vec<String> = violations.into_iter().map(|v| v.message).collect();
                return Err(format!("invalid seed admin: {}", reasons.join("; ")).into());
            }
            let username = body["username"].as_str().unwrap_or_default();
            match AdminService::create(&pool, username, &password).await {
                Ok(id) => tracing::info!(id, username, "seeded admin"),
                Err(AppError::Conflict(_)) => tracing::info!(username, "admin already exists, leaving it unchanged"),
                Err(e) => return Err(e.into()),
            }
        }
        (None, None) => tracing::info!("ADMIN_USERNAME/ADMIN_PASSWORD not set, no admin seeded"),
        _ => tracing::warn!("set both ADMIN_USERNAME and ADMIN_PASSWORD to seed an admin"),
    }

    for (table, rows) in table_counts(&pool).await? {
        tracing::info!(table, rows, "table ready");
    }
    pool.close().await;
    Ok(())
}
