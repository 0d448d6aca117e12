//! Database bootstrap: create the application database and the catalog tables.
//! Every statement is idempotent so setup can be re-run against a live database.

use crate::config::Config;
use crate::error::AppError;
use sqlx::{ConnectOptions, PgPool};

/// Catalog tables in dependency order (referenced tables first).
pub const TABLES: &[&str] = &[
    "admins",
    "brands",
    "categories",
    "products",
    "product_variants",
    "product_photos",
    "ratings",
    "web_banners",
];

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS admins (
        id SERIAL PRIMARY KEY,
        username VARCHAR(50) NOT NULL UNIQUE,
        password_hash VARCHAR(255) NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS brands (
        id SERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL UNIQUE,
        brand_photo TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS categories (
        id SERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL UNIQUE,
        category_photo TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        description TEXT,
        brand_id INTEGER REFERENCES brands(id) ON DELETE SET NULL,
        category_id INTEGER REFERENCES categories(id) ON DELETE SET NULL,
        total_sold INTEGER NOT NULL DEFAULT 0,
        avg_rating DOUBLE PRECISION NOT NULL DEFAULT 0,
        total_raters INTEGER NOT NULL DEFAULT 0,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS product_variants (
        id SERIAL PRIMARY KEY,
        product_id INTEGER NOT NULL REFERENCES products(id) ON DELETE CASCADE,
        variant_name VARCHAR(100) NOT NULL,
        price NUMERIC(12, 2) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS product_photos (
        id SERIAL PRIMARY KEY,
        product_id INTEGER NOT NULL REFERENCES products(id) ON DELETE CASCADE,
        photo_url TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS ratings (
        id SERIAL PRIMARY KEY,
        product_id INTEGER NOT NULL REFERENCES products(id) ON DELETE CASCADE,
        star INTEGER NOT NULL CHECK (star BETWEEN 1 AND 5),
        review_text TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS web_banners (
        id SERIAL PRIMARY KEY,
        title VARCHAR(255),
        banner_image_url TEXT,
        redirect_url TEXT,
        active BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_products_brand_id ON products (brand_id)",
    "CREATE INDEX IF NOT EXISTS idx_products_category_id ON products (category_id)",
    "CREATE INDEX IF NOT EXISTS idx_product_variants_product_id ON product_variants (product_id)",
    "CREATE INDEX IF NOT EXISTS idx_product_photos_product_id ON product_photos (product_id)",
    "CREATE INDEX IF NOT EXISTS idx_ratings_product_id ON ratings (product_id)",
];

/// SQLSTATE codes for objects that already exist (database, table/index, relation name clash).
const ALREADY_EXISTS: &[&str] = &["42P04", "42P07", "42710", "23505"];

fn already_exists(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| ALREADY_EXISTS.contains(&&*code))
        .unwrap_or(false)
}

/// Create the configured database via the `postgres` maintenance database if it does not exist.
pub async fn ensure_database_exists(config: &Config) -> Result<(), AppError> {
    let db_name = config.database_name()?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let mut conn = config.connect_options()?.database("postgres").connect().await?;
    let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists {
        match sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await
        {
            Ok(_) => tracing::info!(database = %db_name, "database created"),
            Err(e) if already_exists(&e) => tracing::debug!(database = %db_name, "database created concurrently"),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Create every catalog table and index that is missing.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), AppError> {
    for ddl in SCHEMA {
        match sqlx::query(ddl).execute(pool).await {
            Ok(_) => {}
            Err(e) if already_exists(&e) => tracing::debug!(error = %e, "schema object already exists"),
            Err(e) => return Err(e.into()),
        }
    }
    tracing::info!(tables = TABLES.len(), "catalog schema ready");
    Ok(())
}

/// Row count per catalog table, in [`TABLES`] order.
pub async fn table_counts(pool: &PgPool) -> Result<Vec<(&'static str, i64)>, AppError> {
    let mut counts = Vec::with_capacity(TABLES.len());
    for table in TABLES {
        let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(pool)
            .await?;
        counts.push((*table, n));
    }
    Ok(counts)
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
