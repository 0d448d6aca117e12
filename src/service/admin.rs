//! Admin accounts and credential checks.

use crate::auth::{hash_password, verify_password, DUMMY_HASH};
use crate::error::{conflict_on_unique, AppError};
use crate::models::{Admin, AdminCredentials};
use sqlx::PgPool;

pub struct AdminService;

impl AdminService {
    /// All admins without their password hashes, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Admin>, AppError> {
        Ok(sqlx::query_as::<_, Admin>(
            "SELECT id, username, created_at, updated_at FROM admins ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(pool)
        .await?)
    }

    /// Hash `password` and insert. A taken username is a conflict.
    pub async fn create(pool: &PgPool, username: &str, password: &str) -> Result<i32, AppError> {
        let hash = hash_password(password).await?;
        let (id,): (i32,) =
            sqlx::query_as("INSERT INTO admins (username, password_hash) VALUES ($1, $2) RETURNING id")
                .bind(username)
                .bind(&hash)
                .fetch_one(pool)
                .await
                .map_err(|e| conflict_on_unique(e, "Username already exists"))?;
        tracing::info!(id, username, "admin created");
        Ok(id)
    }

    /// Check a username/password pair. Unknown users still pay for one hash
    /// verification and get the same error as a wrong password.
    pub async fn authenticate(pool: &PgPool, username: &str, password: &str) -> Result<AdminCredentials, AppError> {
        let found = sqlx::query_as::<_, AdminCredentials>(
            "SELECT id, username, password_hash FROM admins WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        let hash = found.as_ref().map(|a| a.password_hash.as_str()).unwrap_or(DUMMY_HASH);
        let verified = verify_password(password, hash).await?;
        match found {
            Some(admin) if verified => Ok(admin),
            _ => {
                tracing::warn!(username, "admin login failed");
                Err(AppError::InvalidCredentials)
            }
        }
    }
}
