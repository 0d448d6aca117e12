//! Storefront banners.

use crate::error::AppError;
use crate::models::{Banner, BannerInput};
use sqlx::PgPool;

const BANNER_COLUMNS: &str = "id, title, banner_image_url, redirect_url, active, created_at, updated_at";

fn not_found() -> AppError {
    AppError::NotFound("Banner not found".into())
}

fn blank_to_none(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

pub struct BannerService;

impl BannerService {
    pub async fn list(pool: &PgPool) -> Result<Vec<Banner>, AppError> {
        let sql = format!("SELECT {} FROM web_banners ORDER BY created_at DESC, id DESC", BANNER_COLUMNS);
        Ok(sqlx::query_as::<_, Banner>(&sql).fetch_all(pool).await?)
    }

    /// Banners the storefront should display.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Banner>, AppError> {
        let sql = format!(
            "SELECT {} FROM web_banners WHERE active = TRUE ORDER BY created_at DESC, id DESC",
            BANNER_COLUMNS
        );
        Ok(sqlx::query_as::<_, Banner>(&sql).fetch_all(pool).await?)
    }

    pub async fn get(pool: &PgPool, id: i64) -> Result<Banner, AppError> {
        let sql = format!("SELECT {} FROM web_banners WHERE id = $1", BANNER_COLUMNS);
        sqlx::query_as::<_, Banner>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn create(pool: &PgPool, input: &BannerInput) -> Result<i32, AppError> {
        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO web_banners (title, banner_image_url, redirect_url, active) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(blank_to_none(&input.title))
        .bind(blank_to_none(&input.banner_image_url))
        .bind(blank_to_none(&input.redirect_url))
        .bind(input.active.unwrap_or(true))
        .fetch_one(pool)
        .await?;
        Ok(id)
    }

    /// Full overwrite; an omitted `active` re-activates the banner.
    pub async fn update(pool: &PgPool, id: i64, input: &BannerInput) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE web_banners SET title = $1, banner_image_url = $2, redirect_url = $3, active = $4, \
             updated_at = NOW() WHERE id = $5",
        )
        .bind(blank_to_none(&input.title))
        .bind(blank_to_none(&input.banner_image_url))
        .bind(blank_to_none(&input.redirect_url))
        .bind(input.active.unwrap_or(true))
        .bind(id)
        .execute(pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(not_found());
        }
        Ok(())
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM web_banners WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found());
        }
        Ok(())
    }
}
