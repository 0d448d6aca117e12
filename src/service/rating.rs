//! Ratings and the product statistics derived from them.

use crate::error::AppError;
use crate::models::{Rating, RatingInput, RatingStats};
use sqlx::PgPool;

pub struct RatingService;

impl RatingService {
    /// Newest first. Unknown products simply have no ratings.
    pub async fn list_for_product(pool: &PgPool, product_id: i64) -> Result<Vec<Rating>, AppError> {
        Ok(sqlx::query_as::<_, Rating>(
            "SELECT id, product_id, star, review_text, created_at FROM ratings \
             WHERE product_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(product_id)
        .fetch_all(pool)
        .await?)
    }

    /// Insert a rating and rewrite the product's average and rater count in one
    /// transaction. The product row is locked until commit; concurrent ratings
    /// for one product serialize on it.
    pub async fn create(pool: &PgPool, product_id: i64, input: &RatingInput) -> Result<(i32, RatingStats), AppError> {
        let review_text = input
            .review_text
            .as_deref()
            .filter(|t| !t.is_empty());

        let mut tx = pool.begin().await?;

        let (product_id,): (i32,) = sqlx::query_as("SELECT id FROM products WHERE id = $1 FOR UPDATE")
            .bind(product_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".into()))?;

        let (id,): (i32,) =
            sqlx::query_as("INSERT INTO ratings (product_id, star, review_text) VALUES ($1, $2, $3) RETURNING id")
                .bind(product_id)
                .bind(input.star)
                .bind(review_text)
                .fetch_one(&mut *tx)
                .await?;

        let stats = sqlx::query_as::<_, RatingStats>(
            "SELECT COALESCE(AVG(star), 0)::float8 AS avg_rating, COUNT(*)::int4 AS total_raters \
             FROM ratings WHERE product_id = $1",
        )
        .bind(product_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE products SET avg_rating = $1, total_raters = $2, updated_at = NOW() WHERE id = $3")
            .bind(stats.avg_rating)
            .bind(stats.total_raters)
            .bind(product_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(product_id, avg = stats.avg_rating, raters = stats.total_raters, "rating recorded");
        Ok((id, stats))
    }
}
