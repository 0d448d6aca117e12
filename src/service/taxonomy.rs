//! Brand and category CRUD, shared through the [`Taxonomy`] table description.

use crate::error::{conflict_on_unique, AppError};
use crate::models::{NamedInput, Taxonomy};
use sqlx::PgPool;
use std::marker::PhantomData;

pub struct TaxonomyService<T>(PhantomData<T>);

impl<T: Taxonomy> TaxonomyService<T> {
    fn columns() -> String {
        format!("id, name, {}, created_at", T::PHOTO_COLUMN)
    }

    fn not_found() -> AppError {
        AppError::NotFound(format!("{} not found", T::LABEL))
    }

    fn duplicate(err: sqlx::Error) -> AppError {
        conflict_on_unique(err, &format!("{} name already exists", T::LABEL))
    }

    /// Newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<T>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY created_at DESC, id DESC",
            Self::columns(),
            T::TABLE
        );
        Ok(sqlx::query_as::<_, T>(&sql).fetch_all(pool).await?)
    }

    pub async fn get(pool: &PgPool, id: i64) -> Result<T, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", Self::columns(), T::TABLE);
        sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(Self::not_found)
    }

    /// Insert and return the new id. A taken name is a conflict.
    pub async fn create(pool: &PgPool, input: NamedInput) -> Result<i32, AppError> {
        let sql = format!(
            "INSERT INTO {} (name, {}) VALUES ($1, $2) RETURNING id",
            T::TABLE,
            T::PHOTO_COLUMN
        );
        let (id,): (i32,) = sqlx::query_as(&sql)
            .bind(&input.name)
            .bind(&input.photo)
            .fetch_one(pool)
            .await
            .map_err(Self::duplicate)?;
        tracing::info!(table = T::TABLE, id, "created");
        Ok(id)
    }

    pub async fn update(pool: &PgPool, id: i64, input: NamedInput) -> Result<(), AppError> {
        let sql = format!(
            "UPDATE {} SET name = $1, {} = $2 WHERE id = $3",
            T::TABLE,
            T::PHOTO_COLUMN
        );
        let result = sqlx::query(&sql)
            .bind(&input.name)
            .bind(&input.photo)
            .bind(id)
            .execute(pool)
            .await
            .map_err(Self::duplicate)?;
        if result.rows_affected() == 0 {
            return Err(Self::not_found());
        }
        Ok(())
    }

    /// Delete unless products still reference the row. The row is locked for the
    /// duration of the check so a concurrent product insert cannot slip in between.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<(), AppError> {
        let mut tx = pool.begin().await?;

        let lock = format!("SELECT id FROM {} WHERE id = $1 FOR UPDATE", T::TABLE);
        let found: Option<(i32,)> = sqlx::query_as(&lock).bind(id).fetch_optional(&mut *tx).await?;
        if found.is_none() {
            return Err(Self::not_found());
        }

        let count = format!("SELECT COUNT(*) FROM products WHERE {} = $1", T::PRODUCT_COLUMN);
        let (references,): (i64,) = sqlx::query_as(&count).bind(id).fetch_one(&mut *tx).await?;
        if references > 0 {
            tracing::debug!(table = T::TABLE, id, references, "delete blocked by products");
            return Err(AppError::Conflict(format!(
                "Cannot delete {} as it is being used by products",
                T::LABEL.to_lowercase()
            )));
        }

        let delete = format!("DELETE FROM {} WHERE id = $1", T::TABLE);
        sqlx::query(&delete).bind(id).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }
}
