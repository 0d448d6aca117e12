//! Products, their variants and their photos.

use crate::error::{is_foreign_key_violation, AppError};
use crate::models::{Photo, PhotoInput, Product, ProductDetail, ProductInput, Variant, VariantInput};
use rust_decimal::Decimal;
use sqlx::PgPool;

const PRODUCT_SELECT: &str = "SELECT p.id, p.name, p.description, p.brand_id, p.category_id, \
     p.total_sold, p.avg_rating, p.total_raters, p.created_at, p.updated_at, \
     b.name AS brand_name, c.name AS category_name \
     FROM products p \
     LEFT JOIN brands b ON p.brand_id = b.id \
     LEFT JOIN categories c ON p.category_id = c.id";

fn product_not_found() -> AppError {
    AppError::NotFound("Product not found".into())
}

/// Inserting a child of a missing product trips the foreign key.
fn missing_parent(err: sqlx::Error) -> AppError {
    if is_foreign_key_violation(&err) {
        product_not_found()
    } else {
        AppError::Db(err)
    }
}

/// Ids past the `INTEGER` column range cannot name a stored product.
fn parent_key(product_id: i64) -> Result<i32, AppError> {
    i32::try_from(product_id).map_err(|_| product_not_found())
}

fn missing_reference(err: sqlx::Error) -> AppError {
    if is_foreign_key_violation(&err) {
        AppError::BadRequest("Referenced brand or category does not exist".into())
    } else {
        AppError::Db(err)
    }
}

pub struct ProductService;

impl ProductService {
    /// Every product with its brand and category names, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Product>, AppError> {
        let sql = format!("{} ORDER BY p.created_at DESC, p.id DESC", PRODUCT_SELECT);
        Ok(sqlx::query_as::<_, Product>(&sql).fetch_all(pool).await?)
    }

    /// Product row plus its variants and photos.
    pub async fn get(pool: &PgPool, id: i64) -> Result<ProductDetail, AppError> {
        let sql = format!("{} WHERE p.id = $1", PRODUCT_SELECT);
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(product_not_found)?;
        let variants = VariantService::list_for_product(pool, id).await?;
        let photos = PhotoService::list_for_product(pool, id).await?;
        Ok(ProductDetail {
            product,
            variants,
            photos,
        })
    }

    pub async fn create(pool: &PgPool, input: &ProductInput) -> Result<i32, AppError> {
        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO products (name, description, brand_id, category_id) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.brand_id)
        .bind(input.category_id)
        .fetch_one(pool)
        .await
        .map_err(missing_reference)?;
        tracing::info!(id, "product created");
        Ok(id)
    }

    /// Full overwrite of the client-writable columns. Rating statistics are left alone.
    pub async fn update(pool: &PgPool, id: i64, input: &ProductInput) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE products SET name = $1, description = $2, brand_id = $3, category_id = $4, \
             updated_at = NOW() WHERE id = $5",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.brand_id)
        .bind(input.category_id)
        .bind(id)
        .execute(pool)
        .await
        .map_err(missing_reference)?;
        if result.rows_affected() == 0 {
            return Err(product_not_found());
        }
        Ok(())
    }

    /// Variants, photos and ratings go with it (ON DELETE CASCADE).
    pub async fn delete(pool: &PgPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(product_not_found());
        }
        tracing::info!(id, "product deleted");
        Ok(())
    }
}

fn variant_not_found() -> AppError {
    AppError::NotFound("Variant not found".into())
}

fn variant_price(input: &VariantInput) -> Result<Decimal, AppError> {
    input
        .price()
        .ok_or_else(|| AppError::BadRequest("Price must be a positive number".into()))
}

pub struct VariantService;

impl VariantService {
    pub async fn list_for_product(pool: &PgPool, product_id: i64) -> Result<Vec<Variant>, AppError> {
        Ok(sqlx::query_as::<_, Variant>(
            "SELECT id, product_id, variant_name, price FROM product_variants \
             WHERE product_id = $1 ORDER BY id",
        )
        .bind(product_id)
        .fetch_all(pool)
        .await?)
    }

    pub async fn get(pool: &PgPool, id: i64) -> Result<Variant, AppError> {
        sqlx::query_as::<_, Variant>(
            "SELECT id, product_id, variant_name, price FROM product_variants WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(variant_not_found)
    }

    pub async fn create(pool: &PgPool, product_id: i64, input: &VariantInput) -> Result<i32, AppError> {
        let product_id = parent_key(product_id)?;
        let price = variant_price(input)?;
        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO product_variants (product_id, variant_name, price) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(product_id)
        .bind(&input.variant_name)
        .bind(price)
        .fetch_one(pool)
        .await
        .map_err(missing_parent)?;
        Ok(id)
    }

    pub async fn update(pool: &PgPool, id: i64, input: &VariantInput) -> Result<(), AppError> {
        let price = variant_price(input)?;
        let result = sqlx::query("UPDATE product_variants SET variant_name = $1, price = $2 WHERE id = $3")
            .bind(&input.variant_name)
            .bind(price)
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(variant_not_found());
        }
        Ok(())
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM product_variants WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(variant_not_found());
        }
        Ok(())
    }
}

fn photo_not_found() -> AppError {
    AppError::NotFound("Photo not found".into())
}

pub struct PhotoService;

impl PhotoService {
    pub async fn list_for_product(pool: &PgPool, product_id: i64) -> Result<Vec<Photo>, AppError> {
        Ok(sqlx::query_as::<_, Photo>(
            "SELECT id, product_id, photo_url FROM product_photos WHERE product_id = $1 ORDER BY id",
        )
        .bind(product_id)
        .fetch_all(pool)
        .await?)
    }

    pub async fn get(pool: &PgPool, id: i64) -> Result<Photo, AppError> {
        sqlx::query_as::<_, Photo>("SELECT id, product_id, photo_url FROM product_photos WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(photo_not_found)
    }

    pub async fn create(pool: &PgPool, product_id: i64, input: &PhotoInput) -> Result<i32, AppError> {
        let product_id = parent_key(product_id)?;
        let (id,): (i32,) =
            sqlx::query_as("INSERT INTO product_photos (product_id, photo_url) VALUES ($1, $2) RETURNING id")
                .bind(product_id)
                .bind(&input.photo_url)
                .fetch_one(pool)
                .await
                .map_err(missing_parent)?;
        Ok(id)
    }

    pub async fn update(pool: &PgPool, id: i64, input: &PhotoInput) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE product_photos SET photo_url = $1 WHERE id = $2")
            .bind(&input.photo_url)
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(photo_not_found());
        }
        Ok(())
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM product_photos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(photo_not_found());
        }
        Ok(())
    }
}
