//! Positive integer path parameters. Each route captures exactly one segment;
//! the extractor type decides how a bad value is reported.

use crate::error::{AppError, FieldViolation};
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde_json::Value;

/// Any run of ASCII digits above zero is accepted. Values past `i64::MAX`
/// saturate; no stored row has such an id, so lookups end in the route's 404.
fn positive_id(raw: &str, field: &str, message: &str) -> Result<i64, AppError> {
    let digits = !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit());
    let parsed = digits
        .then(|| raw.parse::<i64>().unwrap_or(i64::MAX))
        .filter(|n| *n > 0);
    parsed.ok_or_else(|| {
        AppError::Validation(vec![FieldViolation {
            field: field.to_string(),
            location: "params",
            message: message.to_string(),
            value: Some(Value::String(raw.to_string())),
        }])
    })
}

async fn segment<S: Send + Sync>(parts: &mut Parts, state: &S) -> Result<String, AppError> {
    let Path(raw) = Path::<String>::from_request_parts(parts, state)
        .await
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    Ok(raw)
}

/// `:id` of the addressed row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = segment(parts, state).await?;
        positive_id(&raw, "id", "ID must be a positive integer").map(EntityId)
    }
}

/// Product id of a product-scoped collection (`/products/:id/variants`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProductId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = segment(parts, state).await?;
        positive_id(&raw, "productId", "Product ID must be a positive integer").map(ProductId)
    }
}
