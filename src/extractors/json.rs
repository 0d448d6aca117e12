//! JSON body extractor that runs the record's rule set before deserializing.

use crate::error::AppError;
use crate::service::validation::Validate;
use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde_json::Value;

/// Validated request body. Rejects with every violation found, or 400 on malformed JSON.
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: Validate + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        let mut map = match body {
            Value::Object(map) => map,
            _ => return Err(AppError::BadRequest("Request body must be a JSON object".into())),
        };
        let violations = T::rules().apply(&mut map);
        if !violations.is_empty() {
            return Err(AppError::Validation(violations));
        }
        let value = serde_json::from_value(Value::Object(map))
            .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?;
        Ok(ValidJson(value))
    }
}
