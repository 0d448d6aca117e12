//! Public rating submission and listing.

use crate::error::AppError;
use crate::extractors::{ProductId, ValidJson};
use crate::models::{Rating, RatingInput};
use crate::response::{created, success_data, Reply};
use crate::service::RatingService;
use crate::state::AppState;
use axum::extract::State;

pub async fn list(State(state): State<AppState>, ProductId(product_id): ProductId) -> Result<Reply<Vec<Rating>>, AppError> {
    Ok(success_data(RatingService::list_for_product(&state.pool, product_id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    ProductId(product_id): ProductId,
    ValidJson(input): ValidJson<RatingInput>,
) -> Result<Reply<()>, AppError> {
    let (id, _stats) = RatingService::create(&state.pool, product_id, &input).await?;
    Ok(created(id, "Rating added successfully"))
}
