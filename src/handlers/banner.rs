use crate::error::AppError;
use crate::extractors::{AdminSession, EntityId, ValidJson};
use crate::models::{Banner, BannerInput};
use crate::response::{created, success_data, success_message, Reply};
use crate::service::BannerService;
use crate::state::AppState;
use axum::extract::State;

pub async fn list(State(state): State<AppState>) -> Result<Reply<Vec<Banner>>, AppError> {
    Ok(success_data(BannerService::list(&state.pool).await?))
}

pub async fn list_active(State(state): State<AppState>) -> Result<Reply<Vec<Banner>>, AppError> {
    Ok(success_data(BannerService::list_active(&state.pool).await?))
}

pub async fn read(State(state): State<AppState>, EntityId(id): EntityId) -> Result<Reply<Banner>, AppError> {
    Ok(success_data(BannerService::get(&state.pool, id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    _admin: AdminSession,
    ValidJson(input): ValidJson<BannerInput>,
) -> Result<Reply<()>, AppError> {
    let id = BannerService::create(&state.pool, &input).await?;
    Ok(created(id, "Banner created successfully"))
}

pub async fn update(
    State(state): State<AppState>,
    _admin: AdminSession,
    EntityId(id): EntityId,
    ValidJson(input): ValidJson<BannerInput>,
) -> Result<Reply<()>, AppError> {
    BannerService::update(&state.pool, id, &input).await?;
    Ok(success_message("Banner updated successfully"))
}

pub async fn delete(
    State(state): State<AppState>,
    _admin: AdminSession,
    EntityId(id): EntityId,
) -> Result<Reply<()>, AppError> {
    BannerService::delete(&state.pool, id).await?;
    Ok(success_message("Banner deleted successfully"))
}
