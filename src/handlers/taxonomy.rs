//! Brand and category handlers, instantiated per [`Taxonomy`] in the router.

use crate::error::AppError;
use crate::extractors::{AdminSession, EntityId, ValidJson};
use crate::models::Taxonomy;
use crate::response::{created, success_data, success_message, Reply};
use crate::service::TaxonomyService;
use crate::state::AppState;
use axum::extract::State;

pub async fn list<T: Taxonomy>(State(state): State<AppState>) -> Result<Reply<Vec<T>>, AppError> {
    Ok(success_data(TaxonomyService::<T>::list(&state.pool).await?))
}

pub async fn read<T: Taxonomy>(State(state): State<AppState>, EntityId(id): EntityId) -> Result<Reply<T>, AppError> {
    Ok(success_data(TaxonomyService::<T>::get(&state.pool, id).await?))
}

pub async fn create<T: Taxonomy>(
    State(state): State<AppState>,
    _admin: AdminSession,
    ValidJson(input): ValidJson<T::Input>,
) -> Result<Reply<()>, AppError> {
    let id = TaxonomyService::<T>::create(&state.pool, input.into()).await?;
    Ok(created(id, format!("{} created successfully", T::LABEL)))
}

pub async fn update<T: Taxonomy>(
    State(state): State<AppState>,
    _admin: AdminSession,
    EntityId(id): EntityId,
    ValidJson(input): ValidJson<T::Input>,
) -> Result<Reply<()>, AppError> {
    TaxonomyService::<T>::update(&state.pool, id, input.into()).await?;
    Ok(success_message(format!("{} updated successfully", T::LABEL)))
}

pub async fn delete<T: Taxonomy>(
    State(state): State<AppState>,
    _admin: AdminSession,
    EntityId(id): EntityId,
) -> Result<Reply<()>, AppError> {
    TaxonomyService::<T>::delete(&state.pool, id).await?;
    Ok(success_message(format!("{} deleted successfully", T::LABEL)))
}
