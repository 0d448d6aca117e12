//! Product, variant and photo handlers.

use crate::error::AppError;
use crate::extractors::{AdminSession, EntityId, ProductId, ValidJson};
use crate::models::{Photo, PhotoInput, Product, ProductDetail, ProductInput, Variant, VariantInput};
use crate::response::{created, success_data, success_message, Reply};
use crate::service::{PhotoService, ProductService, VariantService};
use crate::state::AppState;
use axum::extract::State;

pub async fn list(State(state): State<AppState>) -> Result<Reply<Vec<Product>>, AppError> {
    Ok(success_data(ProductService::list(&state.pool).await?))
}

pub async fn read(State(state): State<AppState>, EntityId(id): EntityId) -> Result<Reply<ProductDetail>, AppError> {
    Ok(success_data(ProductService::get(&state.pool, id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    _admin: AdminSession,
    ValidJson(input): ValidJson<ProductInput>,
) -> Result<Reply<()>, AppError> {
    let id = ProductService::create(&state.pool, &input).await?;
    Ok(created(id, "Product created successfully"))
}

pub async fn update(
    State(state): State<AppState>,
    _admin: AdminSession,
    EntityId(id): EntityId,
    ValidJson(input): ValidJson<ProductInput>,
) -> Result<Reply<()>, AppError> {
    ProductService::update(&state.pool, id, &input).await?;
    Ok(success_message("Product updated successfully"))
}

pub async fn delete(
    State(state): State<AppState>,
    _admin: AdminSession,
    EntityId(id): EntityId,
) -> Result<Reply<()>, AppError> {
    ProductService::delete(&state.pool, id).await?;
    Ok(success_message("Product deleted successfully"))
}

pub async fn list_variants(
    State(state): State<AppState>,
    ProductId(product_id): ProductId,
) -> Result<Reply<Vec<Variant>>, AppError> {
    Ok(success_data(VariantService::list_for_product(&state.pool, product_id).await?))
}

pub async fn read_variant(State(state): State<AppState>, EntityId(id): EntityId) -> Result<Reply<Variant>, AppError> {
    Ok(success_data(VariantService::get(&state.pool, id).await?))
}

pub async fn create_variant(
    State(state): State<AppState>,
    _admin: AdminSession,
    ProductId(product_id): ProductId,
    ValidJson(input): ValidJson<VariantInput>,
) -> Result<Reply<()>, AppError> {
    let id = VariantService::create(&state.pool, product_id, &input).await?;
    Ok(created(id, "Variant added successfully"))
}

pub async fn update_variant(
    State(state): State<AppState>,
    _admin: AdminSession,
    EntityId(id): EntityId,
    ValidJson(input): ValidJson<VariantInput>,
) -> Result<Reply<()>, AppError> {
    VariantService::update(&state.pool, id, &input).await?;
    Ok(success_message("Variant updated successfully"))
}

pub async fn delete_variant(
    State(state): State<AppState>,
    _admin: AdminSession,
    EntityId(id): EntityId,
) -> Result<Reply<()>, AppError> {
    VariantService::delete(&state.pool, id).await?;
    Ok(success_message("Variant deleted successfully"))
}

pub async fn list_photos(
    State(state): State<AppState>,
    ProductId(product_id): ProductId,
) -> Result<Reply<Vec<Photo>>, AppError> {
    Ok(success_data(PhotoService::list_for_product(&state.pool, product_id).await?))
}

pub async fn read_photo(State(state): State<AppState>, EntityId(id): EntityId) -> Result<Reply<Photo>, AppError> {
    Ok(success_data(PhotoService::get(&state.pool, id).await?))
}

pub async fn create_photo(
    State(state): State<AppState>,
    _admin: AdminSession,
    ProductId(product_id): ProductId,
    ValidJson(input): ValidJson<PhotoInput>,
) -> Result<Reply<()>, AppError> {
    let id = PhotoService::create(&state.pool, product_id, &input).await?;
    Ok(created(id, "Photo added successfully"))
}

pub async fn update_photo(
    State(state): State<AppState>,
    _admin: AdminSession,
    EntityId(id): EntityId,
    ValidJson(input): ValidJson<PhotoInput>,
) -> Result<Reply<()>, AppError> {
    PhotoService::update(&state.pool, id, &input).await?;
    Ok(success_message("Photo updated successfully"))
}

pub async fn delete_photo(
    State(state): State<AppState>,
    _admin: AdminSession,
    EntityId(id): EntityId,
) -> Result<Reply<()>, AppError> {
    PhotoService::delete(&state.pool, id).await?;
    Ok(success_message("Photo deleted successfully"))
}
