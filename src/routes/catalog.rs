//! Catalog routes. Reads are public; writes need an admin session (enforced by the
//! handlers' `AdminSession` argument) and pass the write limiter. Rating
//! submission is public behind its own limiter.

use super::limited;
use crate::handlers::{banner, product, rating, taxonomy};
use crate::models::{Brand, Category};
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn catalog_routes(state: AppState) -> Router {
    let limits = state.limits.clone();
    let write = &limits.write;
    Router::new()
        .route(
            "/brands",
            get(taxonomy::list::<Brand>).merge(limited(post(taxonomy::create::<Brand>), write)),
        )
        .route(
            "/brands/:id",
            get(taxonomy::read::<Brand>).merge(limited(
                put(taxonomy::update::<Brand>).delete(taxonomy::delete::<Brand>),
                write,
            )),
        )
        .route(
            "/categories",
            get(taxonomy::list::<Category>).merge(limited(post(taxonomy::create::<Category>), write)),
        )
        .route(
            "/categories/:id",
            get(taxonomy::read::<Category>).merge(limited(
                put(taxonomy::update::<Category>).delete(taxonomy::delete::<Category>),
                write,
            )),
        )
        .route(
            "/products",
            get(product::list).merge(limited(post(product::create), write)),
        )
        .route(
            "/products/:id",
            get(product::read).merge(limited(put(product::update).delete(product::delete), write)),
        )
        .route(
            "/products/:id/variants",
            get(product::list_variants).merge(limited(post(product::create_variant), write)),
        )
        .route(
            "/variants/:id",
            get(product::read_variant).merge(limited(
                put(product::update_variant).delete(product::delete_variant),
                write,
            )),
        )
        .route(
            "/products/:id/photos",
            get(product::list_photos).merge(limited(post(product::create_photo), write)),
        )
        .route(
            "/photos/:id",
            get(product::read_photo).merge(limited(
                put(product::update_photo).delete(product::delete_photo),
                write,
            )),
        )
        .route(
            "/products/:id/ratings",
            get(rating::list).merge(limited(post(rating::create), &limits.rating)),
        )
        .route(
            "/banners",
            get(banner::list).merge(limited(post(banner::create), write)),
        )
        .route("/banners/active", get(banner::list_active))
        .route(
            "/banners/:id",
            get(banner::read).merge(limited(put(banner::update).delete(banner::delete), write)),
        )
        .with_state(state)
}
