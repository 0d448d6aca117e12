//! Session and admin-account routes.

use super::limited;
use crate::handlers::admin::{create, list, login, logout};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn admin_routes(state: AppState) -> Router {
    let limits = state.limits.clone();
    Router::new()
        .route("/admin/login", limited(post(login), &limits.login))
        .route("/admin/logout", limited(post(logout), &limits.admin))
        .route("/admins", limited(get(list).post(create), &limits.admin))
        .with_state(state)
}
