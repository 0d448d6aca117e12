//! Admin login/logout and admin account management.

use crate::auth::SESSION_COOKIE;
use crate::error::AppError;
use crate::extractors::{AdminSession, ValidJson};
use crate::models::{Admin, AdminInput, LoginInput};
use crate::response::{created, success_data, success_data_message, success_message, Reply};
use crate::service::AdminService;
use crate::state::AppState;
use axum::extract::State;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::SignedCookieJar;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
pub struct LoggedIn {
    pub id: i32,
    pub username: String,
}

pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    ValidJson(input): ValidJson<LoginInput>,
) -> Result<(SignedCookieJar, Reply<LoggedIn>), AppError> {
    let admin = AdminService::authenticate(&state.pool, &input.username, &input.password).await?;

    // A previous session carried by this client is replaced, not kept alongside.
    if let Some(previous) = jar.get(SESSION_COOKIE).and_then(|c| Uuid::parse_str(c.value()).ok()) {
        state.sessions.destroy(&previous)?;
    }
    let session_id = state.sessions.create(admin.id, &admin.username)?;

    let max_age = i64::try_from(state.sessions.ttl().as_secs()).unwrap_or(i64::MAX);
    let cookie = Cookie::build((SESSION_COOKIE, session_id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.secure_cookies)
        .max_age(time::Duration::seconds(max_age));
    tracing::info!(admin_id = admin.id, username = %admin.username, "admin logged in");

    Ok((
        jar.add(cookie),
        success_data_message(
            LoggedIn {
                id: admin.id,
                username: admin.username,
            },
            "Admin logged in successfully",
        ),
    ))
}

/// Always succeeds; an absent or unknown session is already logged out.
pub async fn logout(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Reply<()>), AppError> {
    if let Some(session_id) = jar.get(SESSION_COOKIE).and_then(|c| Uuid::parse_str(c.value()).ok()) {
        state.sessions.destroy(&session_id)?;
    }
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    Ok((jar, success_message("Admin logged out successfully")))
}

pub async fn list(State(state): State<AppState>, _admin: AdminSession) -> Result<Reply<Vec<Admin>>, AppError> {
    let admins = AdminService::list(&state.pool).await?;
    Ok(success_data(admins))
}

pub async fn create(
    State(state): State<AppState>,
    admin: AdminSession,
    ValidJson(input): ValidJson<AdminInput>,
) -> Result<Reply<()>, AppError> {
    let id = AdminService::create(&state.pool, &input.username, &input.password).await?;
    tracing::info!(created_by = %admin.username, id, "admin account added");
    Ok(created(id, "Admin created successfully"))
}
