//! Liveness and database diagnostics.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
pub struct HealthBody {
    status: &'static str,
    timestamp: String,
    service: &'static str,
}

pub async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "OK",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        service: "GG Catalog API",
    })
}

/// Round-trip a trivial query through the pool.
pub async fn test_db(State(state): State<AppState>) -> impl IntoResponse {
    match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&state.pool).await {
        Ok(test) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Database connection successful",
                "data": [{ "test": test }]
            })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "database connectivity check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": "Database connection failed"
                })),
            )
        }
    }
}
