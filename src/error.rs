//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {0}")]
    InvalidValue(String),
}

/// One failed validation check. Serialized into the `details` array of a 400 response.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub location: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

/// Machine-readable codes for 401 responses from the admin guard.
pub const ADMIN_AUTH_REQUIRED: &str = "ADMIN_AUTH_REQUIRED";
pub const INVALID_ADMIN_SESSION: &str = "INVALID_ADMIN_SESSION";

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    NotFound(String),
    #[error("Validation failed")]
    Validation(Vec<FieldViolation>),
    #[error("{0}")]
    BadRequest(String),
    #[error("{message}")]
    Unauthorized { code: &'static str, message: String },
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("{0}")]
    Conflict(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("internal: {0}")]
    Internal(String),
}

impl AppError {
    pub fn auth_required() -> Self {
        AppError::Unauthorized {
            code: ADMIN_AUTH_REQUIRED,
            message: "Admin authentication required. Please log in first.".into(),
        }
    }

    pub fn invalid_session() -> Self {
        AppError::Unauthorized {
            code: INVALID_ADMIN_SESSION,
            message: "Invalid admin session. Please log in again.".into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Db(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            AppError::Config(_) | AppError::Db(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldViolation>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Validation(details) => ErrorBody {
                success: false,
                error: "Validation failed".into(),
                code: None,
                details: Some(details),
            },
            AppError::Unauthorized { code, message } => ErrorBody {
                success: false,
                error: message,
                code: Some(code),
                details: None,
            },
            AppError::Db(sqlx::Error::RowNotFound) => ErrorBody {
                success: false,
                error: "Resource not found".into(),
                code: None,
                details: None,
            },
            e @ (AppError::Config(_) | AppError::Db(_) | AppError::Internal(_)) => {
                tracing::error!(error = %e, "request failed");
                ErrorBody {
                    success: false,
                    error: "Internal server error".into(),
                    code: None,
                    details: None,
                }
            }
            e => ErrorBody {
                success: false,
                error: e.to_string(),
                code: None,
                details: None,
            },
        };
        (status, Json(body)).into_response()
    }
}

/// Map a unique-constraint violation to 409 with `message`; other errors pass through.
pub fn conflict_on_unique(err: sqlx::Error, message: &str) -> AppError {
    match err.as_database_error() {
        Some(db) if db.is_unique_violation() => AppError::Conflict(message.to_string()),
        _ => AppError::Db(err),
    }
}

/// True when `err` is a foreign-key violation (referenced row missing).
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_foreign_key_violation())
        .unwrap_or(false)
}
