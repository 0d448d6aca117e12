//! Standard response envelope helpers: `{ success, data? | id? | message? }`.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub type Reply<T> = (StatusCode, Json<Envelope<T>>);

/// 200 with `data`.
pub fn success_data<T: Serialize>(data: T) -> Reply<T> {
    (
        StatusCode::OK,
        Json(Envelope {
            success: true,
            data: Some(data),
            id: None,
            message: None,
        }),
    )
}

/// 200 with `message` and `data`.
pub fn success_data_message<T: Serialize>(data: T, message: impl Into<String>) -> Reply<T> {
    (
        StatusCode::OK,
        Json(Envelope {
            success: true,
            data: Some(data),
            id: None,
            message: Some(message.into()),
        }),
    )
}

/// 201 with the inserted id.
pub fn created(id: i32, message: impl Into<String>) -> Reply<()> {
    (
        StatusCode::CREATED,
        Json(Envelope {
            success: true,
            data: None,
            id: Some(id),
            message: Some(message.into()),
        }),
    )
}

/// 200 with only a message (update, delete, logout).
pub fn success_message(message: impl Into<String>) -> Reply<()> {
    (
        StatusCode::OK,
        Json(Envelope {
            success: true,
            data: None,
            id: None,
            message: Some(message.into()),
        }),
    )
}
