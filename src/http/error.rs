//! API error types and Axum response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::db::DbError;

/// Application-level errors with HTTP status code mapping.
#[derive(Debug, Error)]
pub enum ApiError {
    /// `/api/db/ping` failed.
    #[error("database ping failed: {error}")]
    DbPing { error: DbError, expose_message: bool },

    /// A catalog query failed.
    #[error("database query failed: {error}")]
    Db { error: DbError, expose_message: bool },

    /// No API route matched.
    #[error("route not found")]
    NotFound,

    /// The request's `Origin` is not allow-listed.
    #[error("origin not allowed by CORS: {0}")]
    CorsRejected(String),
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl ErrorResponse {
    fn tag(error: &'static str) -> Self {
        Self {
            error,
            code: None,
            message: None,
        }
    }

    fn database(error: &'static str, db: DbError, expose_message: bool) -> Self {
        Self {
            error,
            code: Some(db.code),
            message: db.message.filter(|_| expose_message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::DbPing {
                error,
                expose_message,
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::database("DB_PING_ERROR", error, expose_message),
            ),
            ApiError::Db {
                error,
                expose_message,
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::database("DB_ERROR", error, expose_message),
            ),
            ApiError::NotFound => (StatusCode::NOT_FOUND, ErrorResponse::tag("NOT_FOUND")),
            ApiError::CorsRejected(_) => (
                StatusCode::FORBIDDEN,
                ErrorResponse::tag("CORS_NOT_ALLOWED"),
            ),
        };
        (status, Json(body)).into_response()
    }
}
