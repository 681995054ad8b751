//! Route handlers.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::db::{Model3D, PingRow};
use crate::http::error::ApiError;
use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    /// Milliseconds since the Unix epoch.
    pub ts: u64,
}

/// `GET /`
pub async fn root() -> &'static str {
    "OK"
}

/// `GET /api/health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        ts: epoch_millis(),
    })
}

/// `GET /api/db/ping`
pub async fn db_ping(State(state): State<AppState>) -> Result<Json<PingRow>, ApiError> {
    match state.store.ping().await {
        Ok(row) => Ok(Json(row)),
        Err(error) => {
            tracing::error!(
                code = %error.code,
                detail = error.message.as_deref().unwrap_or_default(),
                "DB_PING_ERROR"
            );
            Err(ApiError::DbPing {
                error,
                expose_message: state.debug_errors,
            })
        }
    }
}

/// `GET /api/models3d`
pub async fn list_models(State(state): State<AppState>) -> Result<Json<Vec<Model3D>>, ApiError> {
    match state.store.list_models().await {
        Ok(models) => {
            tracing::debug!(count = models.len(), "Listed models");
            Ok(Json(models))
        }
        Err(error) => {
            tracing::error!(
                code = %error.code,
                detail = error.message.as_deref().unwrap_or_default(),
                "DB error on /api/models3d"
            );
            Err(ApiError::Db {
                error,
                expose_message: state.debug_errors,
            })
        }
    }
}

/// Any unmatched path or method under `/api`.
pub async fn api_not_found() -> ApiError {
    ApiError::NotFound
}

/// Any path no route matched.
///
/// Paths under `/api` still get the JSON 404, whatever their case or
/// trailing slash.
pub async fn not_found(uri: Uri) -> Response {
    if is_api_path(uri.path()) {
        ApiError::NotFound.into_response()
    } else {
        (StatusCode::NOT_FOUND, "Not Found").into_response()
    }
}

fn is_api_path(path: &str) -> bool {
    let prefix = path.get(..4).unwrap_or(path);
    prefix.eq_ignore_ascii_case("/api") && matches!(path.as_bytes().get(4), None | Some(b'/'))
}

fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_prefix_ignores_case_and_trailing_slash() {
        for path in ["/api", "/api/", "/API", "/Api/unknown", "/api/health/"] {
            assert!(is_api_path(path), "{path}");
        }
        for path in ["/", "/ap", "/apix", "/apis/models", "/favicon.ico", "/é"] {
            assert!(!is_api_path(path), "{path}");
        }
    }
}
