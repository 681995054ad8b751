//! CORS enforcement.
//!
//! # Responsibilities
//! - Reject requests whose `Origin` is not allow-listed, before any handler
//! - Echo permitted origins and answer preflight requests (`cors_layer`)
//!
//! # Design Decisions
//! - Requests without `Origin` (curl, health probes) always pass
//! - `cors_gate` must wrap `cors_layer` so a rejected preflight never
//!   receives CORS headers

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderName, HeaderValue, Method, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::http::error::ApiError;

pub const ALLOWED_METHODS: [Method; 3] = [Method::GET, Method::HEAD, Method::OPTIONS];

pub const ALLOWED_HEADERS: [HeaderName; 2] = [header::CONTENT_TYPE, header::AUTHORIZATION];

/// How long browsers may cache a preflight answer.
pub const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// Origins permitted to receive cross-origin responses.
#[derive(Debug, Clone)]
pub struct AllowList {
    origins: Arc<[String]>,
}

impl AllowList {
    pub fn new(origins: Vec<String>) -> Self {
        Self {
            origins: origins.into(),
        }
    }

    /// Exact, case-sensitive match against the configured origins.
    pub fn permits(&self, origin: &str) -> bool {
        self.origins.iter().any(|allowed| allowed == origin)
    }

    pub fn origins(&self) -> &[String] {
        &self.origins
    }
}

/// Outcome of inspecting a request's `Origin` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginCheck {
    /// No `Origin` header.
    Absent,
    Allowed(String),
    Rejected(String),
}

pub fn check_origin(allow_list: &AllowList, headers: &HeaderMap) -> OriginCheck {
    let Some(value) = headers.get(header::ORIGIN) else {
        return OriginCheck::Absent;
    };

    match value.to_str() {
        Ok(origin) if allow_list.permits(origin) => OriginCheck::Allowed(origin.to_owned()),
        Ok(origin) => OriginCheck::Rejected(origin.to_owned()),
        Err(_) => OriginCheck::Rejected(String::from_utf8_lossy(value.as_bytes()).into_owned()),
    }
}

/// Middleware rejecting requests from origins outside the allow-list.
pub async fn cors_gate(
    State(allow_list): State<AllowList>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match check_origin(&allow_list, request.headers()) {
        OriginCheck::Absent => next.run(request).await,
        OriginCheck::Allowed(origin) => {
            tracing::info!(origin = %origin, method = %request.method(), "Origin allowed");
            next.run(request).await
        }
        OriginCheck::Rejected(origin) => {
            tracing::warn!(origin = %origin, method = %request.method(), "Origin not allowed by CORS");
            ApiError::CorsRejected(origin).into_response()
        }
    }
}

/// Response-side CORS handling for allow-listed origins.
///
/// Any `OPTIONS` request is answered here without reaching a handler.
pub fn cors_layer(allow_list: &AllowList) -> CorsLayer {
    let origins: Vec<HeaderValue> = allow_list
        .origins()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(ALLOWED_HEADERS)
        .allow_credentials(false)
        .max_age(PREFLIGHT_MAX_AGE)
}
