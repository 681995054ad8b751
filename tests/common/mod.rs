//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use models3d_api::config::AppConfig;
use models3d_api::db::{DbError, Model3D, ModelStore, PingRow};
use models3d_api::http::HttpServer;
use tower::ServiceExt;

/// In-memory `ModelStore` that counts every call.
#[derive(Debug, Default)]
pub struct FakeStore {
    models: Vec<Model3D>,
    failure: Option<DbError>,
    calls: AtomicUsize,
    shut_down: AtomicBool,
}

impl FakeStore {
    pub fn with_models(mut models: Vec<Model3D>) -> Self {
        // Same order as the real query.
        models.sort_by(|a, b| b.id.cmp(&a.id));
        Self {
            models,
            ..Self::default()
        }
    }

    pub fn failing(error: DbError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), DbError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ModelStore for FakeStore {
    async fn ping(&self) -> Result<PingRow, DbError> {
        self.check()?;
        Ok(PingRow { ok: 1 })
    }

    async fn list_models(&self) -> Result<Vec<Model3D>, DbError> {
        self.check()?;
        Ok(self.models.clone())
    }

    async fn shutdown(&self) {
        self.shut_down.store(true, Ordering::SeqCst);
    }
}

pub fn model(id: i64, title: &str) -> Model3D {
    Model3D {
        id,
        title: Some(title.to_string()),
        description: Some(format!("{title} description")),
        model_src: Some(format!("/models/{id}.glb")),
        poster_src: Some(format!("/posters/{id}.webp")),
    }
}

/// Config with a known allow-list and the given debug flag.
pub fn test_config(debug_errors: bool) -> AppConfig {
    let mut config = AppConfig::default();
    config.cors.allow_list = vec![
        "https://armatex.wuaze.com".to_string(),
        "http://localhost:5173".to_string(),
    ];
    config.debug_errors = debug_errors;
    config
}

pub fn app(store: Arc<FakeStore>, debug_errors: bool) -> Router {
    HttpServer::new(&test_config(debug_errors), store).router()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("response body is not UTF-8")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Drive one request through the router in-process.
pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body")
        .to_vec();
    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_from(uri: &str, origin: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("origin", origin)
        .body(Body::empty())
        .unwrap()
}
