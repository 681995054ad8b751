//! CORS gate tests: origin checks happen before any handler or query.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};

mod common;

use common::{app, get, get_from, model, send, FakeStore};

const ALLOWED: &str = "https://armatex.wuaze.com";
const FOREIGN: &str = "https://evil.example";

fn preflight(uri: &str, origin: &str) -> Request<Body> {
    Request::builder()
        .method(Method::OPTIONS)
        .uri(uri)
        .header("origin", origin)
        .header("access-control-request-method", "GET")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn missing_origin_is_allowed() {
    let store = Arc::new(FakeStore::with_models(vec![model(1, "Chair")]));

    let res = send(app(store.clone(), false), get("/api/models3d")).await;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.header("access-control-allow-origin").is_none());
    assert_eq!(store.calls(), 1);
}

#[tokio::test]
async fn allowed_origin_is_echoed() {
    let store = Arc::new(FakeStore::with_models(vec![model(1, "Chair")]));

    let res = send(app(store.clone(), false), get_from("/api/models3d", ALLOWED)).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.header("access-control-allow-origin"), Some(ALLOWED));
    assert!(res.header("access-control-allow-credentials").is_none());
    assert_eq!(store.calls(), 1);
}

#[tokio::test]
async fn foreign_origin_never_reaches_the_database() {
    let store = Arc::new(FakeStore::with_models(vec![model(1, "Chair")]));

    for uri in ["/api/models3d", "/api/db/ping", "/api/health", "/"] {
        let res = send(app(store.clone(), false), get_from(uri, FOREIGN)).await;

        assert_eq!(res.status, StatusCode::FORBIDDEN, "{uri}");
        assert_eq!(res.json(), serde_json::json!({ "error": "CORS_NOT_ALLOWED" }));
        assert!(res.header("access-control-allow-origin").is_none());
    }

    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn origin_match_is_exact() {
    let store = Arc::new(FakeStore::default());

    for origin in ["https://armatex.wuaze.com/", "http://armatex.wuaze.com", "null"] {
        let res = send(app(store.clone(), false), get_from("/api/db/ping", origin)).await;
        assert_eq!(res.status, StatusCode::FORBIDDEN, "{origin}");
    }

    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn preflight_is_answered_without_handlers() {
    let store = Arc::new(FakeStore::default());

    let res = send(app(store.clone(), false), preflight("/api/models3d", ALLOWED)).await;

    assert!(res.status.is_success());
    assert_eq!(res.header("access-control-allow-origin"), Some(ALLOWED));
    assert_eq!(res.header("access-control-max-age"), Some("86400"));

    let methods = res.header("access-control-allow-methods").unwrap().to_ascii_uppercase();
    for method in ["GET", "HEAD", "OPTIONS"] {
        assert!(methods.contains(method), "{method} missing from {methods}");
    }
    let headers = res.header("access-control-allow-headers").unwrap().to_ascii_lowercase();
    assert!(headers.contains("content-type"));
    assert!(headers.contains("authorization"));

    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn foreign_preflight_is_rejected() {
    let store = Arc::new(FakeStore::default());

    let res = send(app(store.clone(), false), preflight("/api/models3d", FOREIGN)).await;

    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert!(res.header("access-control-max-age").is_none());
    assert_eq!(store.calls(), 0);
}
