//! End-to-end lifecycle test over a real socket.

use std::sync::Arc;
use std::time::Duration;

use models3d_api::http::HttpServer;
use models3d_api::lifecycle::Shutdown;
use tokio::net::TcpListener;

mod common;

use common::{model, test_config, FakeStore};

#[tokio::test]
async fn serves_then_drains_store_on_shutdown() {
    let store = Arc::new(FakeStore::with_models(vec![model(1, "Chair"), model(2, "Lamp")]));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&test_config(false), store.clone());
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    let res = client
        .get(format!("http://{addr}/api/models3d"))
        .header("origin", "http://localhost:5173")
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:5173")
    );
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 2);

    let res = client
        .get(format!("http://{addr}/"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "OK");

    assert!(!store.is_shut_down());
    shutdown.trigger();

    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .expect("server task panicked");
    assert!(result.is_ok());
    assert!(store.is_shut_down(), "pool must be drained after serving stops");

    assert!(client
        .get(format!("http://{addr}/api/health"))
        .send()
        .await
        .is_err());
}
