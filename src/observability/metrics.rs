//! Metrics collection and exposition.
//!
//! # Metrics
//! - `api_requests_total` (counter): requests by method, matched path, status
//! - `api_request_duration_seconds` (histogram): latency by method, matched path
//! - `db_queries_total` (counter): queries by name and outcome
//!
//! Recording is a no-op until `init_metrics` installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Middleware recording one counter and one latency sample per request.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let response = next.run(request).await;
    record_request(&method, &path, response.status().as_u16(), start);
    response
}

pub fn record_request(method: &str, path: &str, status: u16, start: Instant) {
    ::metrics::counter!(
        "api_requests_total",
        "method" => method.to_owned(),
        "path" => path.to_owned(),
        "status" => status.to_string()
    )
    .increment(1);

    ::metrics::histogram!(
        "api_request_duration_seconds",
        "method" => method.to_owned(),
        "path" => path.to_owned()
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_db_query(query: &'static str, ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    ::metrics::counter!("db_queries_total", "query" => query, "outcome" => outcome).increment(1);
}
