//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, CORS, metrics)
//! - Serve on a bound listener until the shutdown signal fires
//! - Drain the database pool once the last request has finished

use std::sync::Arc;

use axum::{
    handler::Handler,
    middleware,
    routing::{any, get, MethodRouter},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};

use crate::config::AppConfig;
use crate::db::ModelStore;
use crate::http::cors::{cors_gate, cors_layer, AllowList};
use crate::http::handlers;
use crate::http::request::RequestIdMaker;
use crate::observability::metrics;
use crate::observability::tracing::http_trace_layer;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ModelStore>,
    /// Include database error messages in responses.
    pub debug_errors: bool,
}

/// HTTP server for the catalog API.
pub struct HttpServer {
    router: Router,
    store: Arc<dyn ModelStore>,
    allow_list: AllowList,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and store.
    pub fn new(config: &AppConfig, store: Arc<dyn ModelStore>) -> Self {
        let allow_list = AllowList::new(config.cors.allow_list.clone());
        let state = AppState {
            store: store.clone(),
            debug_errors: config.debug_errors,
        };

        let router = Self::build_router(&allow_list, state);
        Self {
            router,
            store,
            allow_list,
        }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers run outermost first: request ID, trace span, CORS gate, CORS
    /// headers, metrics, handler.
    fn build_router(allow_list: &AllowList, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::root).fallback(handlers::not_found))
            .route("/api/health", api_get(handlers::health))
            .route("/api/db/ping", api_get(handlers::db_ping))
            .route("/api/models3d", api_get(handlers::list_models))
            .route("/api", any(handlers::api_not_found))
            .route("/api/{*rest}", any(handlers::api_not_found))
            .fallback(handlers::not_found)
            .layer(middleware::from_fn(metrics::track_requests))
            .with_state(state)
            .layer(cors_layer(allow_list))
            .layer(middleware::from_fn_with_state(allow_list.clone(), cors_gate))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(http_trace_layer())
            .layer(SetRequestIdLayer::x_request_id(RequestIdMaker))
    }

    /// The fully layered router, for driving requests in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Stops accepting once `shutdown` fires (or its sender is dropped), waits
    /// for in-flight requests, then closes the database pool.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            port = addr.port(),
            allow_list = ?self.allow_list.origins(),
            "API listening"
        );

        let served = axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown requested, no longer accepting connections");
            })
            .await;

        // Drain is best-effort; a failed serve still releases the pool.
        self.store.shutdown().await;
        tracing::info!("HTTP server stopped");
        served
    }
}

/// GET route whose other methods fall through to the API 404.
fn api_get<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    get(handler).fallback(handlers::api_not_found)
}
