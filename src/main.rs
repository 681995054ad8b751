//! models3d-api
//!
//! Serves the 3D model catalog for the Armatex front end.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client Request
//!   ──────────────▶ request ID ─▶ trace span ─▶ CORS gate ─▶ CORS headers
//!                                                   │              │
//!                                          403 on foreign origin   ▼
//!                                                              handlers
//!                                                                  │
//!                                                                  ▼
//!                                                   ModelStore (MySQL pool, max 5)
//!
//!   Cross-cutting: config (env, resolved once) · observability · lifecycle
//! ```

use models3d_api::config;
use models3d_api::lifecycle;
use models3d_api::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    logging::init_logging();

    tracing::info!("models3d-api v{} starting", env!("CARGO_PKG_VERSION"));

    let config = config::load_from_env().inspect_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
    })?;

    lifecycle::run(config).await.inspect_err(|e| {
        tracing::error!(error = %e, "Server failed");
    })?;

    Ok(())
}
