//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (+ optional .env via dotenvy)
//!     → loader.rs (resolve variables, connection-string fallback)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → shared with the store, the CORS gate and the handlers
//! ```
//!
//! # Design Decisions
//! - Config is resolved once at startup and never changes afterwards
//! - Every field has a default so an empty environment still resolves
//! - Invalid values fail fast; the server never binds with a bad config

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_from_env, load_from_vars, ConfigError};
pub use schema::AppConfig;
pub use schema::CorsConfig;
pub use schema::DatabaseConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
