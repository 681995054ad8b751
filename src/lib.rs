//! Read-only HTTP API for the 3D model catalog.

pub mod config;
pub mod db;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use db::{DbError, Model3D, ModelStore, MySqlStore};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
