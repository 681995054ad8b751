//! Database access subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → ModelStore (trait object held in AppState)
//!     → mysql.rs (bounded sqlx pool, one query per call)
//!     → models.rs rows / error.rs DbError
//!     → handler maps to JSON
//! ```
//!
//! # Design Decisions
//! - The store is created once at startup and shared behind an `Arc`
//! - Connections open lazily so the API starts while the database wakes up
//! - No query is ever retried; failures surface as `DbError`

pub mod error;
pub mod models;
pub mod mysql;

use async_trait::async_trait;

pub use error::DbError;
pub use models::{Model3D, PingRow};
pub use mysql::MySqlStore;

/// Read-only access to the model catalog.
#[async_trait]
pub trait ModelStore: Send + Sync + 'static {
    /// Round-trip `SELECT 1 AS ok`.
    async fn ping(&self) -> Result<PingRow, DbError>;

    /// Every catalog record, newest id first.
    async fn list_models(&self) -> Result<Vec<Model3D>, DbError>;

    /// Close idle connections and wait for checked-out ones to come back.
    async fn shutdown(&self);
}
