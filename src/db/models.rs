//! Rows returned by the catalog queries.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A 3D model shown in the front-end carousel.
///
/// Every column but `id` may be NULL and is sent as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Model3D {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub model_src: Option<String>,
    pub poster_src: Option<String>,
}

/// Result of the database ping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PingRow {
    pub ok: i64,
}
