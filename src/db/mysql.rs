//! MySQL-backed catalog store.
//!
//! # Responsibilities
//! - Build connect options from `DatabaseConfig`
//! - Own the bounded connection pool
//! - Run the ping and list queries
//! - Close the pool on shutdown

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlSslMode};

use crate::config::DatabaseConfig;
use crate::db::{DbError, Model3D, ModelStore, PingRow};
use crate::observability::metrics;

const PING_SQL: &str = "SELECT 1 AS ok";

// `CAST` keeps the id decodable whether the column is INT, BIGINT or unsigned.
const LIST_MODELS_SQL: &str = "SELECT CAST(id AS SIGNED) AS id, \
            title, \
            description, \
            model_src, \
            poster_src \
     FROM models3d \
     ORDER BY id DESC";

/// Catalog store over a MySQL connection pool.
#[derive(Debug, Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Create the pool without opening any connection yet.
    ///
    /// Waiters queue in arrival order once all `max_connections` are busy,
    /// and give up after `connect_timeout`.
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout)
            .connect_lazy_with(connect_options(config));

        tracing::info!(
            max_connections = config.max_connections,
            connect_timeout_secs = config.connect_timeout.as_secs(),
            "Database pool created"
        );

        Self { pool }
    }

    /// Get the underlying pool reference.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn connect_options(config: &DatabaseConfig) -> MySqlConnectOptions {
    let mut options = MySqlConnectOptions::new().port(config.port);

    if let Some(host) = &config.host {
        options = options.host(host);
    }
    if let Some(user) = &config.user {
        options = options.username(user);
    }
    if let Some(password) = &config.password {
        options = options.password(password);
    }
    if let Some(database) = &config.database {
        options = options.database(database);
    }

    // rustls never negotiates below TLS 1.2.
    let ssl_mode = if config.tls {
        MySqlSslMode::VerifyIdentity
    } else {
        MySqlSslMode::Disabled
    };

    options.ssl_mode(ssl_mode)
}

#[async_trait]
impl ModelStore for MySqlStore {
    async fn ping(&self) -> Result<PingRow, DbError> {
        let result = sqlx::query_as::<_, PingRow>(PING_SQL)
            .fetch_one(&self.pool)
            .await;
        metrics::record_db_query("ping", result.is_ok());
        Ok(result?)
    }

    async fn list_models(&self) -> Result<Vec<Model3D>, DbError> {
        let result = sqlx::query_as::<_, Model3D>(LIST_MODELS_SQL)
            .fetch_all(&self.pool)
            .await;
        metrics::record_db_query("list_models", result.is_ok());
        Ok(result?)
    }

    async fn shutdown(&self) {
        tracing::info!(
            open_connections = self.pool.size(),
            idle_connections = self.pool.num_idle(),
            "Closing database pool"
        );
        self.pool.close().await;
    }
}
