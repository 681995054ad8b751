//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the API.
//! Values are resolved from environment variables by `loader.rs`.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Listening port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 10_000;

/// MySQL port used when neither `DB_PORT` nor the connection string name one.
pub const DEFAULT_DB_PORT: u16 = 3306;

/// Maximum number of open database connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Long enough for a sleeping hosted database to wake up.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(60);

/// Origins allowed when `CORS_ORIGIN` is empty or unset.
pub const FALLBACK_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "https://armatex.wuaze.com",
    "https://www.armatex.wuaze.com",
];

/// Root configuration for the API.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Database pool configuration.
    pub database: DatabaseConfig,

    /// Cross-origin allow-list.
    pub cors: CorsConfig,

    /// Echo database error messages to clients (`DEBUG_DB=1`).
    pub debug_errors: bool,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Port bound on all interfaces.
    pub port: u16,
}

impl ListenerConfig {
    /// Address the server binds to (`0.0.0.0:<port>`).
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

/// Database pool configuration.
///
/// `host`, `user`, `password` and `database` stay `None` when nothing in the
/// environment names them; the driver defaults apply in that case.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: Option<String>,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,

    /// Require TLS 1.2+ with certificate and host name verification.
    pub tls: bool,

    /// Upper bound on concurrently open connections.
    pub max_connections: u32,

    /// How long a request may wait for a connection.
    pub connect_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: DEFAULT_DB_PORT,
            user: None,
            password: None,
            database: None,
            tls: false,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

// Hand-written so the password never reaches the logs.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("database", &self.database)
            .field("tls", &self.tls)
            .field("max_connections", &self.max_connections)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

/// CORS configuration.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Origins allowed to make cross-origin requests, in configured order.
    pub allow_list: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_list: FALLBACK_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// Prometheus exporter address; the exporter is off when unset.
    pub metrics_address: Option<SocketAddr>,
}
