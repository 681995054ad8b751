//! Database error classification.

use std::io;

use sqlx::mysql::MySqlDatabaseError;
use thiserror::Error;

/// A failed database operation.
///
/// `code` is a stable machine-readable tag (`ER_NO_SUCH_TABLE`,
/// `ECONNREFUSED`, `POOL_TIMEOUT`, ...). `message` carries the driver's
/// human-readable detail and is only shown to clients in debug mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {}", .message.as_deref().unwrap_or("no detail"))]
pub struct DbError {
    pub code: String,
    pub message: Option<String>,
}

impl DbError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: Some(message.into()),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            let code = db
                .try_downcast_ref::<MySqlDatabaseError>()
                .map(|e| server_error_code(e.number()))
                .or_else(|| db.code().map(|c| c.into_owned()))
                .unwrap_or_else(|| "ER_UNKNOWN".to_string());
            return DbError::new(code, db.message());
        }

        let code = match &err {
            sqlx::Error::Io(io_err) => io_error_code(io_err),
            sqlx::Error::Tls(_) => "HANDSHAKE_SSL_ERROR",
            sqlx::Error::PoolTimedOut => "POOL_TIMEOUT",
            sqlx::Error::PoolClosed => "POOL_CLOSED",
            sqlx::Error::Configuration(_) => "CONFIG_ERROR",
            sqlx::Error::Protocol(_) => "PROTOCOL_ERROR",
            sqlx::Error::RowNotFound => "ROW_NOT_FOUND",
            sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::TypeNotFound { .. } => "DECODE_ERROR",
            _ => "UNKNOWN",
        };
        DbError::new(code, err.to_string())
    }
}

/// Names for the MySQL server errors this API is likely to hit.
fn server_error_code(number: u16) -> String {
    let name = match number {
        1040 => "ER_CON_COUNT_ERROR",
        1044 => "ER_DBACCESS_DENIED_ERROR",
        1045 => "ER_ACCESS_DENIED_ERROR",
        1046 => "ER_NO_DB_ERROR",
        1049 => "ER_BAD_DB_ERROR",
        1054 => "ER_BAD_FIELD_ERROR",
        1064 => "ER_PARSE_ERROR",
        1142 => "ER_TABLEACCESS_DENIED_ERROR",
        1146 => "ER_NO_SUCH_TABLE",
        1205 => "ER_LOCK_WAIT_TIMEOUT",
        _ => return format!("ER_{number}"),
    };
    name.to_string()
}

fn io_error_code(err: &io::Error) -> &'static str {
    match err.kind() {
        io::ErrorKind::ConnectionRefused => "ECONNREFUSED",
        io::ErrorKind::ConnectionReset => "ECONNRESET",
        io::ErrorKind::ConnectionAborted => "ECONNABORTED",
        io::ErrorKind::TimedOut => "ETIMEDOUT",
        io::ErrorKind::NotFound => "ENOTFOUND",
        _ => "EIO",
    }
}
